// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Visitor framework for traversing the AST.
//!
//! There are two traits:
//!
//! - [`Visitor`] has one required method per concrete node kind and an
//!   associated `Output` type. [`accept`] is the single dispatch point: it
//!   matches a [`Node`] exhaustively and calls the matching method, so adding
//!   a node kind without updating it fails to build.
//!
//! - [`RecursiveVisitor`] has a default for every method that walks the
//!   node's children depth-first in source order. An analysis overrides only
//!   the kinds it cares about and calls the matching `walk_*` function when
//!   it still wants the children visited.
//!
//! Visitors borrow the tree immutably. A pass that needs a different tree
//! builds a new one.
//!
//! ```
//! use kestrel_core::ast::Identifier;
//! use kestrel_core::source_analysis::parse_source;
//! use kestrel_core::visitor::RecursiveVisitor;
//!
//! #[derive(Default)]
//! struct NameCounter(usize);
//!
//! impl<'ast> RecursiveVisitor<'ast> for NameCounter {
//!     fn visit_identifier(&mut self, _identifier: &'ast Identifier) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let output = parse_source("let a = b + c(d);", None);
//! let mut counter = NameCounter::default();
//! counter.visit_declarations(&output.declarations);
//! assert_eq!(counter.0, 3);
//! ```

use crate::ast::{
    AssignmentExpression, BinaryExpression, BindingPattern, Block, BreakStatement,
    CallExpression, ConstructorPattern, ContinueStatement, Declaration, ElseBranch, Expression,
    ExpressionStatement, ForStatement, FunctionDeclaration, GroupExpression, Identifier,
    IfStatement, IndexExpression, LetDeclaration, LiteralExpression, LiteralPattern, MatchArm,
    MatchExpression, MemberExpression, Pattern, ReturnStatement, Statement, TuplePattern,
    TypeAliasDeclaration, TypeExpr, UnaryExpression, WhileStatement, WildcardPattern,
};
use crate::source_analysis::Span;

// ============================================================================
// Nodes
// ============================================================================

/// A borrowed view of any AST node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'ast> {
    Declaration(&'ast Declaration),
    Statement(&'ast Statement),
    Expression(&'ast Expression),
    Pattern(&'ast Pattern),
}

impl<'ast> Node<'ast> {
    /// Returns the concrete kind of this node.
    ///
    /// A statement wrapped in a declaration reports the statement's kind.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Declaration(Declaration::Let(_)) => NodeKind::LetDeclaration,
            Self::Declaration(Declaration::Function(_)) => NodeKind::FunctionDeclaration,
            Self::Declaration(Declaration::TypeAlias(_)) => NodeKind::TypeAliasDeclaration,
            Self::Declaration(Declaration::Statement(statement)) => {
                Self::Statement(statement).kind()
            }
            Self::Statement(statement) => match statement {
                Statement::Expression(_) => NodeKind::ExpressionStatement,
                Statement::If(_) => NodeKind::IfStatement,
                Statement::While(_) => NodeKind::WhileStatement,
                Statement::For(_) => NodeKind::ForStatement,
                Statement::Return(_) => NodeKind::ReturnStatement,
                Statement::Break(_) => NodeKind::BreakStatement,
                Statement::Continue(_) => NodeKind::ContinueStatement,
                Statement::Block(_) => NodeKind::BlockStatement,
            },
            Self::Expression(expression) => match expression {
                Expression::Literal(_) => NodeKind::Literal,
                Expression::Identifier(_) => NodeKind::Identifier,
                Expression::Binary(_) => NodeKind::Binary,
                Expression::Unary(_) => NodeKind::Unary,
                Expression::Assignment(_) => NodeKind::Assignment,
                Expression::Call(_) => NodeKind::Call,
                Expression::Member(_) => NodeKind::Member,
                Expression::Index(_) => NodeKind::Index,
                Expression::Group(_) => NodeKind::Group,
                Expression::Match(_) => NodeKind::Match,
            },
            Self::Pattern(pattern) => match pattern {
                Pattern::Wildcard(_) => NodeKind::WildcardPattern,
                Pattern::Literal(_) => NodeKind::LiteralPattern,
                Pattern::Binding(_) => NodeKind::BindingPattern,
                Pattern::Tuple(_) => NodeKind::TuplePattern,
                Pattern::Constructor(_) => NodeKind::ConstructorPattern,
            },
        }
    }

    #[must_use]
    pub fn span(self) -> Span {
        match self {
            Self::Declaration(declaration) => declaration.span(),
            Self::Statement(statement) => statement.span(),
            Self::Expression(expression) => expression.span(),
            Self::Pattern(pattern) => pattern.span(),
        }
    }

    /// Dispatches this node to `visitor`. See [`accept`].
    pub fn accept<V: Visitor<'ast> + ?Sized>(self, visitor: &mut V) -> V::Output {
        accept(self, visitor)
    }
}

impl<'ast> From<&'ast Declaration> for Node<'ast> {
    fn from(declaration: &'ast Declaration) -> Self {
        Self::Declaration(declaration)
    }
}

impl<'ast> From<&'ast Statement> for Node<'ast> {
    fn from(statement: &'ast Statement) -> Self {
        Self::Statement(statement)
    }
}

impl<'ast> From<&'ast Expression> for Node<'ast> {
    fn from(expression: &'ast Expression) -> Self {
        Self::Expression(expression)
    }
}

impl<'ast> From<&'ast Pattern> for Node<'ast> {
    fn from(pattern: &'ast Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// Every concrete node kind, one per [`Visitor`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    LetDeclaration,
    FunctionDeclaration,
    TypeAliasDeclaration,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    BlockStatement,
    Literal,
    Identifier,
    Binary,
    Unary,
    Assignment,
    Call,
    Member,
    Index,
    Group,
    Match,
    WildcardPattern,
    LiteralPattern,
    BindingPattern,
    TuplePattern,
    ConstructorPattern,
}

impl NodeKind {
    pub const ALL: [Self; 26] = [
        Self::LetDeclaration,
        Self::FunctionDeclaration,
        Self::TypeAliasDeclaration,
        Self::ExpressionStatement,
        Self::IfStatement,
        Self::WhileStatement,
        Self::ForStatement,
        Self::ReturnStatement,
        Self::BreakStatement,
        Self::ContinueStatement,
        Self::BlockStatement,
        Self::Literal,
        Self::Identifier,
        Self::Binary,
        Self::Unary,
        Self::Assignment,
        Self::Call,
        Self::Member,
        Self::Index,
        Self::Group,
        Self::Match,
        Self::WildcardPattern,
        Self::LiteralPattern,
        Self::BindingPattern,
        Self::TuplePattern,
        Self::ConstructorPattern,
    ];
}

// ============================================================================
// Visitor and dispatch
// ============================================================================

/// An operation over AST nodes, one method per concrete kind.
pub trait Visitor<'ast> {
    type Output;

    fn visit_let(&mut self, declaration: &'ast LetDeclaration) -> Self::Output;
    fn visit_function(&mut self, declaration: &'ast FunctionDeclaration) -> Self::Output;
    fn visit_type_alias(&mut self, declaration: &'ast TypeAliasDeclaration) -> Self::Output;

    fn visit_expression_statement(&mut self, statement: &'ast ExpressionStatement)
    -> Self::Output;
    fn visit_if(&mut self, statement: &'ast IfStatement) -> Self::Output;
    fn visit_while(&mut self, statement: &'ast WhileStatement) -> Self::Output;
    fn visit_for(&mut self, statement: &'ast ForStatement) -> Self::Output;
    fn visit_return(&mut self, statement: &'ast ReturnStatement) -> Self::Output;
    fn visit_break(&mut self, statement: &'ast BreakStatement) -> Self::Output;
    fn visit_continue(&mut self, statement: &'ast ContinueStatement) -> Self::Output;
    fn visit_block(&mut self, block: &'ast Block) -> Self::Output;

    fn visit_literal(&mut self, expression: &'ast LiteralExpression) -> Self::Output;
    fn visit_identifier(&mut self, identifier: &'ast Identifier) -> Self::Output;
    fn visit_binary(&mut self, expression: &'ast BinaryExpression) -> Self::Output;
    fn visit_unary(&mut self, expression: &'ast UnaryExpression) -> Self::Output;
    fn visit_assignment(&mut self, expression: &'ast AssignmentExpression) -> Self::Output;
    fn visit_call(&mut self, expression: &'ast CallExpression) -> Self::Output;
    fn visit_member(&mut self, expression: &'ast MemberExpression) -> Self::Output;
    fn visit_index(&mut self, expression: &'ast IndexExpression) -> Self::Output;
    fn visit_group(&mut self, expression: &'ast GroupExpression) -> Self::Output;
    fn visit_match(&mut self, expression: &'ast MatchExpression) -> Self::Output;

    fn visit_wildcard_pattern(&mut self, pattern: &'ast WildcardPattern) -> Self::Output;
    fn visit_literal_pattern(&mut self, pattern: &'ast LiteralPattern) -> Self::Output;
    fn visit_binding_pattern(&mut self, pattern: &'ast BindingPattern) -> Self::Output;
    fn visit_tuple_pattern(&mut self, pattern: &'ast TuplePattern) -> Self::Output;
    fn visit_constructor_pattern(&mut self, pattern: &'ast ConstructorPattern) -> Self::Output;
}

/// Calls the `visitor` method for `node`'s concrete kind.
///
/// This is the only place that maps kinds to methods. There is no wildcard
/// arm.
pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(node: Node<'ast>, visitor: &mut V) -> V::Output {
    match node {
        Node::Declaration(Declaration::Let(declaration)) => visitor.visit_let(declaration),
        Node::Declaration(Declaration::Function(declaration)) => {
            visitor.visit_function(declaration)
        }
        Node::Declaration(Declaration::TypeAlias(declaration)) => {
            visitor.visit_type_alias(declaration)
        }
        Node::Declaration(Declaration::Statement(statement)) => {
            accept(Node::Statement(statement), visitor)
        }

        Node::Statement(Statement::Expression(statement)) => {
            visitor.visit_expression_statement(statement)
        }
        Node::Statement(Statement::If(statement)) => visitor.visit_if(statement),
        Node::Statement(Statement::While(statement)) => visitor.visit_while(statement),
        Node::Statement(Statement::For(statement)) => visitor.visit_for(statement),
        Node::Statement(Statement::Return(statement)) => visitor.visit_return(statement),
        Node::Statement(Statement::Break(statement)) => visitor.visit_break(statement),
        Node::Statement(Statement::Continue(statement)) => visitor.visit_continue(statement),
        Node::Statement(Statement::Block(block)) => visitor.visit_block(block),

        Node::Expression(Expression::Literal(expression)) => visitor.visit_literal(expression),
        Node::Expression(Expression::Identifier(identifier)) => {
            visitor.visit_identifier(identifier)
        }
        Node::Expression(Expression::Binary(expression)) => visitor.visit_binary(expression),
        Node::Expression(Expression::Unary(expression)) => visitor.visit_unary(expression),
        Node::Expression(Expression::Assignment(expression)) => {
            visitor.visit_assignment(expression)
        }
        Node::Expression(Expression::Call(expression)) => visitor.visit_call(expression),
        Node::Expression(Expression::Member(expression)) => visitor.visit_member(expression),
        Node::Expression(Expression::Index(expression)) => visitor.visit_index(expression),
        Node::Expression(Expression::Group(expression)) => visitor.visit_group(expression),
        Node::Expression(Expression::Match(expression)) => visitor.visit_match(expression),

        Node::Pattern(Pattern::Wildcard(pattern)) => visitor.visit_wildcard_pattern(pattern),
        Node::Pattern(Pattern::Literal(pattern)) => visitor.visit_literal_pattern(pattern),
        Node::Pattern(Pattern::Binding(pattern)) => visitor.visit_binding_pattern(pattern),
        Node::Pattern(Pattern::Tuple(pattern)) => visitor.visit_tuple_pattern(pattern),
        Node::Pattern(Pattern::Constructor(pattern)) => {
            visitor.visit_constructor_pattern(pattern)
        }
    }
}

// ============================================================================
// Recursive visitor
// ============================================================================

/// A visitor that walks every child by default and returns nothing.
///
/// The category methods (`visit_declaration`, `visit_statement`,
/// `visit_expression`, `visit_pattern`) see every node of their category
/// before it is dispatched to its per-kind method.
pub trait RecursiveVisitor<'ast> {
    /// Visits a sequence of declarations in order.
    fn visit_declarations(&mut self, declarations: &'ast [Declaration]) {
        for declaration in declarations {
            self.visit_declaration(declaration);
        }
    }

    fn visit_declaration(&mut self, declaration: &'ast Declaration) {
        walk_declaration(self, declaration);
    }

    fn visit_statement(&mut self, statement: &'ast Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &'ast Expression) {
        walk_expression(self, expression);
    }

    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        walk_type(self, ty);
    }

    fn visit_match_arm(&mut self, arm: &'ast MatchArm) {
        walk_match_arm(self, arm);
    }

    fn visit_let(&mut self, declaration: &'ast LetDeclaration) {
        walk_let(self, declaration);
    }

    fn visit_function(&mut self, declaration: &'ast FunctionDeclaration) {
        walk_function(self, declaration);
    }

    fn visit_type_alias(&mut self, declaration: &'ast TypeAliasDeclaration) {
        walk_type_alias(self, declaration);
    }

    fn visit_expression_statement(&mut self, statement: &'ast ExpressionStatement) {
        self.visit_expression(&statement.expression);
    }

    fn visit_if(&mut self, statement: &'ast IfStatement) {
        walk_if(self, statement);
    }

    fn visit_while(&mut self, statement: &'ast WhileStatement) {
        walk_while(self, statement);
    }

    fn visit_for(&mut self, statement: &'ast ForStatement) {
        walk_for(self, statement);
    }

    fn visit_return(&mut self, statement: &'ast ReturnStatement) {
        if let Some(value) = &statement.value {
            self.visit_expression(value);
        }
    }

    fn visit_break(&mut self, _statement: &'ast BreakStatement) {}

    fn visit_continue(&mut self, _statement: &'ast ContinueStatement) {}

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_literal(&mut self, _expression: &'ast LiteralExpression) {}

    fn visit_identifier(&mut self, _identifier: &'ast Identifier) {}

    fn visit_binary(&mut self, expression: &'ast BinaryExpression) {
        self.visit_expression(&expression.left);
        self.visit_expression(&expression.right);
    }

    fn visit_unary(&mut self, expression: &'ast UnaryExpression) {
        self.visit_expression(&expression.operand);
    }

    fn visit_assignment(&mut self, expression: &'ast AssignmentExpression) {
        self.visit_expression(&expression.target);
        self.visit_expression(&expression.value);
    }

    fn visit_call(&mut self, expression: &'ast CallExpression) {
        walk_call(self, expression);
    }

    fn visit_member(&mut self, expression: &'ast MemberExpression) {
        self.visit_expression(&expression.object);
    }

    fn visit_index(&mut self, expression: &'ast IndexExpression) {
        self.visit_expression(&expression.object);
        self.visit_expression(&expression.index);
    }

    fn visit_group(&mut self, expression: &'ast GroupExpression) {
        self.visit_expression(&expression.expression);
    }

    fn visit_match(&mut self, expression: &'ast MatchExpression) {
        walk_match(self, expression);
    }

    fn visit_wildcard_pattern(&mut self, _pattern: &'ast WildcardPattern) {}

    fn visit_literal_pattern(&mut self, _pattern: &'ast LiteralPattern) {}

    fn visit_binding_pattern(&mut self, _pattern: &'ast BindingPattern) {}

    fn visit_tuple_pattern(&mut self, pattern: &'ast TuplePattern) {
        for element in &pattern.elements {
            self.visit_pattern(element);
        }
    }

    fn visit_constructor_pattern(&mut self, pattern: &'ast ConstructorPattern) {
        for argument in &pattern.arguments {
            self.visit_pattern(argument);
        }
    }
}

/// Routes [`accept`] to the per-kind methods of a [`RecursiveVisitor`].
struct Recursive<'v, V: ?Sized>(&'v mut V);

impl<'ast, V: RecursiveVisitor<'ast> + ?Sized> Visitor<'ast> for Recursive<'_, V> {
    type Output = ();

    fn visit_let(&mut self, declaration: &'ast LetDeclaration) {
        self.0.visit_let(declaration);
    }
    fn visit_function(&mut self, declaration: &'ast FunctionDeclaration) {
        self.0.visit_function(declaration);
    }
    fn visit_type_alias(&mut self, declaration: &'ast TypeAliasDeclaration) {
        self.0.visit_type_alias(declaration);
    }
    fn visit_expression_statement(&mut self, statement: &'ast ExpressionStatement) {
        self.0.visit_expression_statement(statement);
    }
    fn visit_if(&mut self, statement: &'ast IfStatement) {
        self.0.visit_if(statement);
    }
    fn visit_while(&mut self, statement: &'ast WhileStatement) {
        self.0.visit_while(statement);
    }
    fn visit_for(&mut self, statement: &'ast ForStatement) {
        self.0.visit_for(statement);
    }
    fn visit_return(&mut self, statement: &'ast ReturnStatement) {
        self.0.visit_return(statement);
    }
    fn visit_break(&mut self, statement: &'ast BreakStatement) {
        self.0.visit_break(statement);
    }
    fn visit_continue(&mut self, statement: &'ast ContinueStatement) {
        self.0.visit_continue(statement);
    }
    fn visit_block(&mut self, block: &'ast Block) {
        self.0.visit_block(block);
    }
    fn visit_literal(&mut self, expression: &'ast LiteralExpression) {
        self.0.visit_literal(expression);
    }
    fn visit_identifier(&mut self, identifier: &'ast Identifier) {
        self.0.visit_identifier(identifier);
    }
    fn visit_binary(&mut self, expression: &'ast BinaryExpression) {
        self.0.visit_binary(expression);
    }
    fn visit_unary(&mut self, expression: &'ast UnaryExpression) {
        self.0.visit_unary(expression);
    }
    fn visit_assignment(&mut self, expression: &'ast AssignmentExpression) {
        self.0.visit_assignment(expression);
    }
    fn visit_call(&mut self, expression: &'ast CallExpression) {
        self.0.visit_call(expression);
    }
    fn visit_member(&mut self, expression: &'ast MemberExpression) {
        self.0.visit_member(expression);
    }
    fn visit_index(&mut self, expression: &'ast IndexExpression) {
        self.0.visit_index(expression);
    }
    fn visit_group(&mut self, expression: &'ast GroupExpression) {
        self.0.visit_group(expression);
    }
    fn visit_match(&mut self, expression: &'ast MatchExpression) {
        self.0.visit_match(expression);
    }
    fn visit_wildcard_pattern(&mut self, pattern: &'ast WildcardPattern) {
        self.0.visit_wildcard_pattern(pattern);
    }
    fn visit_literal_pattern(&mut self, pattern: &'ast LiteralPattern) {
        self.0.visit_literal_pattern(pattern);
    }
    fn visit_binding_pattern(&mut self, pattern: &'ast BindingPattern) {
        self.0.visit_binding_pattern(pattern);
    }
    fn visit_tuple_pattern(&mut self, pattern: &'ast TuplePattern) {
        self.0.visit_tuple_pattern(pattern);
    }
    fn visit_constructor_pattern(&mut self, pattern: &'ast ConstructorPattern) {
        self.0.visit_constructor_pattern(pattern);
    }
}

// ── Walk functions ────────────────────────────────────────────────────────────

/// Dispatches a declaration to its per-kind method. A wrapped statement goes
/// through [`RecursiveVisitor::visit_statement`].
pub fn walk_declaration<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    declaration: &'ast Declaration,
) {
    if let Declaration::Statement(statement) = declaration {
        visitor.visit_statement(statement);
    } else {
        accept(Node::Declaration(declaration), &mut Recursive(visitor));
    }
}

pub fn walk_statement<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast Statement,
) {
    accept(Node::Statement(statement), &mut Recursive(visitor));
}

pub fn walk_expression<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    expression: &'ast Expression,
) {
    accept(Node::Expression(expression), &mut Recursive(visitor));
}

pub fn walk_pattern<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    pattern: &'ast Pattern,
) {
    accept(Node::Pattern(pattern), &mut Recursive(visitor));
}

pub fn walk_type<'ast, V: RecursiveVisitor<'ast> + ?Sized>(visitor: &mut V, ty: &'ast TypeExpr) {
    match ty {
        TypeExpr::Named { arguments, .. } => {
            for argument in arguments {
                visitor.visit_type(argument);
            }
        }
        TypeExpr::Tuple { elements, .. } => {
            for element in elements {
                visitor.visit_type(element);
            }
        }
        TypeExpr::Function {
            parameters, result, ..
        } => {
            for parameter in parameters {
                visitor.visit_type(parameter);
            }
            visitor.visit_type(result);
        }
    }
}

pub fn walk_let<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    declaration: &'ast LetDeclaration,
) {
    if let Some(ty) = &declaration.type_annotation {
        visitor.visit_type(ty);
    }
    if let Some(initializer) = &declaration.initializer {
        visitor.visit_expression(initializer);
    }
}

pub fn walk_function<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    declaration: &'ast FunctionDeclaration,
) {
    for parameter in &declaration.parameters {
        if let Some(ty) = &parameter.type_annotation {
            visitor.visit_type(ty);
        }
    }
    if let Some(ty) = &declaration.return_type {
        visitor.visit_type(ty);
    }
    visitor.visit_block(&declaration.body);
}

pub fn walk_type_alias<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    declaration: &'ast TypeAliasDeclaration,
) {
    visitor.visit_type(&declaration.target);
}

pub fn walk_if<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast IfStatement,
) {
    visitor.visit_expression(&statement.condition);
    visitor.visit_block(&statement.then_branch);
    match &statement.else_branch {
        Some(ElseBranch::Block(block)) => visitor.visit_block(block),
        Some(ElseBranch::If(nested)) => visitor.visit_if(nested),
        None => {}
    }
}

pub fn walk_while<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast WhileStatement,
) {
    visitor.visit_expression(&statement.condition);
    visitor.visit_block(&statement.body);
}

pub fn walk_for<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    statement: &'ast ForStatement,
) {
    visitor.visit_expression(&statement.iterable);
    visitor.visit_block(&statement.body);
}

pub fn walk_block<'ast, V: RecursiveVisitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    visitor.visit_declarations(&block.declarations);
}

pub fn walk_call<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    expression: &'ast CallExpression,
) {
    visitor.visit_expression(&expression.callee);
    for argument in &expression.arguments {
        visitor.visit_expression(argument);
    }
}

pub fn walk_match<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    expression: &'ast MatchExpression,
) {
    visitor.visit_expression(&expression.scrutinee);
    for arm in &expression.arms {
        visitor.visit_match_arm(arm);
    }
}

pub fn walk_match_arm<'ast, V: RecursiveVisitor<'ast> + ?Sized>(
    visitor: &mut V,
    arm: &'ast MatchArm,
) {
    visitor.visit_pattern(&arm.pattern);
    if let Some(guard) = &arm.guard {
        visitor.visit_expression(guard);
    }
    visitor.visit_expression(&arm.body);
}
