// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree for Kestrel.
//!
//! The tree is made of four closed categories: [`Declaration`],
//! [`Statement`], [`Expression`] and [`Pattern`]. Every concrete node is a
//! struct carrying its [`Span`], wrapped in one variant of its category, so
//! any `match` over a category is checked for exhaustiveness by the compiler.
//!
//! Nodes own their children exclusively and never point back at their
//! parents. Analyses that need parent information rebuild it during a
//! traversal (see [`crate::visitor`]).
//!
//! # Example
//!
//! ```
//! use kestrel_core::ast::{Declaration, Expression, Literal};
//! use kestrel_core::source_analysis::parse_source;
//!
//! let output = parse_source("let answer = 42;", None);
//! let Declaration::Let(decl) = &output.declarations[0] else { unreachable!() };
//! assert_eq!(decl.name.name, "answer");
//! assert!(matches!(
//!     decl.initializer,
//!     Some(Expression::Literal(ref lit)) if lit.value == Literal::Integer(42)
//! ));
//! ```

use std::fmt;

use ecow::EcoString;

use crate::source_analysis::Span;

// ============================================================================
// Shared leaves
// ============================================================================

/// A name with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: EcoString,
    pub span: Span,
}

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    /// String contents with escapes already interpreted.
    String(EcoString),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => {
                // Display never uses exponent notation; keep a fraction so the
                // text lexes back as a float.
                let text = value.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Self::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        '\0' => f.write_str("\\0")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// A type written in an annotation or type alias.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `int`, `List<T>`
    Named {
        name: Identifier,
        arguments: Vec<TypeExpr>,
        span: Span,
    },
    /// `(int, string)`; `()` is the unit type
    Tuple { elements: Vec<TypeExpr>, span: Span },
    /// `fn(int) -> bool`
    Function {
        parameters: Vec<TypeExpr>,
        result: Box<TypeExpr>,
        span: Span,
    },
}

impl TypeExpr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Named { span, .. } | Self::Tuple { span, .. } | Self::Function { span, .. } => {
                *span
            }
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// A declaration. Declarations are legal wherever statements are, so
/// [`Declaration::Statement`] wraps a plain statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Let(LetDeclaration),
    Function(FunctionDeclaration),
    TypeAlias(TypeAliasDeclaration),
    Statement(Statement),
}

impl Declaration {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Let(decl) => decl.span,
            Self::Function(decl) => decl.span,
            Self::TypeAlias(decl) => decl.span,
            Self::Statement(stmt) => stmt.span(),
        }
    }
}

/// `let mut name: Type = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct LetDeclaration {
    pub name: Identifier,
    pub mutable: bool,
    pub type_annotation: Option<TypeExpr>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// `fn name(params) -> Type { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
    pub body: Block,
    pub span: Span,
}

/// A function parameter with an optional type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_annotation: Option<TypeExpr>,
    pub span: Span,
}

/// `type Name = Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDeclaration {
    pub name: Identifier,
    pub target: TypeExpr,
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Block(Block),
}

impl Statement {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(stmt) => stmt.span,
            Self::If(stmt) => stmt.span,
            Self::While(stmt) => stmt.span,
            Self::For(stmt) => stmt.span,
            Self::Return(stmt) => stmt.span,
            Self::Break(stmt) => stmt.span,
            Self::Continue(stmt) => stmt.span,
            Self::Block(block) => block.span,
        }
    }

    /// Returns true if control never falls through this statement.
    #[must_use]
    pub fn diverges(&self) -> bool {
        matches!(self, Self::Return(_) | Self::Break(_) | Self::Continue(_))
    }
}

/// An expression followed by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// `if condition { ... } else ...`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

/// The tail of an `if`: either a block or a chained `else if`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStatement>),
}

/// `while condition { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

/// `for binding in iterable { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub binding: Identifier,
    pub iterable: Expression,
    pub body: Block,
    pub span: Span,
}

/// `return value;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// `break;`
#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub span: Span,
}

/// `continue;`
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    pub span: Span,
}

/// `{ declarations }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralExpression),
    Identifier(Identifier),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Assignment(AssignmentExpression),
    Call(CallExpression),
    Member(MemberExpression),
    Index(IndexExpression),
    Group(GroupExpression),
    Match(MatchExpression),
}

impl Expression {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(expr) => expr.span,
            Self::Identifier(ident) => ident.span,
            Self::Binary(expr) => expr.span,
            Self::Unary(expr) => expr.span,
            Self::Assignment(expr) => expr.span,
            Self::Call(expr) => expr.span,
            Self::Member(expr) => expr.span,
            Self::Index(expr) => expr.span,
            Self::Group(expr) => expr.span,
            Self::Match(expr) => expr.span,
        }
    }

    /// Returns true if this expression can appear on the left of `=`.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self, Self::Identifier(_) | Self::Member(_) | Self::Index(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpression {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// `target = value`, `target += value`, ...
///
/// The parser only builds this with an assignable target.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// `object.member`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub member: Identifier,
    pub span: Span,
}

/// `object[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub object: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

/// `match scrutinee { pattern if guard => body, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpression {
    pub scrutinee: Box<Expression>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

/// One arm of a `match` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expression>,
    pub body: Expression,
    pub span: Span,
}

/// Binary operators, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `!`
    Not,
    /// `-`
    Negate,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Negate => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

impl AssignmentOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
        }
    }
}

// ============================================================================
// Patterns
// ============================================================================

/// A pattern in a `match` arm.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Wildcard(WildcardPattern),
    Literal(LiteralPattern),
    Binding(BindingPattern),
    Tuple(TuplePattern),
    Constructor(ConstructorPattern),
}

impl Pattern {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Wildcard(pattern) => pattern.span,
            Self::Literal(pattern) => pattern.span,
            Self::Binding(pattern) => pattern.name.span,
            Self::Tuple(pattern) => pattern.span,
            Self::Constructor(pattern) => pattern.span,
        }
    }
}

/// `_`
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardPattern {
    pub span: Span,
}

/// `42`, `-1`, `"text"`, `true`
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralPattern {
    pub value: Literal,
    pub span: Span,
}

/// A name that binds the matched value.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingPattern {
    pub name: Identifier,
}

/// `(a, b)`
#[derive(Debug, Clone, PartialEq)]
pub struct TuplePattern {
    pub elements: Vec<Pattern>,
    pub span: Span,
}

/// `Some(x)`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorPattern {
    pub name: Identifier,
    pub arguments: Vec<Pattern>,
    pub span: Span,
}
