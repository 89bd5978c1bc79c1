// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! AST unparser: converts Kestrel AST nodes back to source text.
//!
//! The output is canonical: four-space indentation, one declaration per
//! line, single spaces around binary and assignment operators, and every
//! statement terminated the way the grammar expects. Parentheses are only
//! printed where the tree has a [`GroupExpression`], so unparsing a parsed
//! file and parsing the result again yields the same tree shape.
//!
//! Used by `kestrel fmt`.

use std::fmt::Write;

use crate::ast::{
    AssignmentExpression, BinaryExpression, BindingPattern, Block, BreakStatement, CallExpression,
    ConstructorPattern, ContinueStatement, Declaration, ElseBranch, Expression,
    ExpressionStatement, ForStatement, FunctionDeclaration, GroupExpression, Identifier,
    IfStatement, IndexExpression, LetDeclaration, LiteralExpression, LiteralPattern,
    MatchExpression, MemberExpression, Pattern, ReturnStatement, TuplePattern,
    TypeAliasDeclaration, TypeExpr, UnaryExpression, WhileStatement, WildcardPattern,
};
use crate::visitor::{Node, Visitor, accept};

const INDENT: &str = "    ";

// --- Public entry points ---

/// Unparses a file's declarations to source text, one per line.
#[must_use]
pub fn unparse(declarations: &[Declaration]) -> String {
    Unparser::new().lines(declarations)
}

/// Renders a type annotation.
#[must_use]
pub fn unparse_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Named {
            name, arguments, ..
        } => {
            if arguments.is_empty() {
                name.name.to_string()
            } else {
                format!("{}<{}>", name.name, comma_separated(arguments, unparse_type))
            }
        }
        TypeExpr::Tuple { elements, .. } => {
            format!("({})", comma_separated(elements, unparse_type))
        }
        TypeExpr::Function {
            parameters, result, ..
        } => format!(
            "fn({}) -> {}",
            comma_separated(parameters, unparse_type),
            unparse_type(result)
        ),
    }
}

fn comma_separated<T>(items: &[T], mut render: impl FnMut(&T) -> String) -> String {
    items.iter().map(&mut render).collect::<Vec<_>>().join(", ")
}

// --- Unparser ---

/// A [`Visitor`] that renders each node as source text.
///
/// Nodes render without leading indentation or a trailing newline; blocks and
/// `match` arms indent their contents relative to the current depth.
#[derive(Debug, Default)]
pub struct Unparser {
    depth: usize,
}

impl Unparser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `declarations` one per line at the current depth.
    pub fn lines(&mut self, declarations: &[Declaration]) -> String {
        let mut out = String::new();
        for declaration in declarations {
            let text = accept(Node::Declaration(declaration), self);
            let _ = writeln!(out, "{}{text}", self.indentation());
        }
        out
    }

    fn indentation(&self) -> String {
        INDENT.repeat(self.depth)
    }

    fn expression(&mut self, expression: &Expression) -> String {
        accept(Node::Expression(expression), self)
    }

    fn pattern(&mut self, pattern: &Pattern) -> String {
        accept(Node::Pattern(pattern), self)
    }

    fn patterns(&mut self, patterns: &[Pattern]) -> String {
        patterns
            .iter()
            .map(|pattern| self.pattern(pattern))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn else_branch(&mut self, branch: &ElseBranch) -> String {
        match branch {
            ElseBranch::Block(block) => self.visit_block(block),
            ElseBranch::If(nested) => self.visit_if(nested),
        }
    }
}

impl<'ast> Visitor<'ast> for Unparser {
    type Output = String;

    fn visit_let(&mut self, declaration: &'ast LetDeclaration) -> String {
        let mut out = String::from("let ");
        if declaration.mutable {
            out.push_str("mut ");
        }
        out.push_str(&declaration.name.name);
        if let Some(ty) = &declaration.type_annotation {
            let _ = write!(out, ": {}", unparse_type(ty));
        }
        if let Some(initializer) = &declaration.initializer {
            let _ = write!(out, " = {}", self.expression(initializer));
        }
        out.push(';');
        out
    }

    fn visit_function(&mut self, declaration: &'ast FunctionDeclaration) -> String {
        let parameters = comma_separated(&declaration.parameters, |parameter| {
            match &parameter.type_annotation {
                Some(ty) => format!("{}: {}", parameter.name.name, unparse_type(ty)),
                None => parameter.name.name.to_string(),
            }
        });
        let mut out = format!("fn {}({parameters})", declaration.name.name);
        if let Some(ty) = &declaration.return_type {
            let _ = write!(out, " -> {}", unparse_type(ty));
        }
        let _ = write!(out, " {}", self.visit_block(&declaration.body));
        out
    }

    fn visit_type_alias(&mut self, declaration: &'ast TypeAliasDeclaration) -> String {
        format!(
            "type {} = {};",
            declaration.name.name,
            unparse_type(&declaration.target)
        )
    }

    fn visit_expression_statement(&mut self, statement: &'ast ExpressionStatement) -> String {
        format!("{};", self.expression(&statement.expression))
    }

    fn visit_if(&mut self, statement: &'ast IfStatement) -> String {
        let mut out = format!(
            "if {} {}",
            self.expression(&statement.condition),
            self.visit_block(&statement.then_branch)
        );
        if let Some(branch) = &statement.else_branch {
            let _ = write!(out, " else {}", self.else_branch(branch));
        }
        out
    }

    fn visit_while(&mut self, statement: &'ast WhileStatement) -> String {
        format!(
            "while {} {}",
            self.expression(&statement.condition),
            self.visit_block(&statement.body)
        )
    }

    fn visit_for(&mut self, statement: &'ast ForStatement) -> String {
        format!(
            "for {} in {} {}",
            statement.binding.name,
            self.expression(&statement.iterable),
            self.visit_block(&statement.body)
        )
    }

    fn visit_return(&mut self, statement: &'ast ReturnStatement) -> String {
        match &statement.value {
            Some(value) => format!("return {};", self.expression(value)),
            None => "return;".to_string(),
        }
    }

    fn visit_break(&mut self, _statement: &'ast BreakStatement) -> String {
        "break;".to_string()
    }

    fn visit_continue(&mut self, _statement: &'ast ContinueStatement) -> String {
        "continue;".to_string()
    }

    fn visit_block(&mut self, block: &'ast Block) -> String {
        if block.declarations.is_empty() {
            return "{}".to_string();
        }
        self.depth += 1;
        let body = self.lines(&block.declarations);
        self.depth -= 1;
        format!("{{\n{body}{}}}", self.indentation())
    }

    fn visit_literal(&mut self, expression: &'ast LiteralExpression) -> String {
        expression.value.to_string()
    }

    fn visit_identifier(&mut self, identifier: &'ast Identifier) -> String {
        identifier.name.to_string()
    }

    fn visit_binary(&mut self, expression: &'ast BinaryExpression) -> String {
        format!(
            "{} {} {}",
            self.expression(&expression.left),
            expression.operator,
            self.expression(&expression.right)
        )
    }

    fn visit_unary(&mut self, expression: &'ast UnaryExpression) -> String {
        format!(
            "{}{}",
            expression.operator.as_str(),
            self.expression(&expression.operand)
        )
    }

    fn visit_assignment(&mut self, expression: &'ast AssignmentExpression) -> String {
        format!(
            "{} {} {}",
            self.expression(&expression.target),
            expression.operator.as_str(),
            self.expression(&expression.value)
        )
    }

    fn visit_call(&mut self, expression: &'ast CallExpression) -> String {
        let callee = self.expression(&expression.callee);
        let arguments = expression
            .arguments
            .iter()
            .map(|argument| self.expression(argument))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{callee}({arguments})")
    }

    fn visit_member(&mut self, expression: &'ast MemberExpression) -> String {
        format!(
            "{}.{}",
            self.expression(&expression.object),
            expression.member.name
        )
    }

    fn visit_index(&mut self, expression: &'ast IndexExpression) -> String {
        format!(
            "{}[{}]",
            self.expression(&expression.object),
            self.expression(&expression.index)
        )
    }

    fn visit_group(&mut self, expression: &'ast GroupExpression) -> String {
        format!("({})", self.expression(&expression.expression))
    }

    fn visit_match(&mut self, expression: &'ast MatchExpression) -> String {
        let scrutinee = self.expression(&expression.scrutinee);
        if expression.arms.is_empty() {
            return format!("match {scrutinee} {{}}");
        }
        let mut out = format!("match {scrutinee} {{\n");
        self.depth += 1;
        for arm in &expression.arms {
            let pattern = self.pattern(&arm.pattern);
            let guard = match &arm.guard {
                Some(guard) => format!(" if {}", self.expression(guard)),
                None => String::new(),
            };
            let body = self.expression(&arm.body);
            let _ = writeln!(out, "{}{pattern}{guard} => {body},", self.indentation());
        }
        self.depth -= 1;
        let _ = write!(out, "{}}}", self.indentation());
        out
    }

    fn visit_wildcard_pattern(&mut self, _pattern: &'ast WildcardPattern) -> String {
        "_".to_string()
    }

    fn visit_literal_pattern(&mut self, pattern: &'ast LiteralPattern) -> String {
        pattern.value.to_string()
    }

    fn visit_binding_pattern(&mut self, pattern: &'ast BindingPattern) -> String {
        pattern.name.name.to_string()
    }

    fn visit_tuple_pattern(&mut self, pattern: &'ast TuplePattern) -> String {
        format!("({})", self.patterns(&pattern.elements))
    }

    fn visit_constructor_pattern(&mut self, pattern: &'ast ConstructorPattern) -> String {
        format!(
            "{}({})",
            pattern.name.name,
            self.patterns(&pattern.arguments)
        )
    }
}
