// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing.
//!
//! Dispatch is on the current token: `if`, `while`, `for`, `return`,
//! `break`, `continue` and `{` start their own statements; anything else is
//! an expression statement.

use crate::ast::{
    BinaryExpression, BinaryOperator, Block, BreakStatement, ContinueStatement, ElseBranch,
    Expression, ExpressionStatement, ForStatement, Identifier, IfStatement, ReturnStatement,
    Statement, WhileStatement,
};
use crate::source_analysis::diagnostic::codes;
use crate::source_analysis::{Diagnostic, TokenKind};

use super::{ParseResult, Parser};

impl Parser {
    /// Parses a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current_kind() {
            TokenKind::If => self.parse_if().map(Statement::If),
            TokenKind::While => self.parse_while().map(Statement::While),
            TokenKind::For => self.parse_for().map(Statement::For),
            TokenKind::Return => Ok(Statement::Return(self.parse_return()?)),
            TokenKind::Break => {
                let keyword = self.stream.advance();
                let end = self.expect_semicolon("'break'");
                Ok(Statement::Break(BreakStatement {
                    span: keyword.span().merge(end),
                }))
            }
            TokenKind::Continue => {
                let keyword = self.stream.advance();
                let end = self.expect_semicolon("'continue'");
                Ok(Statement::Continue(ContinueStatement {
                    span: keyword.span().merge(end),
                }))
            }
            TokenKind::LeftBrace => self.parse_block().map(Statement::Block),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    /// Parses `expr ;`. A `match` expression may omit the `;`.
    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStatement> {
        let expression = self.parse_expression()?;
        let end = if matches!(expression, Expression::Match(_)) && !self.check(TokenKind::Semicolon)
        {
            expression.span()
        } else {
            self.expect_semicolon("expression")
        };
        let span = expression.span().merge(end);
        Ok(ExpressionStatement { expression, span })
    }

    /// Parses `{ declarations }`.
    ///
    /// A block still open at end of input is reported and closed at the last
    /// token, so the declarations inside it are kept.
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.stream.expect(TokenKind::LeftBrace)?;
        self.nested(open.span(), |parser| {
            let declarations = parser.parse_declarations(Some(TokenKind::RightBrace));
            let end = if let Some(close) = parser.stream.try_consume(TokenKind::RightBrace) {
                close.span()
            } else {
                let span = parser.stream.current().span();
                parser.diagnostics.push(
                    Diagnostic::error("expected '}', found end of input", span)
                        .with_code(codes::UNEXPECTED_TOKEN)
                        .with_hint("this block is never closed"),
                );
                parser.previous_span()
            };
            Ok(Block {
                declarations,
                span: open.span().merge(end),
            })
        })
    }

    /// Parses `if cond { ... } (else (if ... | { ... }))?`
    fn parse_if(&mut self) -> ParseResult<IfStatement> {
        let if_token = self.stream.advance();
        let condition = self.parse_condition()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.stream.try_consume(TokenKind::Else).is_some() {
            if self.check(TokenKind::If) {
                let span = self.stream.current().span();
                let nested = self.nested(span, Self::parse_if)?;
                Some(ElseBranch::If(Box::new(nested)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        let end = match &else_branch {
            Some(ElseBranch::If(nested)) => nested.span,
            Some(ElseBranch::Block(block)) => block.span,
            None => then_branch.span,
        };
        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
            span: if_token.span().merge(end),
        })
    }

    /// Parses `while cond { ... }`
    fn parse_while(&mut self) -> ParseResult<WhileStatement> {
        let while_token = self.stream.advance();
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        let span = while_token.span().merge(body.span);
        Ok(WhileStatement {
            condition,
            body,
            span,
        })
    }

    /// Parses `for name in expr { ... }`
    fn parse_for(&mut self) -> ParseResult<ForStatement> {
        let for_token = self.stream.advance();
        let binding = self.expect_identifier("loop variable")?;
        let binding = Identifier::new(binding.text(), binding.span());
        self.stream.expect(TokenKind::In)?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = for_token.span().merge(body.span);
        Ok(ForStatement {
            binding,
            iterable,
            body,
            span,
        })
    }

    /// Parses `return expr? ;`
    fn parse_return(&mut self) -> ParseResult<ReturnStatement> {
        let return_token = self.stream.advance();
        let value = if self.stream.check(&[
            TokenKind::Semicolon,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let end = self.expect_semicolon("return statement");
        Ok(ReturnStatement {
            value,
            span: return_token.span().merge(end),
        })
    }

    /// Parses the condition of `if` or `while`.
    ///
    /// Conditions stop below assignment. A `=` that follows is an error
    /// production: it is reported and parsed as `==`.
    fn parse_condition(&mut self) -> ParseResult<Expression> {
        let span = self.stream.current().span();
        let condition = self.nested(span, Self::parse_logical_or)?;

        let Some(equal) = self.stream.try_consume(TokenKind::Equal) else {
            return Ok(condition);
        };
        self.diagnostics.push(
            Diagnostic::error("found '=' in a condition", equal.span())
                .with_code(codes::ASSIGNMENT_IN_CONDITION)
                .with_hint("use '==' to compare values"),
        );
        let right = self.nested(span, Self::parse_logical_or)?;
        let span = condition.span().merge(right.span());
        Ok(Expression::Binary(BinaryExpression {
            operator: BinaryOperator::Equal,
            left: Box::new(condition),
            right: Box::new(right),
            span,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Declaration, ElseBranch, Expression, Statement};
    use crate::source_analysis::diagnostic::codes;
    use crate::source_analysis::{Diagnostic, parse_source};

    fn parse_statements(source: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
        let output = parse_source(source, None);
        let statements = output
            .declarations
            .into_iter()
            .filter_map(|d| match d {
                Declaration::Statement(stmt) => Some(stmt),
                _ => None,
            })
            .collect();
        (statements, output.diagnostics)
    }

    #[test]
    fn if_else_if_chain() {
        let (statements, diagnostics) =
            parse_statements("if a { x; } else if b { y; } else { z; }");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let Statement::If(stmt) = &statements[0] else {
            panic!("expected if");
        };
        let Some(ElseBranch::If(nested)) = &stmt.else_branch else {
            panic!("expected else if");
        };
        assert!(matches!(nested.else_branch, Some(ElseBranch::Block(_))));
        assert!(stmt.span.contains(nested.span));
    }

    #[test]
    fn while_and_for_loops() {
        let (statements, diagnostics) =
            parse_statements("while i < 10 { i += 1; } for item in items { break; }");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert!(matches!(statements[0], Statement::While(_)));
        let Statement::For(stmt) = &statements[1] else {
            panic!("expected for");
        };
        assert_eq!(stmt.binding.name, "item");
        assert!(matches!(stmt.body.declarations[0], Declaration::Statement(Statement::Break(_))));
    }

    #[test]
    fn return_with_and_without_value() {
        let (statements, diagnostics) = parse_statements("{ return; } { return 1; }");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        for (stmt, has_value) in statements.iter().zip([false, true]) {
            let Statement::Block(block) = stmt else {
                panic!("expected block");
            };
            let Declaration::Statement(Statement::Return(ret)) = &block.declarations[0] else {
                panic!("expected return");
            };
            assert_eq!(ret.value.is_some(), has_value);
        }
    }

    #[test]
    fn return_before_closing_brace_reports_missing_semicolon() {
        let (_, diagnostics) = parse_statements("{ return }");
        let codes: Vec<_> = diagnostics.iter().filter_map(|d| d.code).collect();
        assert_eq!(codes, vec![codes::MISSING_SEMICOLON]);
    }

    #[test]
    fn assignment_in_while_condition() {
        let (statements, diagnostics) = parse_statements("while done = false { }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::ASSIGNMENT_IN_CONDITION));
        assert_eq!(diagnostics[0].span.start().byte_offset(), 11);
        assert!(matches!(statements[0], Statement::While(_)));
    }

    #[test]
    fn match_statement_without_semicolon() {
        let (statements, diagnostics) = parse_statements("match x { _ => 1 } y;");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(statements.len(), 2);
        assert!(matches!(
            &statements[0],
            Statement::Expression(stmt) if matches!(stmt.expression, Expression::Match(_))
        ));
    }

    #[test]
    fn unclosed_block_keeps_contents() {
        let output = parse_source("fn f() { let a = 1;", None);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].message, "expected '}', found end of input");
        let Declaration::Function(function) = &output.declarations[0] else {
            panic!("expected function");
        };
        assert_eq!(function.body.declarations.len(), 1);
        assert_eq!(function.body.span.end().byte_offset(), 19);
    }

    #[test]
    fn expression_statement_span_includes_semicolon() {
        let (statements, _) = parse_statements("f(x);");
        assert_eq!(statements[0].span().end().byte_offset(), 5);
    }
}
