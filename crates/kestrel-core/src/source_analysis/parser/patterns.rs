// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `match` expressions and patterns.

use crate::ast::{
    BindingPattern, ConstructorPattern, Identifier, Literal, LiteralPattern, MatchArm,
    MatchExpression, Pattern, TuplePattern, WildcardPattern,
};
use crate::source_analysis::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    /// Parses `match expr { arm, ... }`. A trailing comma is allowed.
    pub(super) fn parse_match(&mut self) -> ParseResult<MatchExpression> {
        let match_token = self.stream.advance();
        let scrutinee = self.parse_expression()?;
        self.stream.expect(TokenKind::LeftBrace)?;

        let mut arms = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            arms.push(self.parse_match_arm()?);
            if self.stream.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        let close = self.stream.expect(TokenKind::RightBrace)?;

        Ok(MatchExpression {
            scrutinee: Box::new(scrutinee),
            arms,
            span: match_token.span().merge(close.span()),
        })
    }

    /// Parses `pattern (if guard)? => body`
    fn parse_match_arm(&mut self) -> ParseResult<MatchArm> {
        let pattern = self.parse_pattern()?;
        let guard = if self.stream.try_consume(TokenKind::If).is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.stream.expect(TokenKind::FatArrow)?;
        let body = self.parse_expression()?;
        let span = pattern.span().merge(body.span());
        Ok(MatchArm {
            pattern,
            guard,
            body,
            span,
        })
    }

    /// Parses a pattern.
    pub(super) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        let span = self.stream.current().span();
        self.nested(span, |parser| match parser.current_kind() {
            TokenKind::Identifier if parser.stream.current().text() == "_" => {
                let token = parser.stream.advance();
                Ok(Pattern::Wildcard(WildcardPattern { span: token.span() }))
            }
            TokenKind::Identifier => {
                let token = parser.stream.advance();
                let name = Identifier::new(token.text(), token.span());
                if parser.stream.try_consume(TokenKind::LeftParen).is_none() {
                    return Ok(Pattern::Binding(BindingPattern { name }));
                }
                let arguments = parser.parse_pattern_list()?;
                let close = parser.stream.expect(TokenKind::RightParen)?;
                let span = name.span.merge(close.span());
                Ok(Pattern::Constructor(ConstructorPattern {
                    name,
                    arguments,
                    span,
                }))
            }
            TokenKind::LeftParen => {
                let open = parser.stream.advance();
                let elements = parser.parse_pattern_list()?;
                let close = parser.stream.expect(TokenKind::RightParen)?;
                Ok(Pattern::Tuple(TuplePattern {
                    elements,
                    span: open.span().merge(close.span()),
                }))
            }
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                let token = parser.stream.advance();
                let value = parser.literal_value(&token)?;
                Ok(Pattern::Literal(LiteralPattern {
                    value,
                    span: token.span(),
                }))
            }
            TokenKind::True | TokenKind::False => {
                let token = parser.stream.advance();
                Ok(Pattern::Literal(LiteralPattern {
                    value: Literal::Boolean(token.kind() == TokenKind::True),
                    span: token.span(),
                }))
            }
            TokenKind::Minus
                if matches!(parser.stream.peek(1).kind(), TokenKind::Integer | TokenKind::Float) =>
            {
                let minus = parser.stream.advance();
                let token = parser.stream.advance();
                let value = match parser.literal_value(&token)? {
                    Literal::Integer(value) => Literal::Integer(-value),
                    Literal::Float(value) => Literal::Float(-value),
                    other => other,
                };
                Ok(Pattern::Literal(LiteralPattern {
                    value,
                    span: minus.span().merge(token.span()),
                }))
            }
            _ => Err(parser.unexpected("pattern")),
        })
    }

    /// Parses comma-separated patterns up to (not including) `)`.
    fn parse_pattern_list(&mut self) -> ParseResult<Vec<Pattern>> {
        let mut patterns = Vec::new();
        while !self.check(TokenKind::RightParen) {
            patterns.push(self.parse_pattern()?);
            if self.stream.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(patterns)
    }
}
