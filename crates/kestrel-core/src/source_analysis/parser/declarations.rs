// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing: `let`, `fn`, `type`, and type expressions.

use crate::ast::{
    Declaration, FunctionDeclaration, Identifier, LetDeclaration, Parameter, TypeAliasDeclaration,
    TypeExpr,
};
use crate::source_analysis::diagnostic::codes;
use crate::source_analysis::{Diagnostic, TokenKind};

use super::{ParseResult, Parser};

impl Parser {
    /// Parses a declaration, falling through to a statement.
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        match self.current_kind() {
            TokenKind::Let => self.parse_let().map(Declaration::Let),
            TokenKind::Fn => self.parse_function().map(Declaration::Function),
            TokenKind::Type => self.parse_type_alias().map(Declaration::TypeAlias),
            _ => self.parse_statement().map(Declaration::Statement),
        }
    }

    /// Parses `let mut? name (: Type)? (= expr)? ;`
    fn parse_let(&mut self) -> ParseResult<LetDeclaration> {
        let let_token = self.stream.advance();
        let mutable = self.stream.try_consume(TokenKind::Mut).is_some();
        let name = self.expect_identifier("variable name")?;
        let name = Identifier::new(name.text(), name.span());

        let type_annotation = if self.stream.try_consume(TokenKind::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };

        let initializer = if self.stream.try_consume(TokenKind::Equal).is_some() {
            Some(self.parse_expression()?)
        } else if self.check(TokenKind::Semicolon) {
            None
        } else {
            self.parse_initializer_missing_equals()
        };

        let end = self.expect_semicolon("variable declaration");
        Ok(LetDeclaration {
            name,
            mutable,
            type_annotation,
            initializer,
            span: let_token.span().merge(end),
        })
    }

    /// Error production for `let x 5;`.
    ///
    /// If an expression followed by `;` parses where `=` was expected, the
    /// missing `=` is reported and the expression kept as the initializer.
    /// Otherwise nothing is consumed.
    fn parse_initializer_missing_equals(&mut self) -> Option<crate::ast::Expression> {
        let span = self.span_after_previous();
        let initializer = self.speculate(|parser| {
            let expression = parser.parse_expression()?;
            if parser.check(TokenKind::Semicolon) {
                Ok(expression)
            } else {
                Err(parser.unexpected("';'"))
            }
        })?;
        self.diagnostics.push(
            Diagnostic::error("expected '=' before the initializer", span)
                .with_code(codes::MISSING_EQUALS)
                .with_hint("write `let name = value;`"),
        );
        Some(initializer)
    }

    /// Parses `fn name(params) (-> Type)? { body }`
    fn parse_function(&mut self) -> ParseResult<FunctionDeclaration> {
        let fn_token = self.stream.advance();
        let name = self.expect_identifier("function name")?;
        let name = Identifier::new(name.text(), name.span());

        self.stream.expect(TokenKind::LeftParen)?;
        let mut parameters = Vec::new();
        while !self.check(TokenKind::RightParen) {
            parameters.push(self.parse_parameter()?);
            if self.stream.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.stream.expect(TokenKind::RightParen)?;

        let return_type = if self.stream.try_consume(TokenKind::Arrow).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = fn_token.span().merge(body.span);
        Ok(FunctionDeclaration {
            name,
            parameters,
            return_type,
            body,
            span,
        })
    }

    /// Parses `name (: Type)?`
    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.expect_identifier("parameter name")?;
        let name = Identifier::new(name.text(), name.span());
        let type_annotation = if self.stream.try_consume(TokenKind::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let span = type_annotation
            .as_ref()
            .map_or(name.span, |ty| name.span.merge(ty.span()));
        Ok(Parameter {
            name,
            type_annotation,
            span,
        })
    }

    /// Parses `type Name = Type;`
    fn parse_type_alias(&mut self) -> ParseResult<TypeAliasDeclaration> {
        let type_token = self.stream.advance();
        let name = self.expect_identifier("type name")?;
        let name = Identifier::new(name.text(), name.span());
        self.stream.expect(TokenKind::Equal)?;
        let target = self.parse_type()?;
        let end = self.expect_semicolon("type alias");
        Ok(TypeAliasDeclaration {
            name,
            target,
            span: type_token.span().merge(end),
        })
    }

    /// Parses a type expression.
    pub(super) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        let span = self.stream.current().span();
        self.nested(span, |parser| match parser.current_kind() {
            TokenKind::Identifier => parser.parse_named_type(),
            TokenKind::LeftParen => {
                let open = parser.stream.advance();
                let elements = parser.parse_type_list(TokenKind::RightParen)?;
                let close = parser.stream.expect(TokenKind::RightParen)?;
                Ok(TypeExpr::Tuple {
                    elements,
                    span: open.span().merge(close.span()),
                })
            }
            TokenKind::Fn => {
                let fn_token = parser.stream.advance();
                parser.stream.expect(TokenKind::LeftParen)?;
                let parameters = parser.parse_type_list(TokenKind::RightParen)?;
                parser.stream.expect(TokenKind::RightParen)?;
                parser.stream.expect(TokenKind::Arrow)?;
                let result = parser.parse_type()?;
                let span = fn_token.span().merge(result.span());
                Ok(TypeExpr::Function {
                    parameters,
                    result: Box::new(result),
                    span,
                })
            }
            _ => Err(parser.unexpected("type")),
        })
    }

    /// Parses `Name` or `Name<Arg, ...>`.
    fn parse_named_type(&mut self) -> ParseResult<TypeExpr> {
        let name = self.stream.advance();
        let name = Identifier::new(name.text(), name.span());
        if self.stream.try_consume(TokenKind::Less).is_none() {
            let span = name.span;
            return Ok(TypeExpr::Named {
                name,
                arguments: Vec::new(),
                span,
            });
        }
        let arguments = self.parse_type_list(TokenKind::Greater)?;
        let close = self.stream.expect(TokenKind::Greater)?;
        let span = name.span.merge(close.span());
        Ok(TypeExpr::Named {
            name,
            arguments,
            span,
        })
    }

    /// Parses comma-separated types up to (not including) `close`.
    fn parse_type_list(&mut self, close: TokenKind) -> ParseResult<Vec<TypeExpr>> {
        let mut types = Vec::new();
        while !self.check(close) {
            types.push(self.parse_type()?);
            if self.stream.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(types)
    }
}
