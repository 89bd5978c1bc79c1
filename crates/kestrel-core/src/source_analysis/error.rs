// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Kestrel front end.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! Lexical errors integrate with [`miette`] directly; parse errors are
//! lightweight values raised inside the parser and turned into
//! [`Diagnostic`]s at the declaration loop.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::diagnostic::codes;
use super::{Diagnostic, Span, TokenKind};

/// A lexical error encountered during tokenization.
///
/// The lexer recovers from every lexical error, so these never stop
/// tokenization. Each one becomes an error token plus a [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the stable diagnostic code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(_) => codes::UNEXPECTED_CHARACTER,
            LexErrorKind::UnterminatedString => codes::UNTERMINATED_STRING,
            LexErrorKind::UnterminatedComment => codes::UNTERMINATED_COMMENT,
            LexErrorKind::IntegerOutOfRange | LexErrorKind::InvalidFloat => codes::INVALID_NUMBER,
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        let code = error.code();
        Diagnostic::error(error.kind.to_string(), error.span).with_code(code)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A string literal was not terminated.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A block comment was not terminated.
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// An integer literal does not fit in 64 bits.
    #[error("integer literal is too large")]
    IntegerOutOfRange,

    /// A float literal that cannot be represented.
    #[error("invalid float literal")]
    InvalidFloat,
}

/// A syntax error raised inside the parser.
///
/// Never escapes [`parse`](super::parse): the declaration loop records it as
/// a [`Diagnostic`] and resynchronizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "expected X, found Y" error.
    #[must_use]
    pub fn expected(expected: impl Into<EcoString>, found: impl Into<EcoString>, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::Expected { .. } => codes::UNEXPECTED_TOKEN,
            ParseErrorKind::InvalidAssignmentTarget => codes::INVALID_ASSIGNMENT_TARGET,
            ParseErrorKind::NestingTooDeep { .. } => codes::NESTING_TOO_DEEP,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        let code = error.code();
        let diagnostic = Diagnostic::error(error.kind.to_string(), error.span).with_code(code);
        match error.kind {
            ParseErrorKind::InvalidAssignmentTarget => diagnostic
                .with_hint("only variables, fields and index expressions can be assigned to"),
            _ => diagnostic,
        }
    }
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The current token does not fit the grammar here.
    #[error("expected {expected}, found {found}")]
    Expected { expected: EcoString, found: EcoString },

    /// The left-hand side of an assignment is not assignable.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    /// Expressions or blocks are nested beyond the parser's limit.
    #[error("nesting is too deep (maximum {limit} levels)")]
    NestingTooDeep { limit: usize },
}

impl ParseErrorKind {
    /// Creates an [`Expected`](Self::Expected) kind for a missing token kind.
    #[must_use]
    pub fn expected_kind(expected: TokenKind, found: impl Into<EcoString>) -> Self {
        Self::Expected {
            expected: expected.describe().into(),
            found: found.into(),
        }
    }
}
