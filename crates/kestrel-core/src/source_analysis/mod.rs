// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Kestrel source code.
//!
//! This module contains source locations, diagnostics, the lexer, the token
//! stream and the parser.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into [`Token`]s. Each token carries its
//! source location via [`Span`] (byte offsets plus 1-based line and column).
//!
//! ```
//! use kestrel_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1", None).collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1
//! assert_eq!(tokens[1].kind(), TokenKind::Plus);
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a list of
//! [`Declaration`](crate::ast::Declaration)s. Binary operator precedence is
//! resolved by precedence climbing (see the `parser` module for details).
//!
//! # Error Handling
//!
//! Neither stage stops at the first problem. The lexer turns invalid input
//! into [`TokenKind::Error`] tokens and records a [`LexError`] for each; the
//! parser recovers from syntax errors and keeps going. Both report problems
//! as [`Diagnostic`]s returned alongside their output.

pub mod diagnostic;
mod error;
mod lexer;
mod parser;
mod span;
mod token;
mod token_stream;

#[cfg(test)]
mod lexer_property_tests;

pub use diagnostic::{Diagnostic, DiagnosticLocation, Severity, codes, has_errors};
pub use error::{LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use lexer::{Lexer, lex, tokenize};
pub use parser::{ParseOutput, parse, parse_source};
pub use span::{FileId, Position, Span};
pub use token::{KEYWORDS, LiteralValue, Token, TokenKind};
pub use token_stream::TokenStream;
