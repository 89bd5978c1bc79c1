// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A cursor over a token sequence.
//!
//! [`TokenStream`] gives the parser bounded lookahead, typed `expect`
//! operations, and speculative parsing through a stack of marks:
//!
//! ```
//! use kestrel_core::source_analysis::{TokenKind, TokenStream, tokenize};
//!
//! let (tokens, _) = tokenize("a ( b", None);
//! let mut stream = TokenStream::new(tokens);
//! stream.mark();
//! stream.advance();
//! assert!(stream.try_consume(TokenKind::LeftParen).is_some());
//! stream.reset(); // back to `a`
//! assert_eq!(stream.current().text(), "a");
//! ```

use super::{ParseError, ParseErrorKind, Span, Token, TokenKind};

/// Cursor state over the lexer's output.
///
/// The stream always ends with an end-of-input token, so lookahead past the
/// end is well defined.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    marks: Vec<usize>,
}

impl TokenStream {
    /// Creates a stream over `tokens`.
    ///
    /// An end-of-input token is appended if the sequence does not already end
    /// with one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let end = tokens
                .last()
                .map_or_else(Span::default, |t| Span::point(t.span().end()).with_file(t.span().file_id()));
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            position: 0,
            marks: Vec::new(),
        }
    }

    /// Returns the current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the token `k` positions ahead of the cursor, or the
    /// end-of-input token when that runs past the end.
    #[must_use]
    pub fn peek(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.saturating_add(k).min(last)]
    }

    /// Returns the most recently consumed token, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// Returns the cursor's index into the token sequence.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns true once the cursor rests on the end-of-input token.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current().kind().is_eof()
    }

    /// Consumes and returns the current token.
    ///
    /// At end of input this returns the end-of-input token without moving.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Returns true if the current token is one of `kinds`.
    #[must_use]
    pub fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind())
    }

    /// Consumes the current token if it has the given kind.
    pub fn try_consume(&mut self, kind: TokenKind) -> Option<Token> {
        (self.current().kind() == kind).then(|| self.advance())
    }

    /// Consumes a token of the given kind or fails with a [`ParseError`]
    /// located at the current token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.try_consume(kind).ok_or_else(|| {
            let found = self.current();
            ParseError::new(
                ParseErrorKind::expected_kind(kind, found.to_string()),
                found.span(),
            )
        })
    }

    /// Pushes the current position onto the mark stack.
    pub fn mark(&mut self) {
        self.marks.push(self.position);
    }

    /// Pops the most recent mark and restores the cursor to it.
    ///
    /// Does nothing if no mark is active.
    pub fn reset(&mut self) {
        if let Some(position) = self.marks.pop() {
            self.position = position;
        }
    }

    /// Pops the most recent mark, keeping the current position.
    pub fn commit(&mut self) {
        self.marks.pop();
    }

    /// Returns the number of active marks.
    #[must_use]
    pub fn mark_depth(&self) -> usize {
        self.marks.len()
    }
}
