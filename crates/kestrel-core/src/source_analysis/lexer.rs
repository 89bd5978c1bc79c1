// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Kestrel source code.
//!
//! This module converts source text into a flat sequence of [`Token`]s. The
//! lexer is hand-written, single pass and never backtracks.
//!
//! # Design Principles
//!
//! - **Error recovery**: Never panic on malformed input; emit [`TokenKind::Error`]
//!   plus one diagnostic and keep going
//! - **Maximal munch**: Two-character operators win over their one-character prefixes
//! - **Precise spans**: Every token carries its exact source location
//!
//! # Example
//!
//! ```
//! use kestrel_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x + 1", None).collect();
//! assert_eq!(tokens.len(), 3); // x, +, 1 (EOF excluded from iterator)
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use tracing::{debug, instrument, trace};

use super::{
    Diagnostic, FileId, LexError, LexErrorKind, LiteralValue, Position, Span, Token, TokenKind,
};

/// A lexer that tokenizes Kestrel source code.
///
/// It implements [`Iterator`] for easy consumption; the iterator stops before
/// the end-of-input token. Use [`tokenize`] to get the full token list
/// together with diagnostics.
///
/// # Error Recovery
///
/// The lexer never fails completely. Unknown characters, unterminated strings
/// and unterminated block comments produce [`TokenKind::Error`] tokens and
/// record a [`LexError`], allowing parsing to continue.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column, in characters.
    column: u32,
    file_id: Option<FileId>,
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str, file_id: Option<FileId>) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            file_id,
            errors: Vec::new(),
        }
    }

    /// Returns the lexical errors found so far.
    #[must_use]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Consumes the lexer, returning the lexical errors it recorded.
    #[must_use]
    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is same as `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> Position {
        Position::new(self.position as u32, self.line, self.column)
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.current_position()).with_file(self.file_id)
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Records a lexical error and returns the error token covering it.
    fn error_token(&mut self, kind: LexErrorKind, start: Position) -> Token {
        let span = self.span_from(start);
        trace!(%span, error = %kind, "lexical error");
        self.errors.push(LexError::new(kind, span));
        Token::new(TokenKind::Error, self.text_for(span), span)
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error token if a block comment runs off the end of input.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.advance_while(char::is_whitespace);
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.advance_while(|c| c != '\n');
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    if let Some(error) = self.skip_block_comment() {
                        return Some(error);
                    }
                }
                _ => return None,
            }
        }
    }

    /// Skips a block comment: `/* ... */`. Block comments nest.
    fn skip_block_comment(&mut self) -> Option<Token> {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // *

        let mut depth = 1usize;
        while depth > 0 {
            match self.peek_char() {
                None => {
                    return Some(self.error_token(LexErrorKind::UnterminatedComment, start));
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        None
    }

    /// Lexes the next token. Returns an EOF token at end of input, repeatedly.
    fn lex_token(&mut self) -> Token {
        if let Some(error) = self.skip_trivia() {
            return error;
        }

        let start = self.current_position();
        match self.peek_char() {
            None => Token::eof(Span::point(start).with_file(self.file_id)),
            Some(c) => self.lex_token_at(c, start),
        }
    }

    /// Lexes a token based on its first character.
    fn lex_token_at(&mut self, c: char, start: Position) -> Token {
        let kind = match c {
            'a'..='z' | 'A'..='Z' | '_' => return self.lex_identifier_or_keyword(start),
            '0'..='9' => return self.lex_number(start),
            '"' => return self.lex_string(start),

            '+' => self.lex_operator(TokenKind::Plus, &[('=', TokenKind::PlusEqual)]),
            '-' => self.lex_operator(
                TokenKind::Minus,
                &[('>', TokenKind::Arrow), ('=', TokenKind::MinusEqual)],
            ),
            '*' => self.lex_operator(TokenKind::Star, &[('=', TokenKind::StarEqual)]),
            '/' => self.lex_operator(TokenKind::Slash, &[('=', TokenKind::SlashEqual)]),
            '%' => self.lex_operator(TokenKind::Percent, &[]),
            '!' => self.lex_operator(TokenKind::Bang, &[('=', TokenKind::BangEqual)]),
            '=' => self.lex_operator(
                TokenKind::Equal,
                &[('=', TokenKind::EqualEqual), ('>', TokenKind::FatArrow)],
            ),
            '<' => self.lex_operator(TokenKind::Less, &[('=', TokenKind::LessEqual)]),
            '>' => self.lex_operator(TokenKind::Greater, &[('=', TokenKind::GreaterEqual)]),
            '&' if self.peek_char_n(1) == Some('&') => self.lex_pair(TokenKind::AmpAmp),
            '|' if self.peek_char_n(1) == Some('|') => self.lex_pair(TokenKind::PipePipe),
            '.' => self.lex_operator(TokenKind::Dot, &[]),
            ',' => self.lex_operator(TokenKind::Comma, &[]),
            ':' => self.lex_operator(TokenKind::Colon, &[]),
            ';' => self.lex_operator(TokenKind::Semicolon, &[]),
            '(' => self.lex_operator(TokenKind::LeftParen, &[]),
            ')' => self.lex_operator(TokenKind::RightParen, &[]),
            '{' => self.lex_operator(TokenKind::LeftBrace, &[]),
            '}' => self.lex_operator(TokenKind::RightBrace, &[]),
            '[' => self.lex_operator(TokenKind::LeftBracket, &[]),
            ']' => self.lex_operator(TokenKind::RightBracket, &[]),

            // Anything else is one unexpected character
            _ => {
                self.advance();
                return self.error_token(LexErrorKind::UnexpectedCharacter(c), start);
            }
        };

        let span = self.span_from(start);
        Token::new(kind, self.text_for(span), span)
    }

    /// Consumes a one-character operator, extending it to two characters when
    /// the next character matches one of `longer`.
    fn lex_operator(&mut self, single: TokenKind, longer: &[(char, TokenKind)]) -> TokenKind {
        self.advance();
        let Some(next) = self.peek_char() else {
            return single;
        };
        match longer.iter().find(|&&(c, _)| c == next) {
            Some(&(_, kind)) => {
                self.advance();
                kind
            }
            None => single,
        }
    }

    /// Consumes a two-character operator whose characters have been checked.
    fn lex_pair(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        self.advance();
        kind
    }

    /// Lexes an identifier or reserved word.
    fn lex_identifier_or_keyword(&mut self, start: Position) -> Token {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let span = self.span_from(start);
        let text = self.text_for(span);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, span)
    }

    /// Lexes an integer or float literal, parsing its value.
    ///
    /// A `.` only starts a fraction when a digit follows, so `1.foo` lexes
    /// as `1`, `.`, `foo`.
    fn lex_number(&mut self, start: Position) -> Token {
        self.advance_while(|c| c.is_ascii_digit());

        let is_float = self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        let span = self.span_from(start);
        let text = self.text_for(span);
        if is_float {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    Token::with_literal(TokenKind::Float, text, span, LiteralValue::Float(value))
                }
                _ => self.error_token(LexErrorKind::InvalidFloat, start),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::with_literal(
                    TokenKind::Integer,
                    text,
                    span,
                    LiteralValue::Integer(value),
                ),
                Err(_) => self.error_token(LexErrorKind::IntegerOutOfRange, start),
            }
        }
    }

    /// Lexes a double-quoted string literal.
    ///
    /// A backslash consumes the following character unconditionally; escapes
    /// are interpreted later, by the parser.
    fn lex_string(&mut self, start: Position) -> Token {
        self.advance(); // opening quote

        loop {
            match self.advance() {
                None => return self.error_token(LexErrorKind::UnterminatedString, start),
                Some('\\') => {
                    self.advance();
                }
                Some('"') => break,
                Some(_) => {}
            }
        }

        let span = self.span_from(start);
        let text = self.text_for(span);
        let contents = &text[1..text.len() - 1];
        Token::with_literal(
            TokenKind::String,
            text,
            span,
            LiteralValue::String(contents.into()),
        )
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lex_token();
        if token.kind().is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Tokenizes `source`, returning every token (terminated by exactly one
/// end-of-input token) and one diagnostic per lexical error.
#[must_use]
#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn tokenize(source: &str, file_id: Option<FileId>) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(source, file_id);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    let diagnostics: Vec<Diagnostic> = lexer.into_errors().into_iter().map(Into::into).collect();
    debug!(
        tokens = tokens.len(),
        errors = diagnostics.len(),
        "tokenized source"
    );
    (tokens, diagnostics)
}

/// Convenience function to lex source into a vector of tokens (excluding EOF).
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source, None).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Severity;
    use crate::source_analysis::diagnostic::codes;

    /// Helper to lex and extract just the token kinds.
    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(Token::kind).collect()
    }

    #[test]
    fn lex_empty() {
        assert!(lex("").is_empty());
        assert!(lex("   \n\t").is_empty());
        assert!(lex("// comment").is_empty());
        assert!(lex("/* block */").is_empty());
    }

    #[test]
    fn tokenize_always_ends_with_one_eof() {
        for source in ["", "x", "let x = 5;", "\"open", "/* open"] {
            let (tokens, _) = tokenize(source, None);
            let eofs = tokens.iter().filter(|t| t.kind().is_eof()).count();
            assert_eq!(eofs, 1, "source: {source:?}");
            assert!(tokens.last().is_some_and(|t| t.kind().is_eof()));
        }
    }

    #[test]
    fn eof_span_is_zero_width_at_end() {
        let (tokens, _) = tokenize("ab\ncd", None);
        let eof = tokens.last().map(Token::span);
        let eof = eof.unwrap_or_default();
        assert!(eof.is_empty());
        assert_eq!(eof.start().byte_offset(), 5);
        assert_eq!(eof.start().line(), 2);
        assert_eq!(eof.start().column(), 3);
    }

    #[test]
    fn lex_identifiers() {
        let tokens = lex("foo bar Baz _private x1");
        let texts: Vec<_> = tokens.iter().map(Token::text).collect();
        assert_eq!(texts, vec!["foo", "bar", "Baz", "_private", "x1"]);
        assert!(tokens.iter().all(|t| t.kind() == TokenKind::Identifier));
    }

    #[test]
    fn lex_keywords() {
        assert_eq!(
            lex_kinds("let mut fn type if else while for in return break continue match true false"),
            vec![
                TokenKind::Let,
                TokenKind::Mut,
                TokenKind::Fn,
                TokenKind::Type,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::In,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Match,
                TokenKind::True,
                TokenKind::False,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        assert_eq!(lex_kinds("letter iffy"), vec![TokenKind::Identifier; 2]);
    }

    #[test]
    fn lex_integers_and_floats() {
        let tokens = lex("42 3.25 0");
        assert_eq!(tokens[0].kind(), TokenKind::Integer);
        assert_eq!(tokens[0].literal(), Some(&LiteralValue::Integer(42)));
        assert_eq!(tokens[1].kind(), TokenKind::Float);
        assert_eq!(tokens[1].literal(), Some(&LiteralValue::Float(3.25)));
        assert_eq!(tokens[2].literal(), Some(&LiteralValue::Integer(0)));
    }

    #[test]
    fn dot_after_integer_without_digit_is_member_access() {
        assert_eq!(
            lex_kinds("1.foo"),
            vec![TokenKind::Integer, TokenKind::Dot, TokenKind::Identifier]
        );
    }

    #[test]
    fn integer_overflow_is_error_token() {
        let (tokens, diagnostics) = tokenize("99999999999999999999", None);
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::INVALID_NUMBER));
    }

    #[test]
    fn lex_maximal_munch_operators() {
        assert_eq!(
            lex_kinds("== != <= >= && || -> => += -= *= /="),
            vec![
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Arrow,
                TokenKind::FatArrow,
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
            ]
        );
    }

    #[test]
    fn lex_single_character_tokens() {
        assert_eq!(
            lex_kinds("+ - * / % ! = < > . , : ; ( ) { } [ ]"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Bang,
                TokenKind::Equal,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
            ]
        );
    }

    #[test]
    fn adjacent_operators_without_spaces() {
        assert_eq!(
            lex_kinds("a==-b"),
            vec![
                TokenKind::Identifier,
                TokenKind::EqualEqual,
                TokenKind::Minus,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn logical_operators_take_exactly_two_characters() {
        let (tokens, _) = tokenize("a&&&b|||c", None);
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::AmpAmp,
                TokenKind::Error,
                TokenKind::Identifier,
                TokenKind::PipePipe,
                TokenKind::Error,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text(), "&&");
        assert_eq!(tokens[4].span().start().column(), 6);
    }

    #[test]
    fn lone_ampersand_and_pipe_are_errors() {
        let (tokens, diagnostics) = tokenize("a & b | c", None);
        let errors = tokens.iter().filter(|t| t.kind().is_error()).count();
        assert_eq!(errors, 2);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn lex_strings() {
        let tokens = lex(r#""hello" "a\"b""#);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].text(), "\"hello\"");
        assert_eq!(tokens[0].literal(), Some(&LiteralValue::String("hello".into())));
        // Escapes stay uninterpreted at this stage
        assert_eq!(tokens[1].literal(), Some(&LiteralValue::String(r#"a\"b"#.into())));
    }

    #[test]
    fn unterminated_string_spans_to_end_of_input() {
        let source = "\"unterminated";
        let (tokens, diagnostics) = tokenize(source, None);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(tokens[0].span().start().byte_offset(), 0);
        assert_eq!(tokens[0].span().end().byte_offset() as usize, source.len());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].code, Some(codes::UNTERMINATED_STRING));
    }

    #[test]
    fn string_ending_in_backslash_is_unterminated() {
        let (tokens, diagnostics) = tokenize("\"abc\\", None);
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn nested_block_comments() {
        assert_eq!(
            lex_kinds("a /* outer /* inner */ still comment */ b"),
            vec![TokenKind::Identifier, TokenKind::Identifier]
        );
    }

    #[test]
    fn unterminated_block_comment() {
        let (tokens, diagnostics) = tokenize("x /* open /* nested */", None);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind(), TokenKind::Error);
        assert_eq!(tokens[1].text(), "/* open /* nested */");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::UNTERMINATED_COMMENT));
    }

    #[test]
    fn unexpected_character_advances_one_character() {
        let (tokens, diagnostics) = tokenize("a @# b", None);
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Error,
                TokenKind::Error,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].span().len(), 1);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "unexpected character '@'");
    }

    #[test]
    fn non_ascii_character_is_one_error_token() {
        let (tokens, diagnostics) = tokenize("é", None);
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(tokens[0].span().len(), 2);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let (tokens, _) = tokenize("let x\n  = 5;", None);
        let equals = &tokens[2];
        assert_eq!(equals.kind(), TokenKind::Equal);
        assert_eq!(equals.span().start().line(), 2);
        assert_eq!(equals.span().start().column(), 3);
        assert_eq!(equals.span().start().byte_offset(), 8);
    }

    #[test]
    fn file_id_is_attached_to_spans() {
        let (tokens, diagnostics) = tokenize("x @", Some(FileId(7)));
        assert!(tokens.iter().all(|t| t.span().file_id() == Some(FileId(7))));
        assert_eq!(diagnostics[0].span.file_id(), Some(FileId(7)));
    }

    #[test]
    fn relex_is_identical() {
        let source = "fn f(a: int) -> int { return a * 2; } /* c */ \"s\" @";
        assert_eq!(tokenize(source, None), tokenize(source, None));
    }
}
