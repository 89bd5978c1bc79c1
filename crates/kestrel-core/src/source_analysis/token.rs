// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for the Kestrel lexer.
//!
//! A [`Token`] pairs a [`TokenKind`] with its lexeme, its [`Span`], and, for
//! literals, the value parsed eagerly by the lexer so later passes never
//! re-parse numeric text.

use std::fmt;

use ecow::EcoString;

use super::Span;

/// The kind of a token.
///
/// The set is closed: literals, identifiers, the fixed keyword set,
/// operators, delimiters, and two sentinels ([`TokenKind::Eof`] and
/// [`TokenKind::Error`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// Integer literal: `42`
    Integer,
    /// Floating-point literal: `3.14`
    Float,
    /// String literal: `"hello"`
    String,

    /// Identifier: `foo`, `_bar`, `x1`
    Identifier,

    // === Keywords ===
    Let,
    Mut,
    Fn,
    Type,
    If,
    Else,
    While,
    For,
    In,
    Return,
    Break,
    Continue,
    Match,
    True,
    False,

    // === Operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `->`
    Arrow,
    /// `=>`
    FatArrow,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,

    // === Delimiters ===
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // === Sentinels ===
    /// End of input. Always the last token, zero-width.
    Eof,
    /// Lexical error. The accompanying diagnostic explains it.
    Error,
}

/// Spelling-to-kind table for reserved words.
///
/// Immutable and shared by every lexer instance.
pub const KEYWORDS: [(&str, TokenKind); 15] = [
    ("let", TokenKind::Let),
    ("mut", TokenKind::Mut),
    ("fn", TokenKind::Fn),
    ("type", TokenKind::Type),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("match", TokenKind::Match),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
];

impl TokenKind {
    /// Looks up a reserved word.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find_map(|&(spelling, kind)| (spelling == text).then_some(kind))
    }

    /// Returns true if this is the end-of-input sentinel.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns true if this is a lexical error token.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns true if this is a literal.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::String | Self::True | Self::False
        )
    }

    /// Returns true if this is a reserved word.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Let
                | Self::Mut
                | Self::Fn
                | Self::Type
                | Self::If
                | Self::Else
                | Self::While
                | Self::For
                | Self::In
                | Self::Return
                | Self::Break
                | Self::Continue
                | Self::Match
                | Self::True
                | Self::False
        )
    }

    /// Returns a human-readable description for error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Integer => "integer literal",
            Self::Float => "float literal",
            Self::String => "string literal",
            Self::Identifier => "identifier",
            Self::Let => "'let'",
            Self::Mut => "'mut'",
            Self::Fn => "'fn'",
            Self::Type => "'type'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::For => "'for'",
            Self::In => "'in'",
            Self::Return => "'return'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Match => "'match'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Bang => "'!'",
            Self::Equal => "'='",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::AmpAmp => "'&&'",
            Self::PipePipe => "'||'",
            Self::PlusEqual => "'+='",
            Self::MinusEqual => "'-='",
            Self::StarEqual => "'*='",
            Self::SlashEqual => "'/='",
            Self::Arrow => "'->'",
            Self::FatArrow => "'=>'",
            Self::Dot => "'.'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Eof => "end of input",
            Self::Error => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The value of a literal token, parsed by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    /// Raw string contents between the quotes; escapes are not interpreted.
    String(EcoString),
}

/// A token with its kind, lexeme, source location and literal value.
///
/// Tokens are immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    text: EcoString,
    span: Span,
    literal: Option<LiteralValue>,
}

impl Token {
    /// Creates a new token without a literal value.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<EcoString>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            literal: None,
        }
    }

    /// Creates a literal token carrying its parsed value.
    #[must_use]
    pub fn with_literal(
        kind: TokenKind,
        text: impl Into<EcoString>,
        span: Span,
        literal: LiteralValue,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            literal: Some(literal),
        }
    }

    /// Creates an end-of-input token at the given span.
    #[must_use]
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the lexeme this token was matched from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the parsed literal value, if this is a literal token.
    #[must_use]
    pub const fn literal(&self) -> Option<&LiteralValue> {
        self.literal.as_ref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::Identifier | TokenKind::Error => write!(f, "'{}'", self.text),
            TokenKind::Integer | TokenKind::Float | TokenKind::String => f.write_str(&self.text),
            kind => f.write_str(kind.describe()),
        }
    }
}
