// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parser for Kestrel source code.
//!
//! This module transforms a token sequence into an Abstract Syntax Tree.
//! The parser is hand-written recursive descent: each grammar production is
//! one method. Binary operators are resolved by precedence climbing, a chain
//! of methods from lowest to highest binding power (see `expressions.rs`).
//!
//! # Error Recovery
//!
//! Recovery is two-tiered:
//!
//! - **Panic mode**: grammar methods return [`ParseError`] when the input
//!   does not fit. Every declaration loop (the top level and each block)
//!   catches it, records a [`Diagnostic`], and calls
//!   [`Parser::synchronize`], which skips to a statement boundary.
//! - **Error productions**: anticipated mistakes such as a missing `;` or
//!   `=` written for `==` in a condition are reported inline and parsing
//!   continues as if the intended token had been present.
//!
//! No error escapes [`parse`]: the caller always receives a best-effort tree
//! plus every diagnostic.
//!
//! # Usage
//!
//! ```
//! use kestrel_core::source_analysis::{parse, tokenize};
//!
//! let (tokens, _) = tokenize("let x = 1 + 2;", None);
//! let (declarations, diagnostics) = parse(tokens);
//! assert_eq!(declarations.len(), 1);
//! assert!(diagnostics.is_empty());
//! ```

use tracing::{debug, instrument, trace};

use crate::ast::Declaration;

use super::diagnostic::codes;
use super::{
    Diagnostic, FileId, ParseError, ParseErrorKind, Span, Token, TokenKind, TokenStream, tokenize,
};

mod declarations;
mod expressions;
mod patterns;
mod statements;


/// Maximum combined nesting of expressions, blocks, types and patterns.
///
/// Each link of an operator or postfix chain counts as one level, since it
/// adds one level to the tree. Deeper input is reported as an error instead
/// of exhausting the stack in the parser or in the passes that walk the tree.
/// `stacker::maybe_grow` at the expression entry point is a second line of
/// defence for recursion that stays under this limit.
pub(super) const MAX_NESTING_DEPTH: usize = 64;

/// Tokens at which [`Parser::synchronize`] stops: each one starts a new
/// declaration or statement, or closes the enclosing block.
const RECOVERY_POINTS: &[TokenKind] = &[
    TokenKind::Let,
    TokenKind::Fn,
    TokenKind::Type,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Return,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::RightBrace,
];

pub(super) type ParseResult<T> = Result<T, ParseError>;

/// Parses a token sequence into declarations in source order.
///
/// Always returns: syntax errors become diagnostics and the declarations
/// parsed around them are kept.
#[must_use]
#[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> (Vec<Declaration>, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let declarations = parser.parse_declarations(None);
    debug!(
        declarations = declarations.len(),
        diagnostics = parser.diagnostics.len(),
        "parsed tokens"
    );
    (declarations, parser.diagnostics)
}

/// The result of lexing and parsing one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Lexer diagnostics followed by parser diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexes and parses `source`.
#[must_use]
pub fn parse_source(source: &str, file_id: Option<FileId>) -> ParseOutput {
    let (tokens, mut diagnostics) = tokenize(source, file_id);
    let (declarations, parse_diagnostics) = parse(tokens);
    diagnostics.extend(parse_diagnostics);
    ParseOutput {
        declarations,
        diagnostics,
    }
}

/// Recursive-descent parser state.
///
/// Owns its token stream exclusively; discarded once parsing completes.
pub(super) struct Parser {
    pub(super) stream: TokenStream,
    pub(super) diagnostics: Vec<Diagnostic>,
    nesting_depth: usize,
}

impl Parser {
    pub(super) fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            diagnostics: Vec::new(),
            nesting_depth: 0,
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    /// Returns the kind of the current token.
    pub(super) fn current_kind(&self) -> TokenKind {
        self.stream.current().kind()
    }

    /// Returns true if the current token has the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Builds an "expected X, found <current token>" error.
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.stream.current();
        ParseError::expected(expected, found.to_string(), found.span())
    }

    /// Consumes an identifier or fails with "expected `what`".
    pub(super) fn expect_identifier(&mut self, what: &str) -> ParseResult<Token> {
        self.stream
            .try_consume(TokenKind::Identifier)
            .ok_or_else(|| self.unexpected(what))
    }

    /// Returns a zero-width span just after the last consumed token.
    ///
    /// Used to locate diagnostics for tokens that are missing.
    pub(super) fn span_after_previous(&self) -> Span {
        self.stream.previous().map_or_else(
            || Span::point(self.stream.current().span().start()),
            |token| Span::point(token.span().end()).with_file(token.span().file_id()),
        )
    }

    /// Returns the span of the last consumed token, or the current token if
    /// nothing has been consumed.
    pub(super) fn previous_span(&self) -> Span {
        self.stream
            .previous()
            .map_or_else(|| self.stream.current().span(), Token::span)
    }

    /// Consumes the `;` that ends a statement.
    ///
    /// A missing `;` is an error production: it is reported and parsing
    /// continues as if it were present. Returns the span the statement
    /// should end at.
    pub(super) fn expect_semicolon(&mut self, after: &str) -> Span {
        if let Some(semicolon) = self.stream.try_consume(TokenKind::Semicolon) {
            return semicolon.span();
        }
        let span = self.span_after_previous();
        trace!(%span, after, "missing semicolon");
        self.diagnostics.push(
            Diagnostic::error(format!("expected ';' after {after}"), span)
                .with_code(codes::MISSING_SEMICOLON)
                .with_hint("add ';' to end the statement"),
        );
        self.previous_span()
    }

    // ========================================================================
    // Nesting and speculation
    // ========================================================================

    /// Runs `parse` one nesting level deeper, failing once the limit is hit.
    pub(super) fn nested<T>(
        &mut self,
        span: Span,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.deepen(span)?;
        let result = parse(self);
        self.nesting_depth -= 1;
        result
    }

    /// Runs a loop that builds a left-deep tree, such as `a + b + c` or
    /// `f()()()`.
    ///
    /// The loop calls [`Parser::deepen`] once per node it wraps, so a long
    /// chain counts against the nesting limit like explicit nesting does.
    /// The depth is restored when the loop finishes.
    pub(super) fn chained<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let depth = self.nesting_depth;
        let result = parse(self);
        self.nesting_depth = depth;
        result
    }

    /// Adds one nesting level, failing once the limit is hit.
    pub(super) fn deepen(&mut self, span: Span) -> ParseResult<()> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                span,
            ));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Tries `parse` speculatively.
    ///
    /// On success the tokens it consumed stay consumed. On failure the stream
    /// and the diagnostic list are restored to where they were.
    pub(super) fn speculate<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> Option<T> {
        let diagnostics_len = self.diagnostics.len();
        self.stream.mark();
        match parse(self) {
            Ok(value) => {
                self.stream.commit();
                Some(value)
            }
            Err(_) => {
                self.stream.reset();
                self.diagnostics.truncate(diagnostics_len);
                None
            }
        }
    }

    // ========================================================================
    // Declaration loop and panic-mode recovery
    // ========================================================================

    /// Parses declarations until end of input or until `terminator` is the
    /// current token (which is left unconsumed).
    pub(super) fn parse_declarations(&mut self, terminator: Option<TokenKind>) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        while !self.stream.is_at_end() && !terminator.is_some_and(|kind| self.check(kind)) {
            if let Some(declaration) = self.parse_declaration_recovering(terminator) {
                declarations.push(declaration);
            }
        }
        declarations
    }

    /// Parses one declaration, converting a syntax error into a diagnostic
    /// and resynchronizing.
    ///
    /// An error that leaves the cursor on `terminator` skips nothing, so the
    /// enclosing block can close. The declaration started on another token,
    /// so the cursor has still moved.
    fn parse_declaration_recovering(&mut self, terminator: Option<TokenKind>) -> Option<Declaration> {
        match self.parse_declaration() {
            Ok(declaration) => Some(declaration),
            Err(error) => {
                trace!(%error, span = %error.span, "recovering from syntax error");
                // A lexical error token already has its own diagnostic.
                let current = self.stream.current();
                let already_reported =
                    current.kind().is_error() && current.span() == error.span;
                if !already_reported {
                    self.diagnostics.push(error.into());
                }
                if !terminator.is_some_and(|kind| self.check(kind)) {
                    self.synchronize();
                }
                None
            }
        }
    }

    /// Skips tokens after a syntax error until a safe point to resume.
    ///
    /// Always consumes the offending token first, then stops just after a
    /// `;` or at a token in [`RECOVERY_POINTS`]. Each call therefore moves
    /// the cursor by at least one token unless it is already at end of input.
    pub(super) fn synchronize(&mut self) {
        let start = self.stream.position();
        self.stream.advance();

        while !self.stream.is_at_end() {
            if self
                .stream
                .previous()
                .is_some_and(|token| token.kind() == TokenKind::Semicolon)
            {
                break;
            }
            if self.stream.check(RECOVERY_POINTS) {
                break;
            }
            self.stream.advance();
        }
        trace!(skipped = self.stream.position() - start, "synchronized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Literal, Statement};
    use crate::source_analysis::Severity;

    fn parse_str(source: &str) -> (Vec<Declaration>, Vec<Diagnostic>) {
        let output = parse_source(source, None);
        (output.declarations, output.diagnostics)
    }

    fn codes_of(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
        diagnostics.iter().filter_map(|d| d.code).collect()
    }

    #[test]
    fn scenario_a_let_with_integer() {
        let (declarations, diagnostics) = parse_str("let x = 5;");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(declarations.len(), 1);
        let Declaration::Let(decl) = &declarations[0] else {
            panic!("expected let, got {:?}", declarations[0]);
        };
        assert_eq!(decl.name.name, "x");
        let Some(Expression::Literal(literal)) = &decl.initializer else {
            panic!("expected literal initializer");
        };
        assert_eq!(literal.value, Literal::Integer(5));
    }

    #[test]
    fn scenario_b_missing_semicolon() {
        let (declarations, diagnostics) = parse_str("let x = 5");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::MISSING_SEMICOLON));
        assert_eq!(declarations.len(), 1);

        let (expected, _) = parse_str("let x = 5;");
        let (Declaration::Let(actual), Declaration::Let(expected)) = (&declarations[0], &expected[0])
        else {
            panic!("expected let declarations");
        };
        assert_eq!(actual.name, expected.name);
        assert_eq!(actual.initializer, expected.initializer);
    }

    #[test]
    fn scenario_b_keeps_following_declarations() {
        let (declarations, diagnostics) = parse_str("let x = 5\nlet y = 6;\nfn f() {}");
        assert_eq!(codes_of(&diagnostics), vec![codes::MISSING_SEMICOLON]);
        assert_eq!(declarations.len(), 3);
    }

    #[test]
    fn scenario_c_unterminated_string() {
        let (tokens, lex_diagnostics) = tokenize("\"unterminated", None);
        let errors: Vec<_> = tokens.iter().filter(|t| t.kind().is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span().end().byte_offset(), 13);
        assert_eq!(lex_diagnostics.len(), 1);
        assert_eq!(lex_diagnostics[0].severity, Severity::Error);

        // The parser does not add a second diagnostic for the error token.
        let (_, diagnostics) = parse_str("\"unterminated");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn scenario_d_recovers_at_next_declaration() {
        let (declarations, diagnostics) = parse_str("let x = ; let y = 1;");
        assert!(diagnostics.iter().any(Diagnostic::is_error));
        assert_eq!(diagnostics[0].code, Some(codes::UNEXPECTED_TOKEN));
        assert_eq!(declarations.len(), 1);
        let Declaration::Let(decl) = &declarations[0] else {
            panic!("expected let");
        };
        assert_eq!(decl.name.name, "y");
        assert!(matches!(
            &decl.initializer,
            Some(Expression::Literal(lit)) if lit.value == Literal::Integer(1)
        ));
    }

    #[test]
    fn scenario_e_assignment_in_condition() {
        let (declarations, diagnostics) = parse_str("if x = 1 { }");
        assert_eq!(codes_of(&diagnostics), vec![codes::ASSIGNMENT_IN_CONDITION]);
        let Declaration::Statement(Statement::If(stmt)) = &declarations[0] else {
            panic!("expected if statement");
        };
        assert!(matches!(
            &stmt.condition,
            Expression::Binary(binary) if binary.operator == crate::ast::BinaryOperator::Equal
        ));
        assert!(stmt.then_branch.declarations.is_empty());
    }

    #[test]
    fn recovery_inside_block_keeps_siblings() {
        let (declarations, diagnostics) = parse_str("fn f() { let a = ; let b = 2; }");
        assert_eq!(diagnostics.len(), 1);
        let Declaration::Function(function) = &declarations[0] else {
            panic!("expected function");
        };
        assert_eq!(function.body.declarations.len(), 1);
    }

    #[test]
    fn error_at_closing_brace_keeps_later_declarations() {
        let (declarations, diagnostics) = parse_str("fn f() { let a = } let b = 1;");
        assert_eq!(codes_of(&diagnostics), vec![codes::UNEXPECTED_TOKEN]);
        assert_eq!(diagnostics[0].message, "expected expression, found '}'");
        assert_eq!(declarations.len(), 2);
        let Declaration::Function(function) = &declarations[0] else {
            panic!("expected function, got {:?}", declarations[0]);
        };
        assert!(function.body.declarations.is_empty());
        assert!(matches!(&declarations[1], Declaration::Let(decl) if decl.name.name == "b"));
    }

    #[test]
    fn nested_block_error_at_brace_closes_only_inner_block() {
        let (declarations, diagnostics) =
            parse_str("fn f() { if x { 1 + } let y = 2; } fn g() {}");
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(declarations.len(), 2);
        let Declaration::Function(function) = &declarations[0] else {
            panic!("expected function");
        };
        assert_eq!(function.body.declarations.len(), 2);
    }

    #[test]
    fn stray_closing_brace_at_top_level_is_skipped() {
        let (declarations, diagnostics) = parse_str("} let a = 1;");
        assert_eq!(codes_of(&diagnostics), vec![codes::UNEXPECTED_TOKEN]);
        assert_eq!(declarations.len(), 1);
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        let (declarations, diagnostics) = parse_str("1 + 2 = 3; let ok = 1;");
        assert_eq!(codes_of(&diagnostics), vec![codes::INVALID_ASSIGNMENT_TARGET]);
        assert_eq!(declarations.len(), 2);
        assert!(matches!(
            &declarations[0],
            Declaration::Statement(Statement::Expression(stmt))
                if matches!(stmt.expression, Expression::Assignment(_))
        ));
    }

    #[test]
    fn synchronize_always_advances() {
        let (tokens, _) = tokenize("; ; ;", None);
        let mut parser = Parser::new(tokens);
        let before = parser.stream.position();
        parser.synchronize();
        assert!(parser.stream.position() > before);
    }

    #[test]
    fn synchronize_stops_at_keyword() {
        let (tokens, _) = tokenize("garbage more stuff let x = 1;", None);
        let mut parser = Parser::new(tokens);
        parser.synchronize();
        assert_eq!(parser.current_kind(), TokenKind::Let);
    }

    #[test]
    fn only_error_tokens_terminates() {
        let (declarations, diagnostics) = parse_str("@ # $ ^");
        assert!(declarations.is_empty());
        // One lexical diagnostic each, nothing duplicated by the parser
        assert_eq!(diagnostics.len(), 4);
    }

    #[test]
    fn empty_input() {
        let (declarations, diagnostics) = parse(Vec::new());
        assert!(declarations.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let source = format!("let x = {}1{};", "(".repeat(500), ")".repeat(500));
        let (_, diagnostics) = parse_str(&source);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == Some(codes::NESTING_TOO_DEEP))
        );
    }

    #[test]
    fn deep_unary_chain_is_bounded() {
        let source = format!("let x = {}1;", "-".repeat(10_000));
        let (_, diagnostics) = parse_str(&source);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code == Some(codes::NESTING_TOO_DEEP))
        );
    }

    #[test]
    fn long_binary_chain_is_bounded() {
        let source = format!("let x = {}1; let y = 2;", "1+".repeat(10_000));
        let (declarations, diagnostics) = parse_str(&source);
        assert_eq!(codes_of(&diagnostics), vec![codes::NESTING_TOO_DEEP]);
        assert!(matches!(declarations.last(), Some(Declaration::Let(decl)) if decl.name.name == "y"));
    }

    #[test]
    fn long_postfix_chain_is_bounded() {
        let source = format!("print{};", "()".repeat(20_000));
        let (_, diagnostics) = parse_str(&source);
        assert_eq!(codes_of(&diagnostics), vec![codes::NESTING_TOO_DEEP]);

        let source = format!("a{};", ".b[0]".repeat(5_000));
        let (_, diagnostics) = parse_str(&source);
        assert_eq!(codes_of(&diagnostics), vec![codes::NESTING_TOO_DEEP]);
    }

    #[test]
    fn chains_under_the_limit_parse_and_restore_depth() {
        let chain = format!("{}1", "1 + ".repeat(40));
        let source = format!("let x = {chain}; let y = ({chain}) * f()()();");
        let (declarations, diagnostics) = parse_str(&source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(declarations.len(), 2);
    }

    #[test]
    fn mixed_precedence_chains_share_one_limit() {
        let source = format!("let x = {}1;", "1 * 1 + ".repeat(100));
        let (_, diagnostics) = parse_str(&source);
        assert_eq!(codes_of(&diagnostics), vec![codes::NESTING_TOO_DEEP]);
    }

    #[test]
    fn speculation_restores_diagnostics() {
        let (tokens, _) = tokenize("\"\\q\" x", None);
        let mut parser = Parser::new(tokens);
        let result: Option<()> = parser.speculate(|p| {
            p.parse_expression()?;
            Err(p.unexpected("nothing"))
        });
        assert!(result.is_none());
        assert!(parser.diagnostics.is_empty());
        assert_eq!(parser.stream.position(), 0);
        assert_eq!(parser.stream.mark_depth(), 0);
    }
}
