// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the Kestrel lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics** on arbitrary string input
//! 2. **Token spans within input**: every span satisfies `start <= end <= input.len()`
//! 3. **Token spans are non-overlapping** and in source order
//! 4. **Exactly one EOF, and it is last**
//! 5. **Lexer is deterministic**
//! 6. **Totality**: every byte that is not whitespace or comment belongs to a token
//! 7. **Error tokens and diagnostics agree**
//! 8. **Valid fragments produce no errors**

use proptest::prelude::*;

use super::lexer::{lex, tokenize};
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-token fragments that should lex without errors.
const VALID_SINGLE_TOKENS: &[&str] = &[
    "42",
    "3.14",
    "\"hello\"",
    "\"esc\\\"aped\"",
    "true",
    "false",
    "x",
    "my_variable",
    "_",
    "let",
    "match",
    "+",
    "+=",
    "-",
    "->",
    "=>",
    "==",
    "!=",
    "<=",
    "&&",
    "||",
    "(",
    ")",
    "{",
    "}",
    "[",
    "]",
    ";",
];

/// Multi-token valid fragments that should lex cleanly.
const VALID_FRAGMENTS: &[&str] = &[
    "let x = 5;",
    "let mut total: int = a + b * 2;",
    "fn add(a: int, b: int) -> int { return a + b; }",
    "if x == 1 { y; } else { z; }",
    "while i < 10 { i += 1; }",
    "for item in items { print(item); }",
    "match v { Some(x) if x > 0 => x, _ => 0 }",
    "type Pair = (int, string);",
    "point.x = items[0]; // trailing comment",
    "/* outer /* inner */ still comment */ done",
];

fn valid_single_token() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_SINGLE_TOKENS).prop_map(std::string::ToString::to_string)
}

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _tokens = tokenize(&input, None);
    }

    /// Property 2: All token spans are within input bounds.
    #[test]
    fn token_spans_within_input(input in "\\PC{0,500}") {
        let (tokens, _) = tokenize(&input, None);
        let input_len = u32::try_from(input.len()).unwrap_or(u32::MAX);
        for token in &tokens {
            let span = token.span();
            prop_assert!(
                span.end().byte_offset() <= input_len,
                "Token {:?} span end {} exceeds input length {} for input {:?}",
                token.kind(),
                span.end().byte_offset(),
                input_len,
                input,
            );
            prop_assert!(
                span.start().byte_offset() <= span.end().byte_offset(),
                "Token {:?} span {} is reversed for input {:?}",
                token.kind(),
                span,
                input,
            );
        }
    }

    /// Property 3: Token spans are non-overlapping and ordered.
    #[test]
    fn token_spans_non_overlapping(input in "\\PC{0,500}") {
        let (tokens, _) = tokenize(&input, None);
        for window in tokens.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            prop_assert!(
                next.span().start().byte_offset() >= prev.span().end().byte_offset(),
                "Overlapping spans: {:?} at {} and {:?} at {} for input {:?}",
                prev.kind(),
                prev.span(),
                next.kind(),
                next.span(),
                input,
            );
        }
    }

    /// Property 4: tokenize ends with exactly one EOF.
    #[test]
    fn exactly_one_eof_last(input in "\\PC{0,500}") {
        let (tokens, _) = tokenize(&input, None);
        let eof_count = tokens.iter().filter(|t| t.kind().is_eof()).count();
        prop_assert_eq!(eof_count, 1, "input {:?}", input);
        prop_assert!(
            tokens.last().is_some_and(|t| t.kind().is_eof()),
            "Last token should be EOF for input {:?}",
            input,
        );
    }

    /// Property 5: Lexer is deterministic.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let first = tokenize(&input, None);
        let second = tokenize(&input, None);
        prop_assert_eq!(first, second, "input {:?}", input);
    }

    /// Property 6: Without comments, every non-whitespace byte lies inside
    /// some token's span.
    #[test]
    fn every_non_whitespace_byte_is_covered(input in "[^/]{0,300}") {
        let (tokens, _) = tokenize(&input, None);
        for (offset, c) in input.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            let covered = tokens.iter().any(|t| t.span().as_range().contains(&offset));
            prop_assert!(covered, "byte {} ({:?}) not covered in {:?}", offset, c, input);
        }
    }

    /// Property 7: Every error token has a diagnostic at its span, and every
    /// lexical diagnostic has an error token.
    #[test]
    fn error_tokens_match_diagnostics(input in "\\PC{0,300}") {
        let (tokens, diagnostics) = tokenize(&input, None);
        let error_spans: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Error)
            .map(|t| t.span())
            .collect();
        let diagnostic_spans: Vec<_> = diagnostics.iter().map(|d| d.span).collect();
        prop_assert_eq!(error_spans, diagnostic_spans, "input {:?}", input);
    }

    /// Property 8a: Valid single tokens lex without errors.
    #[test]
    fn valid_tokens_no_errors(input in valid_single_token()) {
        let tokens = lex(&input);
        prop_assert_eq!(tokens.len(), 1, "input {:?} gave {:?}", input, tokens);
        prop_assert!(!tokens[0].kind().is_error());
    }

    /// Property 8b: Valid fragments lex without errors.
    #[test]
    fn valid_fragments_no_errors(input in valid_fragment()) {
        let (tokens, diagnostics) = tokenize(&input, None);
        prop_assert!(diagnostics.is_empty(), "input {:?} gave {:?}", input, diagnostics);
        prop_assert!(tokens.iter().all(|t| !t.kind().is_error()));
    }

    /// Line numbers never decrease across the token sequence.
    #[test]
    fn lines_are_monotonic(input in "[a-z0-9 +;\n]{0,200}") {
        let (tokens, _) = tokenize(&input, None);
        for window in tokens.windows(2) {
            prop_assert!(window[0].span().start().line() <= window[1].span().start().line());
        }
    }
}
