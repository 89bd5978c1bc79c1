// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for front-end crash safety.
//!
//! Feeds arbitrary UTF-8 through the lexer, parser, semantic analyses and
//! unparser. Any panic is a bug: every stage must turn bad input into
//! diagnostics.
//!
//! Beyond not panicking, the target checks that:
//! - the token list ends in exactly one EOF token
//! - every diagnostic span lies within the input
//! - a clean parse unparses to text that parses cleanly again

#![no_main]

use kestrel_core::semantic_analysis::{AnalysisOptions, analyze};
use kestrel_core::source_analysis::{TokenKind, has_errors, parse, parse_source, tokenize};
use kestrel_core::unparse::unparse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is rejected when files are loaded, before the lexer.
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let (tokens, _) = tokenize(source, None);
    let eof_count = tokens.iter().filter(|t| t.kind() == TokenKind::Eof).count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::Eof));

    let (declarations, diagnostics) = parse(tokens);
    let len = u32::try_from(source.len()).unwrap_or(u32::MAX);
    for diagnostic in &diagnostics {
        assert!(diagnostic.span.end().byte_offset() <= len);
    }

    let _ = analyze(&declarations, &AnalysisOptions::default());

    let output = parse_source(source, None);
    if !has_errors(&output.diagnostics) {
        let formatted = unparse(&output.declarations);
        let reparsed = parse_source(&formatted, None);
        assert!(
            !has_errors(&reparsed.diagnostics),
            "unparsed output does not parse: {formatted:?}"
        );
    }
});
