// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `kestrel tokens`: print the token stream of one file.

use std::fmt::Write as _;

use kestrel_core::source_analysis::{LiteralValue, Token, has_errors, tokenize};
use miette::Result;

use super::{read_single_source, report_text};

pub fn run_tokens(path: &str) -> Result<()> {
    let (path, source) = read_single_source(path)?;
    let (tokens, diagnostics) = tokenize(&source, None);
    print!("{}", format_tokens(&tokens));
    report_text(&path, &source, &diagnostics);
    if has_errors(&diagnostics) {
        miette::bail!("'{path}' has lexical errors");
    }
    Ok(())
}

/// One line per token: span, kind, lexeme, and the typed value if any.
fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let span = token.span();
        let _ = write!(
            out,
            "{:>4}:{:<3} {:?} {:?}",
            span.start().line(),
            span.start().column(),
            token.kind(),
            token.text()
        );
        match token.literal() {
            Some(LiteralValue::Integer(value)) => {
                let _ = write!(out, " = {value}");
            }
            Some(LiteralValue::Float(value)) => {
                let _ = write!(out, " = {value:?}");
            }
            Some(LiteralValue::String(_)) | None => {}
        }
        out.push('\n');
    }
    out
}
