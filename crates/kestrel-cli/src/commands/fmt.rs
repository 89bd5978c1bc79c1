// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `kestrel fmt`: print a file in canonical layout.
//!
//! The formatted text goes to stdout and the file itself is never modified.
//! Comments are not part of the tree, so a file containing comments is
//! refused rather than printed without them.
//! With `--check`, nothing is printed and the command fails if the file
//! differs from its canonical layout.

use kestrel_core::source_analysis::{has_errors, parse_source, tokenize};
use kestrel_core::unparse::unparse;
use miette::Result;
use tracing::debug;

use super::{read_single_source, report_text};

pub fn run_fmt(path: &str, check_only: bool) -> Result<()> {
    let (path, source) = read_single_source(path)?;
    if has_comments(&source) {
        miette::bail!("Cannot format '{path}': formatting would remove its comments");
    }
    let Some(formatted) = format_source(&source) else {
        let output = parse_source(&source, None);
        report_text(&path, &source, &output.diagnostics);
        miette::bail!("Cannot format '{path}': it has syntax errors");
    };

    if check_only {
        if formatted != source {
            miette::bail!("'{path}' is not formatted");
        }
        debug!(%path, "already formatted");
        return Ok(());
    }
    print!("{formatted}");
    Ok(())
}

/// Returns the canonical layout of `source`, or `None` if it has syntax
/// errors.
fn format_source(source: &str) -> Option<String> {
    let output = parse_source(source, None);
    if has_errors(&output.diagnostics) {
        return None;
    }
    Some(unparse(&output.declarations))
}

/// Returns true if anything other than whitespace lies between tokens.
///
/// The lexer drops comments, so such a gap can only be a comment.
fn has_comments(source: &str) -> bool {
    let (tokens, _) = tokenize(source, None);
    let mut gap_start = 0;
    for token in &tokens {
        let range = token.span().as_range();
        let gap = source.get(gap_start..range.start).unwrap_or_default();
        if !gap.trim().is_empty() {
            return true;
        }
        gap_start = range.end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn formats_to_canonical_layout() {
        assert_eq!(
            format_source("let   x=1 ;fn f( a ){return a;}").as_deref(),
            Some("let x = 1;\nfn f(a) {\n    return a;\n}\n")
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_source("while i<10 { i+=1; if i==5 { break; } }").unwrap();
        assert_eq!(format_source(&once), Some(once));
    }

    #[test]
    fn syntax_errors_are_not_formatted() {
        assert_eq!(format_source("let = ;"), None);
    }

    #[test]
    fn comments_are_detected() {
        assert!(has_comments("let x = 1; // trailing\n"));
        assert!(has_comments("/* lead */ let x = 1;"));
        assert!(has_comments("let x = 1;\n/* outer /* inner */ */"));
        assert!(!has_comments("let x = 1;\n\n  fn f() {}\n"));
        assert!(!has_comments("let s = \"// not a comment\";"));
        assert!(!has_comments(""));
    }

    #[test]
    fn files_with_comments_are_refused() {
        let dir = TempDir::new().unwrap();
        let commented = dir.path().join("commented.kes");
        fs::write(&commented, "// header\nlet x = 1;\n").unwrap();

        let error = run_fmt(commented.to_str().unwrap(), false).unwrap_err();
        assert!(error.to_string().contains("comments"), "{error}");
        assert!(run_fmt(commented.to_str().unwrap(), true).is_err());
        assert_eq!(
            fs::read_to_string(&commented).unwrap(),
            "// header\nlet x = 1;\n"
        );
    }

    #[test]
    fn check_mode_compares_with_the_file() {
        let dir = TempDir::new().unwrap();
        let formatted = dir.path().join("ok.kes");
        fs::write(&formatted, "let x = 1;\n").unwrap();
        let messy = dir.path().join("messy.kes");
        fs::write(&messy, "let x=1;").unwrap();

        assert!(run_fmt(formatted.to_str().unwrap(), true).is_ok());
        assert!(run_fmt(messy.to_str().unwrap(), true).is_err());
    }
}
