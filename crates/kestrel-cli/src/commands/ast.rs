// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `kestrel ast`: print the syntax tree of one file.
//!
//! The tree is printed even when the file has syntax errors, so the output
//! shows what recovery kept.

use kestrel_core::source_analysis::{FileId, has_errors, parse_source};
use miette::Result;

use super::{read_single_source, report_text};

pub fn run_ast(path: &str) -> Result<()> {
    let (path, source) = read_single_source(path)?;
    let output = parse_source(&source, Some(FileId(0)));
    for declaration in &output.declarations {
        println!("{declaration:#?}");
    }
    report_text(&path, &source, &output.diagnostics);
    if has_errors(&output.diagnostics) {
        miette::bail!("'{path}' has syntax errors");
    }
    Ok(())
}
