// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `kestrel check`: parse and analyse source files.
//!
//! Each file runs through its own independent pipeline (lex, parse,
//! semantic analysis) on a scoped worker thread. Results are reported in
//! path order once every worker has finished, so output is deterministic
//! regardless of scheduling.

use std::thread;

use camino::{Utf8Path, Utf8PathBuf};
use kestrel_core::semantic_analysis::{AnalysisOptions, analyze};
use kestrel_core::source_analysis::{Diagnostic, FileId, Severity, parse_source};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, trace};

use super::{OutputFormat, collect_source_files, read_source, report_text};
use crate::config;
use crate::diagnostic::JsonDiagnostic;

/// Diagnostics found in one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: Utf8PathBuf,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}

/// Check the file or directory at `path`.
///
/// Prints every diagnostic and returns an error if the check fails.
pub fn run_check(path: &str, format: OutputFormat) -> Result<()> {
    let target = Utf8PathBuf::from(path);
    let files = collect_source_files(&target)?;
    let config = config::load_for(&target)?;
    debug!(files = files.len(), ?config, "checking");

    let reports = check_files(&files, &config.analysis.to_options())?;

    let mut errors = 0;
    let mut warnings = 0;
    for report in &reports {
        match format {
            OutputFormat::Text => report_text(&report.path, &report.source, &report.diagnostics),
            OutputFormat::Json => {
                for diagnostic in &report.diagnostics {
                    let json = JsonDiagnostic::new(report.path.as_str(), diagnostic);
                    let line = serde_json::to_string(&json).into_diagnostic()?;
                    println!("{line}");
                }
            }
        }
        errors += report.error_count();
        warnings += report.warning_count();
    }

    if format == OutputFormat::Text {
        eprintln!(
            "Checked {} file{}: {errors} error{}, {warnings} warning{}",
            files.len(),
            plural(files.len()),
            plural(errors),
            plural(warnings)
        );
    }

    match failure_message(errors, warnings, config.check.warnings_as_errors) {
        Some(message) => miette::bail!("{message}"),
        None => Ok(()),
    }
}

/// Checks every file concurrently, one scoped worker per file.
///
/// Reports come back in the order of `files`. File ids are the index of the
/// file in `files`.
pub fn check_files(files: &[Utf8PathBuf], options: &AnalysisOptions) -> Result<Vec<FileReport>> {
    thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let file_id = u32::try_from(index).ok().map(FileId);
                (path, scope.spawn(move || check_file(path, file_id, options)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(path, handle)| {
                handle
                    .join()
                    .map_err(|_| miette::miette!("checker worker panicked for '{path}'"))?
            })
            .collect()
    })
}

fn check_file(
    path: &Utf8Path,
    file_id: Option<FileId>,
    options: &AnalysisOptions,
) -> Result<FileReport> {
    trace!(%path, "checking file");
    let source = read_source(path)?;
    let diagnostics = check_source(&source, file_id, options);
    Ok(FileReport {
        path: path.to_path_buf(),
        source,
        diagnostics,
    })
}

/// Runs the full front end over one source text.
///
/// Diagnostics are ordered by position; diagnostics at the same position
/// keep pipeline order (lexer, parser, analyses).
pub fn check_source(
    source: &str,
    file_id: Option<FileId>,
    options: &AnalysisOptions,
) -> Vec<Diagnostic> {
    let output = parse_source(source, file_id);
    let mut diagnostics = output.diagnostics;
    diagnostics.extend(analyze(&output.declarations, options));
    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start().byte_offset());
    diagnostics
}

/// Describes why the check failed, or `None` if it passed.
fn failure_message(errors: usize, warnings: usize, warnings_as_errors: bool) -> Option<String> {
    if errors > 0 {
        Some(format!("{errors} error{} found", plural(errors)))
    } else if warnings_as_errors && warnings > 0 {
        Some(format!(
            "{warnings} warning{} found (warnings are treated as errors)",
            plural(warnings)
        ))
    } else {
        None
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
