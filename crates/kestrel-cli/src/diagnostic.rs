// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Rich diagnostic rendering using miette.
//!
//! Converts kestrel-core diagnostics into miette reports with:
//! - Source code context around the problem
//! - A labelled arrow at the offending span
//! - The stable diagnostic code and any fix-it hint
//!
//! Also defines the JSON shape emitted by `kestrel check --format json`.

use std::fmt;

use kestrel_core::source_analysis::{Diagnostic as CoreDiagnostic, Severity};
use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};
use serde::Serialize;

/// A front-end diagnostic with its source, ready for rendering.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CompileDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub code: Option<&'static str>,
    pub help: Option<String>,
    pub src: NamedSource<String>,
    pub span: SourceSpan,
    pub label: String,
}

impl CompileDiagnostic {
    /// Create a new diagnostic from a kestrel-core diagnostic.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
            Severity::Info | Severity::Hint => "note",
        };

        Self {
            severity: diagnostic.severity,
            message: diagnostic.message.to_string(),
            code: diagnostic.code,
            help: diagnostic.hint.as_ref().map(ToString::to_string),
            src: NamedSource::new(source_path, source.to_string()),
            span: diagnostic.span.into(),
            label: label.to_string(),
        }
    }
}

impl miette::Diagnostic for CompileDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info | Severity::Hint => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// One line of `--format json` output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonDiagnostic<'a> {
    pub file: &'a str,
    pub severity: &'static str,
    pub code: Option<&'static str>,
    pub message: &'a str,
    pub hint: Option<&'a str>,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub file_id: Option<u32>,
}

impl<'a> JsonDiagnostic<'a> {
    pub fn new(file: &'a str, diagnostic: &'a CoreDiagnostic) -> Self {
        let location = diagnostic.location();
        Self {
            file,
            severity: diagnostic.severity.as_str(),
            code: diagnostic.code,
            message: diagnostic.message.as_str(),
            hint: diagnostic.hint.as_deref(),
            start_line: location.start_line,
            start_column: location.start_column,
            end_line: location.end_line,
            end_column: location.end_column,
            file_id: location.file_id.map(|id| id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::source_analysis::{FileId, Position, Span, codes};
    use miette::Diagnostic as _;

    fn span(start: u32, end: u32) -> Span {
        Span::new(Position::new(start, 1, start + 1), Position::new(end, 1, end + 1))
    }

    #[test]
    fn from_core_diagnostic_error() {
        let core_diag = CoreDiagnostic::error("expected expression", span(8, 9))
            .with_code(codes::UNEXPECTED_TOKEN);
        let source = "let x = ;";
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "test.kes", source);

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "expected expression");
        assert_eq!(diag.span.offset(), 8);
        assert_eq!(diag.span.len(), 1);
        assert_eq!(diag.label, "error here");
        assert_eq!(diag.code().map(|c| c.to_string()).as_deref(), Some("P0001"));
        assert_eq!(diag.severity(), Some(miette::Severity::Error));
    }

    #[test]
    fn from_core_diagnostic_warning_with_hint() {
        let core_diag = CoreDiagnostic::warning("unused variable 'x'", span(4, 5))
            .with_hint("if this is intentional, rename it to '_x'");
        let source = "let x = 42;";
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "test.kes", source);

        assert_eq!(diag.label, "warning here");
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
        assert_eq!(
            diag.help().map(|h| h.to_string()).as_deref(),
            Some("if this is intentional, rename it to '_x'")
        );
    }

    #[test]
    fn zero_length_span() {
        let core_diag = CoreDiagnostic::error("unexpected end of input", span(10, 10));
        let diag = CompileDiagnostic::from_core_diagnostic(&core_diag, "test.kes", "let x = [1");
        assert_eq!(diag.span.offset(), 10);
        assert_eq!(diag.span.len(), 0);
    }

    #[test]
    fn json_shape() {
        let core_diag = CoreDiagnostic::error("undefined name 'y'", span(8, 9).with_file(Some(FileId(3))))
            .with_code(codes::UNDEFINED_NAME);
        let json = serde_json::to_value(JsonDiagnostic::new("a.kes", &core_diag)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file": "a.kes",
                "severity": "error",
                "code": "S0001",
                "message": "undefined name 'y'",
                "hint": null,
                "start_line": 1,
                "start_column": 9,
                "end_line": 1,
                "end_column": 10,
                "file_id": 3,
            })
        );
    }
}
