// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics shared by every front-end pass.
//!
//! Passes never throw on bad input. They accumulate [`Diagnostic`] values in
//! a list and return it alongside their output, so a caller always receives a
//! best-effort result plus the complete set of problems found.

use std::fmt;

use ecow::EcoString;

use super::{FileId, Span};

/// Stable diagnostic codes.
///
/// Codes are grouped by pass: `L` for the lexer, `P` for the parser and `S`
/// for semantic analyses.
pub mod codes {
    pub const UNEXPECTED_CHARACTER: &str = "L0001";
    pub const UNTERMINATED_STRING: &str = "L0002";
    pub const UNTERMINATED_COMMENT: &str = "L0003";
    pub const INVALID_NUMBER: &str = "L0004";

    pub const UNEXPECTED_TOKEN: &str = "P0001";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "P0002";
    pub const MISSING_SEMICOLON: &str = "P0003";
    pub const ASSIGNMENT_IN_CONDITION: &str = "P0004";
    pub const NESTING_TOO_DEEP: &str = "P0005";
    pub const UNKNOWN_ESCAPE: &str = "P0006";
    pub const MISSING_EQUALS: &str = "P0007";

    pub const UNDEFINED_NAME: &str = "S0001";
    pub const DUPLICATE_DECLARATION: &str = "S0002";
    pub const UNUSED_VARIABLE: &str = "S0003";
    pub const UNREACHABLE_CODE: &str = "S0004";
    pub const UNDEFINED_TYPE: &str = "S0005";
    pub const ASSIGN_TO_IMMUTABLE: &str = "S0006";
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// An error that prevents code generation.
    Error,
    /// A warning that should be addressed.
    Warning,
    /// Informational note.
    Info,
    /// A suggestion.
    Hint,
}

impl Severity {
    /// Returns the lowercase name used in textual and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message attached to a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The message.
    pub message: EcoString,
    /// The source location.
    pub span: Span,
    /// Optional stable code, see [`codes`].
    pub code: Option<&'static str>,
    /// Optional hint for how to fix the issue.
    pub hint: Option<EcoString>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
            code: None,
            hint: None,
        }
    }

    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    /// Creates a new informational diagnostic.
    #[must_use]
    pub fn info(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Info, message, span)
    }

    /// Creates a new hint diagnostic.
    #[must_use]
    pub fn hint(message: impl Into<EcoString>, span: Span) -> Self {
        Self::new(Severity::Hint, message, span)
    }

    /// Attaches a stable code.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches a fix-it hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Returns true for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns the line/column shape consumed by presentation code.
    #[must_use]
    pub fn location(&self) -> DiagnosticLocation {
        let start = self.span.start();
        let end = self.span.end();
        DiagnosticLocation {
            start_line: start.line(),
            start_column: start.column(),
            end_line: end.line(),
            end_column: end.column(),
            file_id: self.span.file_id(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, " at {}: {}", self.span.start(), self.message)
    }
}

/// Line/column range of a diagnostic, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticLocation {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub file_id: Option<FileId>,
}

/// Returns true if any diagnostic in `diagnostics` is an error.
///
/// Code generation must not proceed past error-severity diagnostics.
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
