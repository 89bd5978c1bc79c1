// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis error types.

use ecow::EcoString;
use thiserror::Error;

use crate::source_analysis::{Diagnostic, Severity, Span, codes};

/// A problem found by a semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub span: Span,
}

/// Types of semantic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    /// A name used but never declared in an enclosing scope.
    #[error("undefined name '{name}'")]
    UndefinedName { name: EcoString },

    /// A type name that is neither built in nor declared.
    #[error("undefined type '{name}'")]
    UndefinedType { name: EcoString },

    /// A name declared twice in the same scope.
    #[error("'{name}' is already declared in this scope")]
    DuplicateDeclaration { name: EcoString, first_span: Span },

    /// A `let` binding that is never read.
    #[error("unused variable '{name}'")]
    UnusedVariable { name: EcoString },

    /// A statement that follows `return`, `break` or `continue`.
    #[error("unreachable code")]
    UnreachableCode { after: &'static str },

    /// Assignment to a binding that was not declared `mut`.
    #[error("cannot assign twice to immutable variable '{name}'")]
    AssignToImmutable { name: EcoString, declared_at: Span },
}

impl SemanticError {
    /// Create a new semantic error.
    #[must_use]
    pub fn new(kind: SemanticErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self.kind {
            SemanticErrorKind::UnusedVariable { .. } | SemanticErrorKind::UnreachableCode { .. } => {
                Severity::Warning
            }
            SemanticErrorKind::UndefinedName { .. }
            | SemanticErrorKind::UndefinedType { .. }
            | SemanticErrorKind::DuplicateDeclaration { .. }
            | SemanticErrorKind::AssignToImmutable { .. } => Severity::Error,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self.kind {
            SemanticErrorKind::UndefinedName { .. } => codes::UNDEFINED_NAME,
            SemanticErrorKind::UndefinedType { .. } => codes::UNDEFINED_TYPE,
            SemanticErrorKind::DuplicateDeclaration { .. } => codes::DUPLICATE_DECLARATION,
            SemanticErrorKind::UnusedVariable { .. } => codes::UNUSED_VARIABLE,
            SemanticErrorKind::UnreachableCode { .. } => codes::UNREACHABLE_CODE,
            SemanticErrorKind::AssignToImmutable { .. } => codes::ASSIGN_TO_IMMUTABLE,
        }
    }

    fn hint(&self) -> Option<String> {
        match &self.kind {
            SemanticErrorKind::DuplicateDeclaration { first_span, .. } => {
                Some(format!("first declared at {}", first_span.start()))
            }
            SemanticErrorKind::UnusedVariable { name } => {
                Some(format!("if this is intentional, rename it to '_{name}'"))
            }
            SemanticErrorKind::UnreachableCode { after } => {
                Some(format!("any code following '{after}' is never executed"))
            }
            SemanticErrorKind::AssignToImmutable { name, declared_at } => Some(format!(
                "declare it as 'let mut {name}' at {} to allow assignment",
                declared_at.start()
            )),
            SemanticErrorKind::UndefinedName { .. } | SemanticErrorKind::UndefinedType { .. } => {
                None
            }
        }
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(error: SemanticError) -> Self {
        let diagnostic = match error.severity() {
            Severity::Warning => Diagnostic::warning(error.kind.to_string(), error.span),
            _ => Diagnostic::error(error.kind.to_string(), error.span),
        }
        .with_code(error.code());
        match error.hint() {
            Some(hint) => diagnostic.with_hint(hint),
            None => diagnostic,
        }
    }
}
