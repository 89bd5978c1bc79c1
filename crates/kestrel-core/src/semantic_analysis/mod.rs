// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis for Kestrel.
//!
//! Analyses run over a parsed file and report problems as diagnostics:
//! - Name resolution (via [`scope_resolver`]): undefined and duplicate names,
//!   undefined types, unused locals, assignment to immutable bindings
//! - Unreachable code (via [`reachability`])
//!
//! Every analysis is a [`RecursiveVisitor`](crate::visitor::RecursiveVisitor)
//! and never stops early; it runs happily on a tree recovered from syntax
//! errors.

use ecow::EcoString;
use tracing::{debug, instrument};

use crate::ast::Declaration;
use crate::source_analysis::Diagnostic;

pub mod error;
pub mod reachability;
pub mod scope;
pub mod scope_resolver;


pub use error::{SemanticError, SemanticErrorKind};
pub use reachability::ReachabilityChecker;
pub use scope::{Binding, BindingKind, Namespace, Scope};
pub use scope_resolver::{BUILTIN_TYPES, ScopeResolver};

/// Selects which analyses [`analyze`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Run the scope resolver.
    pub scopes: bool,
    /// Run the reachability checker.
    pub reachability: bool,
    /// Warn on `let` bindings that are never read. Only applies when
    /// `scopes` is set.
    pub unused_variables: bool,
    /// Value names treated as declared before the file starts.
    pub prelude: Vec<EcoString>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            scopes: true,
            reachability: true,
            unused_variables: true,
            prelude: vec!["print".into()],
        }
    }
}

/// Runs the enabled analyses over `declarations`.
///
/// Diagnostics are returned grouped by analysis: scope problems first, then
/// reachability warnings.
#[instrument(skip_all)]
pub fn analyze(declarations: &[Declaration], options: &AnalysisOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if options.scopes {
        diagnostics.extend(
            ScopeResolver::new(&options.prelude)
                .report_unused(options.unused_variables)
                .resolve(declarations),
        );
    }
    if options.reachability {
        diagnostics.extend(ReachabilityChecker::new().check(declarations));
    }
    debug!(count = diagnostics.len(), "semantic analysis complete");
    diagnostics
}
