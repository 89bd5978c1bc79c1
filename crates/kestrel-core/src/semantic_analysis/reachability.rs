// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Unreachable code detection.
//!
//! Within one declaration list (the file, or a block), everything after a
//! statement that never falls through is unreachable. Only the first such
//! declaration is reported, so a dead tail of ten statements costs one
//! warning. A statement diverges if it is `return`, `break` or `continue`,
//! a block containing a diverging statement, or an `if` whose every branch
//! diverges.

use tracing::{debug, instrument};

use crate::ast::{Block, Declaration, ElseBranch, IfStatement, Statement};
use crate::source_analysis::Diagnostic;
use crate::visitor::RecursiveVisitor;

use super::error::{SemanticError, SemanticErrorKind};

/// Reports the first declaration after a diverging statement in each block.
#[derive(Debug, Default)]
pub struct ReachabilityChecker {
    errors: Vec<SemanticError>,
}

impl ReachabilityChecker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `declarations` and every nested block, returning the warnings.
    #[instrument(level = "debug", skip_all, fields(declarations = declarations.len()))]
    pub fn check(mut self, declarations: &[Declaration]) -> Vec<Diagnostic> {
        self.visit_declarations(declarations);
        debug!(warnings = self.errors.len(), "checked reachability");
        self.errors.into_iter().map(Into::into).collect()
    }
}

/// Returns the keyword that makes `statement` diverge, if it does.
fn divergence(statement: &Statement) -> Option<&'static str> {
    match statement {
        Statement::Return(_) => Some("return"),
        Statement::Break(_) => Some("break"),
        Statement::Continue(_) => Some("continue"),
        Statement::Block(block) => block_divergence(block),
        Statement::If(statement) => if_divergence(statement),
        Statement::Expression(_) | Statement::While(_) | Statement::For(_) => None,
    }
}

fn block_divergence(block: &Block) -> Option<&'static str> {
    block.declarations.iter().find_map(|declaration| match declaration {
        Declaration::Statement(statement) => divergence(statement),
        _ => None,
    })
}

fn if_divergence(statement: &IfStatement) -> Option<&'static str> {
    let then = block_divergence(&statement.then_branch)?;
    let otherwise = match statement.else_branch.as_ref()? {
        ElseBranch::Block(block) => block_divergence(block),
        ElseBranch::If(nested) => if_divergence(nested),
    };
    otherwise.and(Some(then))
}

impl<'ast> RecursiveVisitor<'ast> for ReachabilityChecker {
    fn visit_declarations(&mut self, declarations: &'ast [Declaration]) {
        let mut diverged: Option<&'static str> = None;
        let mut reported = false;
        for declaration in declarations {
            if let Some(after) = diverged {
                if !reported {
                    self.errors.push(SemanticError::new(
                        SemanticErrorKind::UnreachableCode { after },
                        declaration.span(),
                    ));
                    reported = true;
                }
            }
            self.visit_declaration(declaration);
            if diverged.is_none() {
                if let Declaration::Statement(statement) = declaration {
                    diverged = divergence(statement);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{Severity, codes, parse_source};

    fn check(source: &str) -> Vec<Diagnostic> {
        let output = parse_source(source, None);
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
        ReachabilityChecker::new().check(&output.declarations)
    }

    #[test]
    fn statement_after_return_is_flagged_once() {
        let source = "fn f() { return 1; let a = 2; a; }";
        let diagnostics = check(source);
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.code, Some(codes::UNREACHABLE_CODE));
        assert_eq!(&source[diagnostic.span.as_range()], "let a = 2;");
        assert_eq!(
            diagnostic.hint.as_deref(),
            Some("any code following 'return' is never executed")
        );
    }

    #[test]
    fn break_and_continue_diverge() {
        let diagnostics = check("while x { break; y; } for i in xs { continue; i; }");
        let hints: Vec<_> = diagnostics.iter().filter_map(|d| d.hint.as_deref()).collect();
        assert_eq!(
            hints,
            vec![
                "any code following 'break' is never executed",
                "any code following 'continue' is never executed",
            ]
        );
    }

    #[test]
    fn nothing_after_return_is_fine() {
        assert!(check("fn f(x) { if x { return 1; } return 2; }").is_empty());
    }

    #[test]
    fn return_in_one_branch_does_not_diverge() {
        assert!(check("fn f(x) { if x { return 1; } else { x; } x; }").is_empty());
    }

    #[test]
    fn if_with_every_branch_diverging() {
        let diagnostics =
            check("fn f(x) { if x { return 1; } else if y { return 2; } else { break; } x; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].hint.as_deref(),
            Some("any code following 'return' is never executed")
        );
    }

    #[test]
    fn nested_block_divergence_propagates() {
        let diagnostics = check("fn f() { { return; } g(); }");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn inner_blocks_are_checked_independently() {
        let diagnostics = check("fn f() { while x { break; a; } b; return; c; }");
        assert_eq!(diagnostics.len(), 2);
    }
}
