// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Name resolution.
//!
//! [`ScopeResolver`] walks the tree with a [`Scope`] stack and reports:
//!
//! - uses of names that are not declared in any enclosing scope
//! - names declared twice in the same scope
//! - type names that are neither built in nor declared
//! - local `let` bindings that are never read (as warnings)
//! - assignments to bindings that were not declared `mut`
//!
//! `fn` and `type` declarations are hoisted: they are visible throughout
//! the block (or file) that contains them, so functions may call each other
//! regardless of order. `let` bindings are visible from the declaration
//! onwards, and a `let` initializer is resolved before its own name is.

use ecow::EcoString;
use tracing::{debug, instrument};

use crate::ast::{
    AssignmentExpression, AssignmentOperator, BindingPattern, Block, Declaration, Expression,
    ForStatement, FunctionDeclaration, Identifier, LetDeclaration, MatchArm, TypeExpr,
};
use crate::source_analysis::{Diagnostic, Span};
use crate::visitor::{RecursiveVisitor, walk_let, walk_match_arm, walk_type};

use super::error::{SemanticError, SemanticErrorKind};
use super::scope::{BindingKind, Namespace, Scope};

/// Type names that are always in scope.
pub const BUILTIN_TYPES: &[&str] = &["int", "float", "bool", "string", "List", "Option"];

/// Resolves names in a parsed file.
#[derive(Debug)]
pub struct ScopeResolver {
    scope: Scope,
    errors: Vec<SemanticError>,
    report_unused: bool,
}

impl ScopeResolver {
    /// Creates a resolver with the built-in types and `prelude` values in
    /// the file-level scope.
    #[must_use]
    pub fn new(prelude: &[EcoString]) -> Self {
        let mut scope = Scope::new();
        let types = BUILTIN_TYPES.iter().map(|&name| (Namespace::Type, name));
        let values = prelude.iter().map(|name| (Namespace::Value, name.as_str()));
        for (namespace, name) in types.chain(values) {
            if scope.lookup(namespace, name).is_some() {
                debug!(name, ?namespace, "skipping repeated prelude name");
                continue;
            }
            // Cannot fail: the name was just looked up.
            let _ = scope.define(namespace, name, Span::default(), BindingKind::Prelude);
        }
        Self {
            scope,
            errors: Vec::new(),
            report_unused: true,
        }
    }

    /// Enables or disables unused-variable warnings.
    #[must_use]
    pub fn report_unused(mut self, enabled: bool) -> Self {
        self.report_unused = enabled;
        self
    }

    /// Resolves every name in `declarations`, returning the diagnostics.
    #[instrument(level = "debug", skip_all, fields(declarations = declarations.len()))]
    pub fn resolve(mut self, declarations: &[Declaration]) -> Vec<Diagnostic> {
        self.hoist(declarations);
        self.visit_declarations(declarations);
        debug!(problems = self.errors.len(), "resolved names");
        self.errors.into_iter().map(Into::into).collect()
    }

    /// Declares the `fn` and `type` names of a declaration list up front.
    fn hoist(&mut self, declarations: &[Declaration]) {
        for declaration in declarations {
            match declaration {
                Declaration::Function(function) => {
                    self.declare(Namespace::Value, &function.name, BindingKind::Function);
                }
                Declaration::TypeAlias(alias) => {
                    self.declare(Namespace::Type, &alias.name, BindingKind::TypeAlias);
                }
                Declaration::Let(_) | Declaration::Statement(_) => {}
            }
        }
    }

    /// Defines `name` in the current scope, reporting a duplicate.
    ///
    /// Returns true if the name was newly defined.
    fn declare(&mut self, namespace: Namespace, name: &Identifier, kind: BindingKind) -> bool {
        match self.scope.define(namespace, &name.name, name.span, kind) {
            Ok(()) => true,
            Err(existing) => {
                self.errors.push(SemanticError::new(
                    SemanticErrorKind::DuplicateDeclaration {
                        name: name.name.clone(),
                        first_span: existing.defined_at,
                    },
                    name.span,
                ));
                false
            }
        }
    }

    /// Pops the current scope, reporting `let` bindings that were never read.
    fn pop_scope(&mut self) {
        let Some(bindings) = self.scope.pop() else {
            return;
        };
        if !self.report_unused {
            return;
        }
        for binding in bindings {
            if binding.kind == BindingKind::Local && !binding.used && !binding.name.starts_with('_')
            {
                self.errors.push(SemanticError::new(
                    SemanticErrorKind::UnusedVariable { name: binding.name },
                    binding.defined_at,
                ));
            }
        }
    }

    /// Checks the identifier on the left of an assignment.
    ///
    /// Plain `=` does not count as a read; compound operators do.
    fn check_assignment_target(&mut self, target: &Identifier, reads: bool) {
        let binding = if reads {
            self.scope.use_value(&target.name)
        } else {
            self.scope.lookup(Namespace::Value, &target.name)
        };
        let Some(binding) = binding else {
            self.errors.push(SemanticError::new(
                SemanticErrorKind::UndefinedName {
                    name: target.name.clone(),
                },
                target.span,
            ));
            return;
        };
        if !binding.assignable {
            let declared_at = binding.defined_at;
            self.errors.push(SemanticError::new(
                SemanticErrorKind::AssignToImmutable {
                    name: target.name.clone(),
                    declared_at,
                },
                target.span,
            ));
        }
    }
}

impl<'ast> RecursiveVisitor<'ast> for ScopeResolver {
    fn visit_let(&mut self, declaration: &'ast LetDeclaration) {
        walk_let(self, declaration);
        let defined = self.declare(Namespace::Value, &declaration.name, BindingKind::Local);
        if defined && (declaration.mutable || declaration.initializer.is_none()) {
            self.scope.set_assignable(&declaration.name.name);
        }
    }

    fn visit_function(&mut self, declaration: &'ast FunctionDeclaration) {
        self.scope.push();
        for parameter in &declaration.parameters {
            if let Some(ty) = &parameter.type_annotation {
                self.visit_type(ty);
            }
            self.declare(Namespace::Value, &parameter.name, BindingKind::Parameter);
        }
        if let Some(ty) = &declaration.return_type {
            self.visit_type(ty);
        }
        self.visit_block(&declaration.body);
        self.pop_scope();
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.scope.push();
        self.hoist(&block.declarations);
        self.visit_declarations(&block.declarations);
        self.pop_scope();
    }

    fn visit_for(&mut self, statement: &'ast ForStatement) {
        self.visit_expression(&statement.iterable);
        self.scope.push();
        self.declare(Namespace::Value, &statement.binding, BindingKind::LoopVariable);
        self.visit_block(&statement.body);
        self.pop_scope();
    }

    fn visit_match_arm(&mut self, arm: &'ast MatchArm) {
        self.scope.push();
        walk_match_arm(self, arm);
        self.pop_scope();
    }

    fn visit_binding_pattern(&mut self, pattern: &'ast BindingPattern) {
        self.declare(Namespace::Value, &pattern.name, BindingKind::PatternBinding);
    }

    fn visit_identifier(&mut self, identifier: &'ast Identifier) {
        if self.scope.use_value(&identifier.name).is_none() {
            self.errors.push(SemanticError::new(
                SemanticErrorKind::UndefinedName {
                    name: identifier.name.clone(),
                },
                identifier.span,
            ));
        }
    }

    fn visit_assignment(&mut self, expression: &'ast AssignmentExpression) {
        match expression.target.as_ref() {
            Expression::Identifier(target) => {
                let reads = expression.operator != AssignmentOperator::Assign;
                self.check_assignment_target(target, reads);
            }
            target => self.visit_expression(target),
        }
        self.visit_expression(&expression.value);
    }

    fn visit_type(&mut self, ty: &'ast TypeExpr) {
        if let TypeExpr::Named { name, .. } = ty {
            if self.scope.lookup(Namespace::Type, &name.name).is_none() {
                self.errors.push(SemanticError::new(
                    SemanticErrorKind::UndefinedType {
                        name: name.name.clone(),
                    },
                    name.span,
                ));
            }
        }
        walk_type(self, ty);
    }
}
