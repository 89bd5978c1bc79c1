// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scope tracking for semantic analysis.
//!
//! Scopes are organized hierarchically. Depth 0 is the file (plus any
//! prelude names); each function, block, `for` loop and `match` arm pushes
//! a new level. Values and types live in separate namespaces, so a type and
//! a variable may share a name.

use std::collections::HashMap;

use ecow::EcoString;

use crate::source_analysis::Span;

/// Which namespace a name is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Variables, parameters and functions.
    Value,
    /// Type aliases and built-in types.
    Type,
}

/// The kind of binding in a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `let` binding
    Local,
    /// Function parameter
    Parameter,
    /// `fn` declaration
    Function,
    /// `type` declaration
    TypeAlias,
    /// `for` loop variable
    LoopVariable,
    /// Name bound by a `match` pattern
    PatternBinding,
    /// Predeclared name or built-in type
    Prelude,
}

/// A binding in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: EcoString,
    pub defined_at: Span,
    pub depth: usize,
    pub kind: BindingKind,
    /// True for `let mut` and for a `let` without an initializer, whose
    /// first assignment initializes it.
    pub assignable: bool,
    /// Set once the binding is read.
    pub used: bool,
}

#[derive(Debug, Clone, Default)]
struct ScopeLevel {
    values: HashMap<EcoString, Binding>,
    types: HashMap<EcoString, Binding>,
}

impl ScopeLevel {
    fn namespace(&self, namespace: Namespace) -> &HashMap<EcoString, Binding> {
        match namespace {
            Namespace::Value => &self.values,
            Namespace::Type => &self.types,
        }
    }

    fn namespace_mut(&mut self, namespace: Namespace) -> &mut HashMap<EcoString, Binding> {
        match namespace {
            Namespace::Value => &mut self.values,
            Namespace::Type => &mut self.types,
        }
    }
}

/// Tracks name definitions across nested scopes.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Stack of scope levels; never empty.
    levels: Vec<ScopeLevel>,
}

impl Scope {
    /// Creates a new scope tracker with the file-level scope (depth 0).
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: vec![ScopeLevel::default()],
        }
    }

    /// Enters a new nested scope.
    pub fn push(&mut self) {
        self.levels.push(ScopeLevel::default());
    }

    /// Exits the current scope, returning its value bindings in the order
    /// they were declared.
    ///
    /// Returns `None` at file level; the file-level scope is never popped.
    pub fn pop(&mut self) -> Option<Vec<Binding>> {
        if self.levels.len() <= 1 {
            return None;
        }
        let level = self.levels.pop()?;
        let mut bindings: Vec<_> = level.values.into_values().collect();
        bindings.sort_by_key(|binding| binding.defined_at.start().byte_offset());
        Some(bindings)
    }

    /// Defines a name in the current scope.
    ///
    /// If the name is already defined in this scope and namespace, nothing
    /// changes and the existing binding is returned as the error. Prelude
    /// bindings are the exception: a declaration in the source replaces them.
    pub fn define(
        &mut self,
        namespace: Namespace,
        name: &str,
        span: Span,
        kind: BindingKind,
    ) -> Result<(), Binding> {
        let depth = self.current_depth();
        let Some(level) = self.levels.last_mut() else {
            return Ok(());
        };
        let names = level.namespace_mut(namespace);
        match names.get(name) {
            Some(existing) if existing.kind != BindingKind::Prelude => {
                return Err(existing.clone());
            }
            _ => {}
        }
        names.insert(
            name.into(),
            Binding {
                name: name.into(),
                defined_at: span,
                depth,
                kind,
                assignable: false,
                used: false,
            },
        );
        Ok(())
    }

    /// Marks a value binding in the current scope as assignable.
    pub fn set_assignable(&mut self, name: &str) {
        if let Some(binding) = self
            .levels
            .last_mut()
            .and_then(|level| level.values.get_mut(name))
        {
            binding.assignable = true;
        }
    }

    /// Looks up a name, searching from innermost to outermost scope.
    #[must_use]
    pub fn lookup(&self, namespace: Namespace, name: &str) -> Option<&Binding> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| level.namespace(namespace).get(name))
    }

    /// Looks up a value binding and marks it as used.
    ///
    /// Returns the binding if found.
    pub fn use_value(&mut self, name: &str) -> Option<&Binding> {
        let binding = self
            .levels
            .iter_mut()
            .rev()
            .find_map(|level| level.values.get_mut(name))?;
        binding.used = true;
        Some(binding)
    }

    /// Returns the current scope depth (0 = file).
    #[must_use]
    pub fn current_depth(&self) -> usize {
        self.levels.len() - 1
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
