// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Kestrel compiler front end.
//!
//! This crate contains the front half of the Kestrel compiler:
//! - Lexical analysis (tokenization)
//! - Parsing with error recovery (AST construction)
//! - A visitor framework for traversing the AST
//! - Semantic analyses built on the visitor framework (scopes, reachability)
//! - An unparser that renders the AST back to canonical source
//!
//! Every stage is a pure function from its input to `(output, diagnostics)`,
//! so independent files can be processed on separate threads without any
//! shared state.
//!
//! ```
//! use kestrel_core::source_analysis::parse_source;
//!
//! let output = parse_source("let x = 5;", None);
//! assert_eq!(output.declarations.len(), 1);
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod semantic_analysis;
pub mod source_analysis;
pub mod unparse;
pub mod visitor;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Declaration, Expression, Identifier, Literal, Pattern, Statement};
    pub use crate::source_analysis::{Diagnostic, Severity, Span, parse_source, tokenize};
    pub use crate::visitor::{Node, RecursiveVisitor, Visitor, accept};
}
