//! Shared helpers for the core passes.
//!
//! - `ast`: AST predicates (translation calls, hook names, directive prologues)

pub mod ast;

pub use ast::*;
