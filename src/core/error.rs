//! Error taxonomy for per-file processing.
//!
//! Every failure that can happen while handling a single source file is a
//! [`FileError`]. The batch driver collects them next to the file path and
//! keeps going with the other files.

use std::{fmt, io};

use thiserror::Error;

/// Malformed source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column} - {message}")]
pub struct ParseError {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    pub message: String,
}

/// Inserter steps that can fail. Block normalization always succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPhase {
    HookInjection,
    ImportInsertion,
}

impl fmt::Display for InsertionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InsertionPhase::HookInjection => "hook injection",
            InsertionPhase::ImportInsertion => "import insertion",
        };
        f.write_str(name)
    }
}

/// Contract violations inside the inserter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaffoldError {
    /// Hook injection reached a context whose body is still an expression.
    #[error("structural invariant violated: `{context}` has no block body to receive the hook")]
    StructuralInvariantViolation { context: String },
    /// The identifier to import is already bound by another import.
    #[error("`{identifier}` is already imported from {source_module}")]
    BindingConflict {
        identifier: String,
        source_module: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to insert translations ({phase}): {source}")]
pub struct InsertionError {
    pub phase: InsertionPhase,
    #[source]
    pub source: ScaffoldError,
}

impl InsertionError {
    pub fn new(phase: InsertionPhase, source: ScaffoldError) -> Self {
        Self { phase, source }
    }
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read file: {0}")]
    Read(#[source] io::Error),
    #[error("failed to parse file: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Insertion(#[from] InsertionError),
    #[error("failed to write file: {0}")]
    Write(#[source] io::Error),
}

impl FileError {
    /// Source location of the failure, when it has one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            FileError::Parse(err) => Some((err.line, err.column)),
            _ => None,
        }
    }
}
