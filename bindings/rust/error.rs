//! Error types for loading the grammar and parsing with it.

use thiserror::Error;
use tree_sitter::{LanguageError, QueryError};

use crate::syntax::SyntaxIssue;

/// Why a grammar descriptor could not be turned into a usable language.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The descriptor accessor returned a null pointer.
    #[error("grammar descriptor is null")]
    NullDescriptor,

    /// The descriptor was built for an ABI this runtime cannot read.
    #[error("grammar ABI version {version} is outside the supported range {min}..={max}")]
    IncompatibleVersion {
        version: usize,
        min: usize,
        max: usize,
    },

    /// The header passed the version check but describes no grammar.
    #[error("grammar descriptor has empty tables ({symbols} symbols, {states} states)")]
    EmptyTables { symbols: usize, states: usize },

    /// The parser refused the language when it was installed.
    #[error(transparent)]
    Rejected(#[from] LanguageError),
}

/// Failure reported by the grammar-load smoke check.
///
/// The message is fixed; the specific cause is kept as the error source.
#[derive(Debug, Error)]
#[error("Error loading {grammar} grammar")]
pub struct GrammarLoadError {
    pub grammar: &'static str,
    #[source]
    pub source: LoadError,
}

/// Errors from the parse helpers in [`crate::syntax`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("parsing was cancelled before a tree was produced")]
    Cancelled,

    #[error("invalid query: {0}")]
    Query(#[from] QueryError),

    /// The tree contains `ERROR` or `MISSING` nodes. `line` and `column`
    /// locate the first one and are 1-based.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        issues: Vec<SyntaxIssue>,
    },
}
