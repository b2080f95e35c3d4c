//! Rust bindings for the `tree-sitter-wabznasm` grammar.
//!
//! This follows the standard layout used by Tree-sitter grammars: the build
//! script compiles the generated parser in `src/parser.c`, and [`language`]
//! returns the `tree_sitter::Language` handle for it.
//!
//! ```
//! let mut parser = tree_sitter::Parser::new();
//! parser
//!     .set_language(&tree_sitter_wabznasm::language())
//!     .expect("Error loading Wabznasm grammar");
//! let tree = parser.parse("add: {[x;y] x + y}", None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```
//!
//! [`load`] checks a descriptor before handing it to the runtime,
//! [`smoke`] runs the load a host performs when it installs the grammar, and
//! [`syntax`] has parse helpers that report syntax errors with positions.

use tree_sitter::ffi::TSLanguage;
use tree_sitter::Language;

mod error;
pub mod load;
pub mod smoke;
pub mod syntax;

pub use error::{GrammarLoadError, LoadError, ParseError};
pub use load::{try_language, DescriptorFn};

extern "C" {
    fn tree_sitter_wabznasm() -> *const TSLanguage;
}

/// Display name used in diagnostics.
pub const GRAMMAR_NAME: &str = "Wabznasm";

/// The content of the [`node-types.json`][] file for this grammar.
///
/// [`node-types.json`]: https://tree-sitter.github.io/tree-sitter/using-parsers#static-node-types
pub const NODE_TYPES: &str = include_str!("../../src/node-types.json");

/// The syntax highlighting query for this grammar.
pub const HIGHLIGHTS_QUERY: &str = include_str!("../../queries/highlights.scm");

/// Returns the raw grammar descriptor exported by the compiled parser.
pub fn descriptor() -> *const TSLanguage {
    unsafe { tree_sitter_wabznasm() }
}

/// Returns the Tree-sitter [`Language`] for this grammar.
pub fn language() -> Language {
    unsafe { load::wrap(tree_sitter_wabznasm()) }
}
