//! Grammar-load smoke check.
//!
//! Constructs a language from a descriptor, installs it on a fresh parser
//! and throws both away. Any failure along the way is reported as a
//! [`GrammarLoadError`] with a fixed message.

use tracing::{debug, error};
use tree_sitter::Parser;

use crate::error::{GrammarLoadError, LoadError};
use crate::load::{language_from_raw, DescriptorFn};
use crate::GRAMMAR_NAME;

/// Runs the smoke check against the grammar compiled into this crate.
pub fn check() -> Result<(), GrammarLoadError> {
    // SAFETY: `descriptor` returns the statically compiled language.
    unsafe { check_with(crate::descriptor) }
}

/// Runs the smoke check against an arbitrary descriptor accessor.
///
/// # Safety
///
/// The pointer returned by `accessor` must satisfy the contract of
/// [`language_from_raw`].
pub unsafe fn check_with(accessor: DescriptorFn) -> Result<(), GrammarLoadError> {
    construct(accessor).map_err(|source| {
        error!(grammar = GRAMMAR_NAME, %source, "grammar failed to load");
        GrammarLoadError {
            grammar: GRAMMAR_NAME,
            source,
        }
    })
}

unsafe fn construct(accessor: DescriptorFn) -> Result<(), LoadError> {
    let language = language_from_raw(accessor())?;
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    debug!(grammar = GRAMMAR_NAME, "grammar loaded");
    Ok(())
}
