//! Checked construction of a [`Language`] from a raw grammar descriptor.
//!
//! [`crate::language`] trusts the compiled parser unconditionally. The
//! functions here look at the descriptor first, so a null pointer or a
//! descriptor generated for another ABI turns into a [`LoadError`] instead
//! of undefined behavior inside the runtime.

use tracing::{debug, warn};
use tree_sitter::ffi::{self, TSLanguage};
use tree_sitter::{Language, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

use crate::error::LoadError;

/// A zero-argument accessor returning a grammar descriptor.
pub type DescriptorFn = fn() -> *const TSLanguage;

/// Builds a [`Language`] from a raw descriptor.
///
/// # Safety
///
/// `ptr` must be null or point to memory that can be read as a `TSLanguage`
/// header. If the header checks pass, `ptr` must point to a complete
/// language that outlives the returned value.
pub unsafe fn language_from_raw(ptr: *const TSLanguage) -> Result<Language, LoadError> {
    if ptr.is_null() {
        warn!("grammar descriptor is null");
        return Err(LoadError::NullDescriptor);
    }

    let version = ffi::ts_language_version(ptr) as usize;
    let symbols = ffi::ts_language_symbol_count(ptr) as usize;
    let states = ffi::ts_language_state_count(ptr) as usize;
    let checked = check_version(version).and_then(|()| check_tables(symbols, states));
    if let Err(err) = checked {
        warn!(%err, "grammar descriptor refused");
        return Err(err);
    }

    debug!(version, symbols, states, "grammar descriptor accepted");
    Ok(wrap(ptr))
}

/// Wraps a descriptor pointer without looking at it.
///
/// # Safety
///
/// `ptr` must point to a complete language that outlives the returned value.
pub(crate) unsafe fn wrap(ptr: *const TSLanguage) -> Language {
    // `Language` is a transparent wrapper around the descriptor pointer.
    std::mem::transmute::<*const TSLanguage, Language>(ptr)
}

/// Checks an ABI version against the range the linked runtime supports.
pub fn check_version(version: usize) -> Result<(), LoadError> {
    if (MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version) {
        Ok(())
    } else {
        Err(LoadError::IncompatibleVersion {
            version,
            min: MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: LANGUAGE_VERSION,
        })
    }
}

/// Refuses a header that declares no symbols or no parse states.
pub fn check_tables(symbols: usize, states: usize) -> Result<(), LoadError> {
    if symbols == 0 || states == 0 {
        Err(LoadError::EmptyTables { symbols, states })
    } else {
        Ok(())
    }
}

/// Loads the built-in grammar through the checked path.
pub fn try_language() -> Result<Language, LoadError> {
    // SAFETY: the descriptor comes from the parser compiled into this crate.
    unsafe { language_from_raw(crate::descriptor()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C, align(8))]
    struct Header([u32; 64]);

    fn header(version: u32) -> Header {
        let mut words = [0u32; 64];
        words[0] = version;
        Header(words)
    }

    #[test]
    fn built_in_descriptor_loads() {
        let language = try_language().expect("built-in grammar should load");
        assert_eq!(language.version(), 14);
        assert!(language.node_kind_count() > 0);
    }

    #[test]
    fn null_descriptor_is_rejected() {
        let err = unsafe { language_from_raw(std::ptr::null()) }.unwrap_err();
        assert!(matches!(err, LoadError::NullDescriptor));
    }

    #[test]
    fn zeroed_descriptor_is_rejected() {
        let header = [0u64; 32];
        let err = unsafe { language_from_raw(header.as_ptr().cast()) }.unwrap_err();
        assert!(matches!(
            err,
            LoadError::IncompatibleVersion { version: 0, .. }
        ));
    }

    #[test]
    fn future_abi_is_rejected() {
        let header = header(99);
        let err = unsafe { language_from_raw(header.0.as_ptr().cast()) }.unwrap_err();
        assert!(matches!(
            err,
            LoadError::IncompatibleVersion { version: 99, .. }
        ));
    }

    #[test]
    fn current_abi_with_empty_tables_is_rejected() {
        let header = header(LANGUAGE_VERSION as u32);
        let err = unsafe { language_from_raw(header.0.as_ptr().cast()) }.unwrap_err();
        assert!(matches!(
            err,
            LoadError::EmptyTables {
                symbols: 0,
                states: 0
            }
        ));
    }

    #[test]
    fn tables_need_symbols_and_states() {
        assert!(check_tables(41, 70).is_ok());
        assert!(check_tables(0, 70).is_err());
        assert!(check_tables(41, 0).is_err());
    }

    #[test]
    fn version_range_is_inclusive() {
        assert!(check_version(MIN_COMPATIBLE_LANGUAGE_VERSION).is_ok());
        assert!(check_version(LANGUAGE_VERSION).is_ok());
        assert!(check_version(MIN_COMPATIBLE_LANGUAGE_VERSION - 1).is_err());
        assert!(check_version(LANGUAGE_VERSION + 1).is_err());
    }

    #[test]
    fn incompatible_version_message_names_the_range() {
        let err = check_version(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "grammar ABI version 0 is outside the supported range \
                 {MIN_COMPATIBLE_LANGUAGE_VERSION}..={LANGUAGE_VERSION}"
            )
        );
    }
}
