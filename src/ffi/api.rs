//! Exported entry points
//!
//! Each `extern "C"` function decodes its arguments, runs the engine, and
//! encodes the result into freshly allocated memory owned by the caller.
//! The fallible work happens in plain Rust helpers returning [`Result`].

use crate::config::{EngineConfig, HashAlgorithm};
use crate::core::{FileOutcome, HashEngine};
use crate::error::Result;
use crate::marshal::{
    alloc_foreign_string, from_foreign, read_foreign_string, release_foreign_array,
    release_foreign_string, to_foreign, HbStringArray,
};
use std::ffi::{c_char, CStr};
use std::ptr;

// ============================================================================
// Internal helpers
// ============================================================================

unsafe fn hash_file_inner(path: *const c_char, config: EngineConfig) -> Result<*mut c_char> {
    let path = unsafe { read_foreign_string(path) }?;
    let engine = HashEngine::sequential(config)?;
    alloc_foreign_string(&engine.hash_one(&path).to_wire())
}

unsafe fn hash_list_inner(
    paths: *const *const c_char,
    len: usize,
    config: EngineConfig,
) -> Result<HbStringArray> {
    let paths = unsafe { from_foreign(paths, len) }?;
    let engine = HashEngine::new(config)?;
    let wire: Vec<Vec<u8>> = engine
        .hash_many(&paths)
        .iter()
        .map(FileOutcome::to_wire)
        .collect();
    to_foreign(&wire)
}

fn config_for(algorithm: u32, max_in_flight: usize) -> Result<EngineConfig> {
    Ok(EngineConfig {
        algorithm: HashAlgorithm::from_code(algorithm)?,
        max_in_flight,
        ..Default::default()
    })
}

// ============================================================================
// Hashing
// ============================================================================

/// Hash one file with SHA-256
///
/// Returns the hex digest or an `Error: <message> Path: <path>` string, to
/// be released with [`hashbridge_free_string`]. Returns NULL if `path` is
/// NULL.
///
/// # Safety
///
/// `path` must be NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_hash_file(path: *const c_char) -> *mut c_char {
    unsafe { hashbridge_hash_file_with(path, HashAlgorithm::Sha256.code()) }
}

/// Hash one file with the algorithm identified by `algorithm`
///
/// Codes: 0 = SHA-256, 1 = BLAKE3, 2 = XXHash3, 3 = XXHash64.
///
/// # Safety
///
/// `path` must be NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_hash_file_with(
    path: *const c_char,
    algorithm: u32,
) -> *mut c_char {
    let result = config_for(algorithm, 1).and_then(|config| unsafe { hash_file_inner(path, config) });
    match result {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("hashbridge_hash_file: {}", e);
            ptr::null_mut()
        }
    }
}

/// Hash `len` files with SHA-256
///
/// Element `i` of the returned array is the result for `paths[i]`; the
/// returned `len` always equals the input `len`. Release the array with
/// [`hashbridge_free_string_array`]. Contract violations yield the null
/// handle.
///
/// # Safety
///
/// `paths` must be NULL (only with `len == 0`) or point to `len` valid
/// NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_hash_list(
    paths: *const *const c_char,
    len: usize,
) -> HbStringArray {
    unsafe { hashbridge_hash_list_with(paths, len, HashAlgorithm::Sha256.code(), 0) }
}

/// Hash `len` files with a chosen algorithm and concurrency cap
///
/// `max_in_flight` bounds the number of files open at once; 0 selects the
/// number of CPUs. Each call spawns its own worker threads, so prefer one
/// large batch over many small ones.
///
/// # Safety
///
/// Same requirements as [`hashbridge_hash_list`].
#[no_mangle]
pub unsafe extern "C" fn hashbridge_hash_list_with(
    paths: *const *const c_char,
    len: usize,
    algorithm: u32,
    max_in_flight: usize,
) -> HbStringArray {
    let result = config_for(algorithm, max_in_flight)
        .and_then(|config| unsafe { hash_list_inner(paths, len, config) });
    match result {
        Ok(array) => array,
        Err(e) => {
            tracing::error!("hashbridge_hash_list: {}", e);
            HbStringArray::null()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by this library
///
/// # Safety
///
/// `s` must be NULL or a string returned by `hashbridge_hash_file*` or
/// `hashbridge_version` that has not been freed. Never pass caller-owned
/// strings or elements of a returned array.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_free_string(s: *mut c_char) {
    unsafe { release_foreign_string(s) }
}

/// Free an array returned by this library, including every element
///
/// The handle is reset to the null handle, so freeing it again is a no-op.
/// Handles not produced by this library are refused and logged.
///
/// # Safety
///
/// `array` must be NULL or point to a handle returned by
/// `hashbridge_hash_list*` whose fields were not modified.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_free_string_array(array: *mut HbStringArray) {
    // SAFETY: as_mut maps NULL to None; otherwise a caller-held handle.
    let Some(array) = (unsafe { array.as_mut() }) else {
        return;
    };
    if let Err(e) = unsafe { release_foreign_array(array) } {
        tracing::error!("hashbridge_free_string_array: {}", e);
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Library version (caller must free with [`hashbridge_free_string`])
#[no_mangle]
pub extern "C" fn hashbridge_version() -> *mut c_char {
    alloc_foreign_string(crate::VERSION.as_bytes()).unwrap_or(ptr::null_mut())
}

/// Install a stderr log subscriber
///
/// `directive` is an `EnvFilter` directive such as `"debug"`; NULL defers to
/// `RUST_LOG`. Returns false if logging was already initialised or the
/// directive is not valid UTF-8.
///
/// # Safety
///
/// `directive` must be NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hashbridge_init_logging(directive: *const c_char, json: bool) -> bool {
    let directive = if directive.is_null() {
        None
    } else {
        // SAFETY: non-null, NUL-terminated per the caller contract.
        match unsafe { CStr::from_ptr(directive) }.to_str() {
            Ok(directive) => Some(directive),
            Err(e) => {
                tracing::error!("hashbridge_init_logging: directive is not UTF-8: {}", e);
                return false;
            }
        }
    };
    crate::logging::init_logging(directive, json)
}
