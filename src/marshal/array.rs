//! Conversion between owned byte strings and C string arrays
//!
//! # Layout
//!
//! A [`HbStringArray`] is a contiguous block of `len` pointers, each to an
//! independently allocated NUL-terminated string. The element count always
//! travels with the block; a null slot is never an end marker.
//!
//! # Ownership
//!
//! - Arrays and strings *read* by this module belong to the caller and are
//!   never freed or mutated here.
//! - Arrays and strings *produced* by this module belong to the caller until
//!   they are handed back to [`release_foreign_array`] or
//!   [`release_foreign_string`], exactly once.

use crate::error::{HashBridgeError, Result};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Tag stamped on every array allocated by this library ("HBSA")
pub const HB_ALLOC_TAG: u32 = 0x4842_5341;

/// Owned array of C strings with an explicit length
///
/// `data == NULL` denotes the null handle, returned when a call fails its
/// contract checks. An empty successful result has `len == 0` and a
/// non-null `data`.
#[repr(C)]
#[derive(Debug)]
pub struct HbStringArray {
    /// Block of `len` string pointers
    pub data: *mut *mut c_char,
    /// Number of elements in `data`
    pub len: usize,
    /// Allocator tag, [`HB_ALLOC_TAG`] for arrays built here
    pub tag: u32,
}

impl HbStringArray {
    /// The null handle
    pub const fn null() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
            tag: 0,
        }
    }

    /// True for the null handle
    pub fn is_null(&self) -> bool {
        self.data.is_null()
    }
}

/// Copy `strings` into a newly allocated foreign array, preserving order
///
/// Every element is checked for interior NUL bytes before any pointer is
/// handed out, so a failure never leaves a partially built array behind.
pub fn to_foreign<S: AsRef<[u8]>>(strings: &[S]) -> Result<HbStringArray> {
    let owned = strings
        .iter()
        .enumerate()
        .map(|(index, s)| {
            CString::new(s.as_ref()).map_err(|_| HashBridgeError::InteriorNul { index })
        })
        .collect::<Result<Vec<CString>>>()?;

    let block: Box<[*mut c_char]> = owned.into_iter().map(CString::into_raw).collect();
    let len = block.len();
    let data = Box::into_raw(block) as *mut *mut c_char;

    Ok(HbStringArray {
        data,
        len,
        tag: HB_ALLOC_TAG,
    })
}

/// Copy `len` strings out of a caller-owned array
///
/// A null slot before `len` is reached is a contract violation.
///
/// # Safety
///
/// `data` must be null or point to at least `len` readable pointers, and
/// each non-null pointer must reference a NUL-terminated string that stays
/// valid for the duration of the call.
pub unsafe fn from_foreign(data: *const *const c_char, len: usize) -> Result<Vec<Vec<u8>>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if data.is_null() {
        return Err(HashBridgeError::NullArray { len });
    }

    // SAFETY: caller guarantees `data` addresses `len` pointer slots.
    let slots = unsafe { std::slice::from_raw_parts(data, len) };

    slots
        .iter()
        .enumerate()
        .map(|(index, &p)| {
            if p.is_null() {
                Err(HashBridgeError::NullElement { index, len })
            } else {
                // SAFETY: non-null and NUL-terminated per the caller contract.
                Ok(unsafe { CStr::from_ptr(p) }.to_bytes().to_vec())
            }
        })
        .collect()
}

/// Copy a single caller-owned C string
///
/// # Safety
///
/// `ptr` must be null or point to a valid NUL-terminated string.
pub unsafe fn read_foreign_string(ptr: *const c_char) -> Result<Vec<u8>> {
    if ptr.is_null() {
        return Err(HashBridgeError::NullString);
    }
    // SAFETY: checked non-null; termination guaranteed by the caller.
    Ok(unsafe { CStr::from_ptr(ptr) }.to_bytes().to_vec())
}

/// Allocate a single foreign string
pub fn alloc_foreign_string(bytes: &[u8]) -> Result<*mut c_char> {
    CString::new(bytes)
        .map(CString::into_raw)
        .map_err(|_| HashBridgeError::InteriorNul { index: 0 })
}

/// Free a string produced by [`alloc_foreign_string`]
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`alloc_foreign_string`] that
/// has not been released yet.
pub unsafe fn release_foreign_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: allocated by CString::into_raw in this module.
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Free an array produced by [`to_foreign`], including every element
///
/// The handle is reset to the null handle afterwards, so a repeated release
/// of the same handle value is a no-op. Handles whose tag does not match
/// are refused and left untouched.
///
/// # Safety
///
/// `array` must be the null handle or a handle returned by [`to_foreign`]
/// whose fields have not been modified.
pub unsafe fn release_foreign_array(array: &mut HbStringArray) -> Result<()> {
    if array.is_null() {
        return Ok(());
    }
    if array.tag != HB_ALLOC_TAG {
        return Err(HashBridgeError::ForeignAllocator {
            expected: HB_ALLOC_TAG,
            found: array.tag,
        });
    }

    // SAFETY: block was produced by Box::<[*mut c_char]>::into_raw with this length.
    let block = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(array.data, array.len)) };
    for &element in block.iter() {
        // SAFETY: every element came from CString::into_raw in `to_foreign`.
        unsafe { release_foreign_string(element) };
    }
    drop(block);

    *array = HbStringArray::null();
    Ok(())
}
