//! C ABI for HashBridge
//!
//! # Usage from C
//!
//! ```c
//! #include "hashbridge.h"
//!
//! const char *paths[] = { "/etc/hostname", "/missing" };
//! HbStringArray out = hashbridge_hash_list(paths, 2);
//! for (size_t i = 0; i < out.len; i++) {
//!     if (strncmp(out.data[i], "Error: ", 7) == 0) { /* failed */ }
//! }
//! hashbridge_free_string_array(&out);
//! ```
//!
//! # Usage from Python (ctypes)
//!
//! ```python
//! class HbStringArray(ctypes.Structure):
//!     _fields_ = [("data", ctypes.POINTER(ctypes.c_char_p)),
//!                 ("len", ctypes.c_size_t),
//!                 ("tag", ctypes.c_uint32)]
//!
//! lib.hashbridge_hash_list.restype = HbStringArray
//! out = lib.hashbridge_hash_list((ctypes.c_char_p * n)(*paths), n)
//! hashes = [out.data[i].decode() for i in range(out.len)]
//! lib.hashbridge_free_string_array(ctypes.byref(out))
//! ```
//!
//! # Memory Management
//!
//! - Input arrays and strings stay owned by the caller; they are only read.
//! - Every string returned must be passed to `hashbridge_free_string()` once.
//! - Every array returned must be passed to `hashbridge_free_string_array()`
//!   once. This frees the block and every string in it; do not free the
//!   elements separately.
//!
//! # Contract Violations
//!
//! Null inputs where data is required, null slots inside the declared
//! length, and unknown algorithm codes are logged at error level and
//! answered with a null pointer or the null array handle.

mod api;

pub use api::*;
