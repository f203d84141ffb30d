//! # HashBridge - Concurrent File Hashing over a C ABI
//!
//! HashBridge computes content digests for lists of files and hands the
//! results to callers on the other side of a C ABI, in a memory layout
//! they can read and must explicitly release.
//!
//! ## Features
//!
//! - **Ordered parallel hashing**: one result per input path, in input order
//! - **Failure isolation**: a file that cannot be read never affects the others
//! - **Bounded concurrency**: a capped worker pool limits open file handles
//! - **Streaming digests**: SHA-256 (default), BLAKE3, XXHash3, XXHash64
//! - **Explicit ownership**: every returned allocation has one release call
//!
//! ## Quick Start
//!
//! ```no_run
//! use hashbridge::core::HashEngine;
//! use hashbridge::config::EngineConfig;
//!
//! let engine = HashEngine::new(EngineConfig::default()).unwrap();
//! let results = engine.hash_many(&["/etc/hostname", "/does/not/exist"]);
//!
//! for result in &results {
//!     println!("{}", result.to_wire_string());
//! }
//! ```
//!
//! ## Marshaling
//!
//! ```no_run
//! use hashbridge::marshal::{from_foreign, release_foreign_array, to_foreign};
//!
//! let mut array = to_foreign(&["a", "b"]).unwrap();
//! let back = unsafe { from_foreign(array.data as *const _, array.len) }.unwrap();
//! assert_eq!(back, vec![b"a".to_vec(), b"b".to_vec()]);
//! unsafe { release_foreign_array(&mut array) }.unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod ffi;
pub mod hash;
pub mod logging;
pub mod marshal;

// Re-export commonly used types
pub use crate::config::{EngineConfig, HashAlgorithm};
pub use crate::core::{FileOutcome, HashEngine};
pub use crate::error::{HashBridgeError, Result};
pub use crate::marshal::HbStringArray;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use hashbridge::prelude::*;
    //! ```

    pub use crate::config::{EngineConfig, HashAlgorithm};
    pub use crate::core::{is_error_sentinel, FileFailure, FileOutcome, HashEngine};
    pub use crate::error::{HashBridgeError, Result};
    pub use crate::hash::{hash_bytes, hash_file_with_buffer, Digest};
    pub use crate::marshal::{from_foreign, to_foreign, HbStringArray};
}
