//! Error types for HashBridge
//!
//! Per-file I/O failures are reported through [`HashBridgeError::Io`] and
//! kept local to the file that caused them. The remaining variants describe
//! misuse of the foreign boundary or configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HashBridge operations
#[derive(Error, Debug)]
pub enum HashBridgeError {
    /// I/O error while opening or reading a file
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A foreign array block pointer was null while its length was non-zero
    #[error("foreign array pointer is null but length is {len}")]
    NullArray { len: usize },

    /// A foreign array slot was null before the declared length was exhausted
    #[error("foreign array element {index} is null (declared length {len})")]
    NullElement { index: usize, len: usize },

    /// A foreign string pointer was null
    #[error("foreign string pointer is null")]
    NullString,

    /// A string scheduled for the foreign side contains an embedded NUL
    #[error("string at index {index} contains an interior NUL byte")]
    InteriorNul { index: usize },

    /// A handle was released that was not allocated by this library
    #[error("foreign handle tag mismatch: expected {expected:#x}, found {found:#x}")]
    ForeignAllocator { expected: u32, found: u32 },

    /// Unknown algorithm code passed across the boundary
    #[error("Unsupported hash algorithm code: {0}")]
    UnsupportedHashAlgorithm(u32),

    /// Thread pool error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HashBridgeError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// True for errors caused by a caller breaking the boundary contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::NullArray { .. }
                | Self::NullElement { .. }
                | Self::NullString
                | Self::InteriorNul { .. }
                | Self::ForeignAllocator { .. }
                | Self::UnsupportedHashAlgorithm(_)
        )
    }
}

/// Result type alias for HashBridge operations
pub type Result<T> = std::result::Result<T, HashBridgeError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| HashBridgeError::io(path, e))
    }
}
