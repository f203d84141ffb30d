//! Per-file hashing outcome and its wire form
//!
//! Inside the process every file yields a tagged [`FileOutcome`]. Only at the
//! foreign boundary (and in CLI text output) is it flattened into a single
//! string: either the lowercase hex digest, or
//! `Error: <message> Path: <path>`.

use crate::error::HashBridgeError;
use crate::hash::Digest;
use serde::Serialize;

/// Literal prefix of every failure on the wire
pub const ERROR_PREFIX: &str = "Error: ";

/// Separator between the failure message and the path on the wire
pub const PATH_SEPARATOR: &str = " Path: ";

/// Why a single file could not be hashed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// Raw path bytes as received
    #[serde(serialize_with = "serialize_lossy")]
    pub path: Vec<u8>,
    /// Classification of the underlying I/O error
    #[serde(serialize_with = "serialize_kind")]
    pub kind: std::io::ErrorKind,
    /// Human-readable description
    pub message: String,
}

impl FileFailure {
    /// Build a failure record from a hashing error
    pub fn from_error(path: &[u8], error: &HashBridgeError) -> Self {
        let kind = match error {
            HashBridgeError::Io { source, .. } => source.kind(),
            _ => std::io::ErrorKind::Other,
        };
        Self {
            path: path.to_vec(),
            kind,
            message: error.to_string(),
        }
    }
}

/// Result of hashing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// Slot allocated, file not processed yet
    Pending,
    /// Content digest computed
    Hashed(Digest),
    /// File could not be opened or read
    Failed(FileFailure),
}

impl FileOutcome {
    /// True once the slot holds a digest or a failure
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// True for failed files
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The digest, if hashing succeeded
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Hashed(d) => Some(d),
            _ => None,
        }
    }

    /// Flatten into the boundary wire format
    ///
    /// Path bytes are copied verbatim. NUL bytes in the message are replaced
    /// so the result is always a valid C string when the path is.
    pub fn to_wire(&self) -> Vec<u8> {
        match self {
            Self::Hashed(d) => d.hex.clone().into_bytes(),
            Self::Failed(f) => {
                let message = f.message.replace('\0', "\u{FFFD}");
                let mut wire = Vec::with_capacity(
                    ERROR_PREFIX.len() + message.len() + PATH_SEPARATOR.len() + f.path.len(),
                );
                wire.extend_from_slice(ERROR_PREFIX.as_bytes());
                wire.extend_from_slice(message.as_bytes());
                wire.extend_from_slice(PATH_SEPARATOR.as_bytes());
                wire.extend_from_slice(&f.path);
                wire
            }
            Self::Pending => format!("{}Not populated", ERROR_PREFIX).into_bytes(),
        }
    }

    /// Wire format as a (lossily decoded) string
    pub fn to_wire_string(&self) -> String {
        String::from_utf8_lossy(&self.to_wire()).into_owned()
    }
}

/// Detect the failure sentinel in a wire result
///
/// Digests are fixed-length hex and can never start with the prefix.
pub fn is_error_sentinel(wire: &[u8]) -> bool {
    wire.starts_with(ERROR_PREFIX.as_bytes())
}

fn serialize_lossy<S: serde::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&String::from_utf8_lossy(bytes))
}

fn serialize_kind<S: serde::Serializer>(kind: &std::io::ErrorKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:?}", kind))
}
