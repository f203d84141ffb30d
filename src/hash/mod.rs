//! Hash computation module
//!
//! Streaming digests over file content using SHA-256, BLAKE3 or XXHash.

mod integrity;

pub use integrity::*;
