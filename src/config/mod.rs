//! Configuration module for HashBridge
//!
//! Provides the engine configuration, digest algorithm selection,
//! and CLI arguments.

mod settings;

pub use settings::*;
