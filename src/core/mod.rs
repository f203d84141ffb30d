//! Core hash engine module
//!
//! Provides the bounded parallel hash engine and the tagged per-file
//! outcome it produces.

mod engine;
mod outcome;

pub use engine::*;
pub use outcome::*;
