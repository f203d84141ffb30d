//! Marshaling between in-process strings and the C string-array layout

mod array;

pub use array::*;
