//! Foundation types for silt.
//!
//! Every other silt crate depends on this one. It provides:
//!
//! - [`ObjectId`] — content-addressed identifier (BLAKE3 hash)
//! - [`TypeError`] — errors from parsing and converting those types

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
