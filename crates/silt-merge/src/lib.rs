//! The merge engine: split-point classification mapped to outcomes, then
//! per-file three-way resolution of two snapshots against their common base.
//!
//! Conflicts are not failures. A conflicted file resolves to a synthesized
//! marker blob containing both sides, the merge completes, and the caller
//! reports which files conflicted.

pub mod error;
pub mod resolve;

pub use error::{MergeError, MergeResult};
pub use resolve::{merge_tips, resolve_snapshots, Resolution};
