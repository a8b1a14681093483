//! Line diffs between two versions of a tracked file.
//!
//! A version is optional: `None` means the file is absent on that side, so
//! additions and deletions of whole files fall out of the same comparison.
//! Built on the `similar` crate (Myers diff) with three lines of context.

pub mod diff;
pub mod render;

pub use diff::{diff_versions, DiffHunk, DiffLine, FileChange, FileDiff};
pub use render::unified;
