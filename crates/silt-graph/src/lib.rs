//! Read-only traversal of the commit DAG.
//!
//! Commits form a DAG through `parent` and `merge_parent` links. This crate
//! walks that graph directly over an [`ObjectStore`]: breadth-first ancestor
//! walks with distances, ancestry tests, first-parent history for log output,
//! and the split-point search that drives merges.
//!
//! All walks are pure reads over immutable commit objects; writers only ever
//! append new commits or move refs, so no synchronization is needed.
//!
//! [`ObjectStore`]: silt_store::ObjectStore

pub mod error;
pub mod split;
pub mod walk;

pub use error::{GraphError, GraphResult};
pub use split::{find_split_point, SplitPoint};
pub use walk::{ancestor_distances, first_parent_history, is_ancestor, load_commit, reachable_commits};
