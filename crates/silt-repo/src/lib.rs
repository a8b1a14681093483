//! Repository orchestration: the [`Repository`] type ties the object store,
//! reference store, staging area, working tree, and merge engine together
//! behind one API.
//!
//! Write ordering is the crate's one hard rule: object writes happen first,
//! ref updates last, the stage is cleared after the ref moves. An interrupted
//! operation can leave unreachable objects behind (they are harmless and
//! never collected) but never a ref pointing at missing history.

pub mod branch;
pub mod error;
pub mod inspect;
pub mod merge;
pub mod repo;

#[cfg(test)]
mod testutil;

pub use error::{RepoError, RepoResult};
pub use merge::MergeOutcome;
pub use repo::{Repository, DEFAULT_BRANCH, SILT_DIR};
