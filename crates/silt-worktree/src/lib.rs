//! Working-tree access and the safe restore used by checkout, reset, and
//! merge.
//!
//! The working tree is flat: tracked files live directly in the repository
//! root, and the metadata directory is skipped when listing. [`restore`]
//! materializes a commit's snapshot only after proving it will not clobber
//! uncommitted or untracked work.

pub mod error;
pub mod restore;
pub mod worktree;

pub use error::{WorktreeError, WorktreeResult};
pub use restore::{checkout_file, restore};
pub use worktree::Worktree;
