//! The [`RefStore`] trait defining the reference storage interface.

use std::path::{Path, PathBuf};

use silt_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::types::Head;

/// Storage backend for branches, HEAD, and remote entries.
///
/// Implementations must be thread-safe (`Send + Sync`). Ref updates are
/// single pointer writes; callers sequence them after all object writes so an
/// interrupted operation never publishes a dangling ref.
pub trait RefStore: Send + Sync {
    /// Read the commit digest a branch points to.
    ///
    /// Returns `Ok(None)` if the branch does not exist.
    fn read_branch(&self, name: &str) -> RefResult<Option<ObjectId>>;

    /// Write (create or move) a branch pointer. Validates the name.
    fn write_branch(&self, name: &str, target: ObjectId) -> RefResult<()>;

    /// Create a branch, failing with [`RefError::AlreadyExists`] if present.
    fn create_branch(&self, name: &str, target: ObjectId) -> RefResult<()> {
        if self.read_branch(name)?.is_some() {
            return Err(RefError::AlreadyExists {
                name: name.to_string(),
            });
        }
        self.write_branch(name, target)
    }

    /// Delete a branch.
    ///
    /// Fails with [`RefError::NotFound`] if absent and
    /// [`RefError::DeleteCurrentBranch`] if HEAD points at it.
    fn delete_branch(&self, name: &str) -> RefResult<()>;

    /// All branches as `(name, target)` pairs, sorted by name.
    fn branches(&self) -> RefResult<Vec<(String, ObjectId)>>;

    /// Read the current HEAD state.
    fn head(&self) -> RefResult<Head>;

    /// Set HEAD to point at a branch (symbolic ref).
    fn set_head(&self, branch: &str) -> RefResult<()>;

    /// Set HEAD to a detached state pointing directly to a commit.
    fn set_head_detached(&self, target: ObjectId) -> RefResult<()>;

    /// Read the repository root path a remote entry points to.
    fn read_remote(&self, name: &str) -> RefResult<Option<PathBuf>>;

    /// Add a remote entry, failing with [`RefError::RemoteExists`] if present.
    fn add_remote(&self, name: &str, path: &Path) -> RefResult<()>;

    /// Remove a remote entry, failing with [`RefError::RemoteNotFound`] if absent.
    fn remove_remote(&self, name: &str) -> RefResult<()>;

    /// All remotes as `(name, path)` pairs, sorted by name.
    fn remotes(&self) -> RefResult<Vec<(String, PathBuf)>>;
}
