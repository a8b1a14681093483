//! Branch management, checkout, and reset.

use silt_refs::{Head, RefError, RefStore};
use silt_types::ObjectId;
use silt_worktree::restore;
use tracing::info;

use crate::error::{RepoError, RepoResult};
use crate::repo::Repository;

impl Repository {
    /// Create a branch pointing at the current head. The working tree and
    /// HEAD are untouched.
    pub fn branch(&self, name: &str) -> RepoResult<()> {
        let head = self.head_id()?;
        self.refs.create_branch(name, head).map_err(|e| match e {
            RefError::AlreadyExists { name } => RepoError::BranchExists { name },
            other => other.into(),
        })
    }

    /// Delete a branch pointer. History stays in the store.
    pub fn rm_branch(&self, name: &str) -> RepoResult<()> {
        self.refs.delete_branch(name).map_err(|e| match e {
            RefError::NotFound { name } => RepoError::BranchNotFound { name },
            RefError::DeleteCurrentBranch { name } => {
                RepoError::CannotRemoveCurrentBranch { name }
            }
            other => other.into(),
        })
    }

    /// Switch to a branch: restore its tip's snapshot and move HEAD.
    pub fn checkout_branch(&self, name: &str) -> RepoResult<()> {
        if self.refs.head()?.branch_name() == Some(name) {
            return Err(RepoError::CheckoutCurrentBranch);
        }
        let target_id = self
            .refs
            .read_branch(name)?
            .ok_or_else(|| RepoError::BranchNotFound {
                name: name.to_string(),
            })?;

        let target = self.read_commit(&target_id)?;
        let current = self.head_commit()?;
        restore(&self.worktree, &self.store, &target.snapshot, &current.snapshot)?;
        self.refs.set_head(name)?;
        self.clear_stage()?;
        info!(branch = name, "checked out branch");
        Ok(())
    }

    /// Overwrite one working file with HEAD's version.
    pub fn checkout_file(&self, name: &str) -> RepoResult<()> {
        let head = self.head_commit()?;
        Ok(silt_worktree::checkout_file(&self.worktree, &self.store, &head, name)?)
    }

    /// Overwrite one working file with its version in the given commit.
    pub fn checkout_file_at(&self, spec: &str, name: &str) -> RepoResult<()> {
        let commit = self.read_commit(&self.resolve_commit(spec)?)?;
        Ok(silt_worktree::checkout_file(&self.worktree, &self.store, &commit, name)?)
    }

    /// Restore the given commit's snapshot and move the current branch (or
    /// detached HEAD) to it.
    pub fn reset(&self, spec: &str) -> RepoResult<ObjectId> {
        let id = self.resolve_commit(spec)?;
        let target = self.read_commit(&id)?;
        let current = self.head_commit()?;
        restore(&self.worktree, &self.store, &target.snapshot, &current.snapshot)?;

        match self.refs.head()? {
            Head::Symbolic(branch) => self.refs.write_branch(&branch, id)?,
            Head::Detached(_) => self.refs.set_head_detached(id)?,
        }
        self.clear_stage()?;
        info!(target = %id.short_hex(), "reset");
        Ok(id)
    }
}
