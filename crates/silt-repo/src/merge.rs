//! The merge driver: preconditions, engine invocation, and the merge commit.

use chrono::Utc;
use silt_merge::merge_tips;
use silt_refs::{Head, RefStore};
use silt_store::Commit;
use silt_types::ObjectId;
use silt_worktree::restore;
use tracing::info;

use crate::error::{RepoError, RepoResult};
use crate::repo::Repository;

/// A completed merge.
///
/// `conflicts` names the files committed with conflict markers; the merge
/// commit exists either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merge commit.
    pub commit_id: ObjectId,
    /// Sorted names of conflicted files, empty for a clean merge.
    pub conflicts: Vec<String>,
}

impl Repository {
    /// Merge `other` into the current branch.
    ///
    /// Requires a clean stage and a symbolic HEAD. The engine's short-circuit
    /// outcomes surface as errors and leave the repository untouched; a real
    /// merge restores the resolved snapshot and commits it with both parents.
    pub fn merge(&self, other: &str) -> RepoResult<MergeOutcome> {
        if !self.stage()?.is_empty() {
            return Err(RepoError::DirtyStage);
        }
        let current = match self.refs.head()? {
            Head::Symbolic(branch) => branch,
            Head::Detached(_) => return Err(RepoError::DetachedHead),
        };
        let other_tip = self
            .refs
            .read_branch(other)?
            .ok_or_else(|| RepoError::BranchNotFound {
                name: other.to_string(),
            })?;
        let current_tip = self.head_id()?;

        let resolution = merge_tips(&self.store, &current_tip, &other_tip)?;
        let current_snapshot = self.read_commit(&current_tip)?.snapshot;
        restore(&self.worktree, &self.store, &resolution.snapshot, &current_snapshot)?;

        let commit = Commit::merge(
            format!("Merged {other} into {current}."),
            Utc::now(),
            current_tip,
            other_tip,
            resolution.snapshot,
        );
        let commit_id = self.finalize_commit(&commit.to_stored_object()?)?;
        info!(
            commit = %commit_id.short_hex(),
            conflicts = resolution.conflicts.len(),
            "merged {other} into {current}"
        );

        Ok(MergeOutcome {
            commit_id,
            conflicts: resolution.conflicts,
        })
    }
}
