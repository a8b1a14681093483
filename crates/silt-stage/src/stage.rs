use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use silt_types::ObjectId;

use crate::error::{StageError, StageResult};

/// What `record_removal` decided; the caller owns the working-tree effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The file was only staged for addition; it has been unstaged.
    Unstaged,
    /// The file is tracked by HEAD; its removal is now recorded and the
    /// caller must delete the working copy.
    DeleteWorkingFile,
}

/// Pending additions and removals, persisted as a single unit.
///
/// Invariant: a filename never appears in both maps. Recording an addition
/// clears any pending removal of that name, and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Filename -> blob digest staged for the next commit.
    pub additions: BTreeMap<String, ObjectId>,
    /// Filename -> the HEAD digest it was tracked under when removal was staged.
    pub removals: BTreeMap<String, ObjectId>,
}

impl Stage {
    /// An empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if both maps are empty.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Drop all pending entries.
    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Record that `name` (already written to the object store under
    /// `digest`) is staged for addition. `head_digest` is what HEAD currently
    /// tracks for the name, if anything.
    ///
    /// Re-adding a file whose content matches HEAD drops the entry instead:
    /// it is a no-op, or an undo of a stale staged edit.
    pub fn record_addition(&mut self, name: &str, digest: ObjectId, head_digest: Option<ObjectId>) {
        self.removals.remove(name);
        if head_digest == Some(digest) {
            self.additions.remove(name);
        } else {
            self.additions.insert(name.to_string(), digest);
        }
    }

    /// Record that `name` should be removed. `head_digest` is what HEAD
    /// currently tracks for the name, if anything.
    pub fn record_removal(
        &mut self,
        name: &str,
        head_digest: Option<ObjectId>,
    ) -> StageResult<RemovalOutcome> {
        if self.additions.remove(name).is_some() {
            return Ok(RemovalOutcome::Unstaged);
        }
        match head_digest {
            Some(digest) => {
                self.removals.insert(name.to_string(), digest);
                Ok(RemovalOutcome::DeleteWorkingFile)
            }
            None => Err(StageError::NothingToRemove {
                name: name.to_string(),
            }),
        }
    }

    /// Load the stage from its file.
    pub fn load(path: &Path) -> StageResult<Self> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| StageError::Serialization(e.to_string()))
    }

    /// Persist the stage to its file, replacing previous contents.
    pub fn save(&self, path: &Path) -> StageResult<()> {
        let bytes =
            serde_json::to_vec(self).map_err(|e| StageError::Serialization(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
