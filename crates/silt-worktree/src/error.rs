use thiserror::Error;

/// Errors from working-tree operations.
#[derive(Debug, Error)]
pub enum WorktreeError {
    /// The named file does not exist in the working tree.
    #[error("file does not exist: {name}")]
    FileNotFound { name: String },

    /// A tracked file has uncommitted, unstaged changes that a restore
    /// would discard.
    #[error("uncommitted changes to tracked file: {name}")]
    UncommittedChanges { name: String },

    /// An untracked working-tree file would be overwritten by a restore.
    #[error("untracked file would be overwritten: {name}")]
    UntrackedFileConflict { name: String },

    /// The named file is absent from the resolved commit's snapshot.
    #[error("file does not exist in that commit: {name}")]
    FileNotInCommit { name: String },

    /// Underlying object store failure.
    #[error(transparent)]
    Store(#[from] silt_store::StoreError),

    /// I/O error touching the working tree.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for working-tree operations.
pub type WorktreeResult<T> = Result<T, WorktreeError>;
