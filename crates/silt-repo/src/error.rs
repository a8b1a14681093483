use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Everything here is an expected failure reported to the user verbatim;
/// nothing is retried. Lower-layer errors bubble up through the transparent
/// variants.
#[derive(Debug, Error)]
pub enum RepoError {
    /// `init` in a directory that already holds a repository.
    #[error("a silt repository already exists in {path}")]
    AlreadyInitialized { path: PathBuf },

    /// Any other operation outside a repository.
    #[error("not in an initialized silt repository: {path}")]
    NotARepository { path: PathBuf },

    /// Commit with a blank message.
    #[error("please enter a commit message")]
    EmptyMessage,

    /// Commit with an empty stage.
    #[error("no changes added to the commit")]
    NothingStaged,

    /// Creating a branch that already exists.
    #[error("a branch with that name already exists: {name}")]
    BranchExists { name: String },

    /// Naming a branch that does not exist.
    #[error("no such branch exists: {name}")]
    BranchNotFound { name: String },

    /// Checking out the branch that is already current.
    #[error("no need to checkout the current branch")]
    CheckoutCurrentBranch,

    /// Deleting the checked-out branch.
    #[error("cannot remove the current branch")]
    CannotRemoveCurrentBranch { name: String },

    /// A commit id or prefix that resolves to nothing.
    #[error("no commit with that id exists: {spec}")]
    NoSuchCommit { spec: String },

    /// A commit prefix matching more than one commit.
    #[error("ambiguous commit id prefix: {prefix}")]
    AmbiguousPrefix { prefix: String },

    /// Merge attempted with staged changes pending.
    #[error("you have uncommitted changes")]
    DirtyStage,

    /// Merge attempted while HEAD is detached.
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    #[error(transparent)]
    Store(#[from] silt_store::StoreError),

    #[error(transparent)]
    Refs(#[from] silt_refs::RefError),

    #[error(transparent)]
    Graph(#[from] silt_graph::GraphError),

    #[error(transparent)]
    Stage(#[from] silt_stage::StageError),

    #[error(transparent)]
    Worktree(#[from] silt_worktree::WorktreeError),

    #[error(transparent)]
    Merge(#[from] silt_merge::MergeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;
