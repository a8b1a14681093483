use thiserror::Error;

/// Errors from the merge engine.
///
/// The first three are the split-point short-circuits: the merge does not
/// proceed and no commit is created. `FastForwardable` is deliberately a
/// report, never performed behind the caller's back.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Both tips are the same commit.
    #[error("cannot merge a branch with itself")]
    SelfMerge,

    /// The other tip is already reachable from the current tip.
    #[error("given branch is an ancestor of the current branch")]
    AlreadyAncestor,

    /// The current tip is an ancestor of the other tip; a fast-forward
    /// (checkout of the other tip) would suffice.
    #[error("current branch is behind; fast-forward instead of merging")]
    FastForwardable,

    /// Graph traversal failure.
    #[error(transparent)]
    Graph(#[from] silt_graph::GraphError),

    /// Underlying object store failure.
    #[error(transparent)]
    Store(#[from] silt_store::StoreError),
}

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;
