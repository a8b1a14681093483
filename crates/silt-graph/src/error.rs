use silt_types::ObjectId;

/// Errors from commit-graph traversal.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A commit referenced by the graph is missing from the store.
    #[error("missing commit: {0}")]
    MissingCommit(ObjectId),

    /// Underlying object store failure.
    #[error(transparent)]
    Store(#[from] silt_store::StoreError),
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
