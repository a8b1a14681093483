use thiserror::Error;

/// Errors from remote synchronization.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The named remote entry does not exist.
    #[error("a remote with that name does not exist: {name}")]
    RemoteNotFound { name: String },

    /// Adding a remote entry that already exists.
    #[error("a remote with that name already exists: {name}")]
    RemoteExists { name: String },

    /// The remote repository has no branch of that name.
    #[error("that remote does not have that branch: {remote}/{branch}")]
    RemoteBranchMissing { remote: String, branch: String },

    /// The local branch named in a push does not exist.
    #[error("no such branch exists: {name}")]
    BranchNotFound { name: String },

    /// The remote branch tip is not an ancestor of the local head.
    #[error("please pull down remote changes before pushing")]
    NotFastForward,

    #[error(transparent)]
    Repo(#[from] silt_repo::RepoError),

    #[error(transparent)]
    Refs(#[from] silt_refs::RefError),

    #[error(transparent)]
    Store(#[from] silt_store::StoreError),

    #[error(transparent)]
    Graph(#[from] silt_graph::GraphError),
}

/// Result alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;
