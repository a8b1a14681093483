use thiserror::Error;

/// Errors from staging operations.
#[derive(Debug, Error)]
pub enum StageError {
    /// The file is neither staged nor tracked, so there is nothing to remove.
    #[error("no reason to remove the file: {name}")]
    NothingToRemove { name: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error reading or writing the stage file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for staging operations.
pub type StageResult<T> = Result<T, StageError>;
