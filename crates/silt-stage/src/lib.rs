//! The staging area: pending additions and removals between commits.
//!
//! The [`Stage`] is the only mutable entity besides refs. It is persisted as
//! a single JSON file, read fresh at the start of every operation, and reset
//! to empty after a successful commit or any destructive restore.

pub mod error;
pub mod stage;
pub mod status;

pub use error::{StageError, StageResult};
pub use stage::{RemovalOutcome, Stage};
pub use status::{FileState, StatusReport};
