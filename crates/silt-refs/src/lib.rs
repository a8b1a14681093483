//! Named mutable references for silt.
//!
//! Branches are named pointers to commit digests; HEAD is the single
//! indirection selecting the current branch (symbolic) or a bare commit
//! (detached). Remote entries map a name to the filesystem root of another
//! repository.
//!
//! All backends implement [`RefStore`]:
//!
//! - [`InMemoryRefStore`] -- for tests and embedding
//! - [`FsRefStore`] -- `branches/<name>`, `HEAD`, and `remote/<name>` files

pub mod error;
pub mod fs;
pub mod memory;
pub mod names;
pub mod traits;
pub mod types;

pub use error::{RefError, RefResult};
pub use fs::FsRefStore;
pub use memory::InMemoryRefStore;
pub use names::{validate_branch_name, validate_remote_name};
pub use traits::RefStore;
pub use types::Head;
