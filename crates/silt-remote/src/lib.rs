//! Synchronization between silt repositories reachable by filesystem path.
//!
//! A remote is a named path to another repository root, stored as a ref
//! entry. Push is fast-forward only; fetch lands in a `<remote>/<branch>`
//! tracking branch; pull is fetch followed by an ordinary merge. There is no
//! network protocol.

pub mod error;
pub mod sync;

pub use error::{RemoteError, RemoteResult};
pub use sync::{add_remote, fetch, open_remote, pull, push, rm_remote};
