//! Content-addressed object storage for silt.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory. Every piece of history in silt -- file blobs
//! and commits -- is stored as an immutable object identified by its BLAKE3
//! hash (domain-separated by object kind).
//!
//! # Object Types
//!
//! - [`Blob`] -- one tracked file version, keyed by `(filename, bytes)`
//! - [`Commit`] -- a full snapshot of the tracked tree plus DAG links
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsObjectStore`] -- one file per object under `objects/<shard>/<rest>`
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes are idempotent: an object that already exists is skipped.
//! 3. There is no delete. Objects are retained forever once written.
//! 4. The store never interprets object contents beyond the kind tag.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod hasher;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use hasher::ContentHasher;
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, ObjectKind, Snapshot, StoredObject};
pub use traits::ObjectStore;
