use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use silt_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::hasher::ContentHasher;

/// A commit's complete filename -> blob-digest mapping.
///
/// Snapshots are full trees, not deltas: a file's absence from the map *is*
/// its deleted state. Ordered so serialization (and therefore commit hashing)
/// is deterministic.
pub type Snapshot = BTreeMap<String, ObjectId>;

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// One tracked file version.
    Blob,
    /// A snapshot of the tracked tree plus its DAG links.
    Commit,
}

impl ObjectKind {
    /// Stable tag used in the on-disk object encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Commit => "commit",
        }
    }

    /// Parse a tag back into a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "blob" => Some(Self::Blob),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A stored object: kind tag + serialized data + cached size.
///
/// `StoredObject` is the unit of storage. The store never interprets the
/// contents of the data beyond the kind tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The serialized bytes of the object.
    pub data: Vec<u8>,
    /// The size of `data` in bytes.
    pub size: u64,
}

impl StoredObject {
    /// Create a new stored object from kind and data.
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self { kind, data, size }
    }

    /// Compute the content-addressed ID for this object.
    ///
    /// Uses the appropriate domain-separated hasher for each object kind.
    pub fn compute_id(&self) -> ObjectId {
        let hasher = match self.kind {
            ObjectKind::Blob => &ContentHasher::BLOB,
            ObjectKind::Commit => &ContentHasher::COMMIT,
        };
        hasher.hash(&self.data)
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// One tracked file version.
///
/// The filename participates in the serialized record, so identical bytes
/// under two different names hash to two different objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// The tracked filename this version belongs to.
    pub name: String,
    /// The file's bytes.
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob for a named file.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// The content-addressed ID this blob will be stored under.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(self.to_stored_object()?.compute_id())
    }

    /// Convert into a `StoredObject` for storage.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredObject::new(ObjectKind::Blob, data))
    }

    /// Decode from a `StoredObject`.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Blob {
            return Err(StoreError::CorruptObject {
                id: obj.compute_id(),
                reason: format!("expected blob, got {}", obj.kind),
            });
        }
        serde_json::from_slice(&obj.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// An immutable commit node in the history DAG.
///
/// `parent` is `None` only for the root commit. `merge_parent` is set only on
/// commits produced by a merge and always differs from `parent`. The snapshot
/// is the complete tracked-file mapping at this point, never a delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Human-readable commit message.
    pub message: String,
    /// When the commit was created.
    pub timestamp: DateTime<Utc>,
    /// First parent, `None` for the root commit.
    pub parent: Option<ObjectId>,
    /// Second parent, present only on merge commits.
    pub merge_parent: Option<ObjectId>,
    /// Complete filename -> blob-digest mapping.
    pub snapshot: Snapshot,
}

impl Commit {
    /// Create a new ordinary commit.
    pub fn new(
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        parent: Option<ObjectId>,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parent,
            merge_parent: None,
            snapshot,
        }
    }

    /// Create a merge commit with two parents.
    pub fn merge(
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        parent: ObjectId,
        merge_parent: ObjectId,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parent: Some(parent),
            merge_parent: Some(merge_parent),
            snapshot,
        }
    }

    /// The root commit every repository starts from.
    ///
    /// Pinned to the Unix epoch with an empty snapshot so independently
    /// initialized repositories share one root.
    pub fn root() -> Self {
        Self {
            message: "initial commit".to_string(),
            timestamp: DateTime::UNIX_EPOCH,
            parent: None,
            merge_parent: None,
            snapshot: Snapshot::new(),
        }
    }

    /// Returns `true` if this commit has two parents.
    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    /// The blob digest tracked for `name`, if any.
    pub fn tracked(&self, name: &str) -> Option<ObjectId> {
        self.snapshot.get(name).copied()
    }

    /// The content-addressed ID this commit will be stored under.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(self.to_stored_object()?.compute_id())
    }

    /// Convert into a `StoredObject` for storage.
    pub fn to_stored_object(&self) -> StoreResult<StoredObject> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredObject::new(ObjectKind::Commit, data))
    }

    /// Decode from a `StoredObject`.
    pub fn from_stored_object(obj: &StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Commit {
            return Err(StoreError::CorruptObject {
                id: obj.compute_id(),
                reason: format!("expected commit, got {}", obj.kind),
            });
        }
        serde_json::from_slice(&obj.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
