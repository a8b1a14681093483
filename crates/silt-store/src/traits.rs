use silt_types::ObjectId;

use crate::error::StoreResult;
use crate::object::StoredObject;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same data always produces the same ID.
/// - Writes are idempotent: writing an object that already exists is a no-op.
/// - There is no delete. Unreachable objects are retained.
/// - The store never interprets object contents beyond the kind tag.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    /// The returned ID is computed from the object's kind and data.
    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Return a sorted list of every object ID in the store.
    fn all_ids(&self) -> StoreResult<Vec<ObjectId>>;

    /// All object IDs whose hex form starts with `prefix`.
    ///
    /// Default implementation scans `all_ids()`. Backends with a sharded
    /// layout may override to scan a single shard.
    fn resolve_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        Ok(self
            .all_ids()?
            .into_iter()
            .filter(|id| id.to_hex().starts_with(prefix))
            .collect())
    }

    /// Write multiple objects and return their IDs.
    ///
    /// Default implementation calls `write()` for each object.
    fn write_batch(&self, objects: &[StoredObject]) -> StoreResult<Vec<ObjectId>> {
        objects.iter().map(|obj| self.write(obj)).collect()
    }
}
