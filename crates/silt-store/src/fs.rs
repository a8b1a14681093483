use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use silt_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectKind, StoredObject};
use crate::traits::ObjectStore;

/// Filesystem-backed object store.
///
/// One file per object under `<root>/<2-char shard>/<62-char leaf>`, where
/// shard and leaf together are the object's hex digest. Sharding avoids
/// flat-directory fan-out. Files are encoded as a kind-tag line followed by
/// the raw payload bytes.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }

    fn encode(object: &StoredObject) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(object.data.len() + 8);
        bytes.extend_from_slice(object.kind.tag().as_bytes());
        bytes.push(b'\n');
        bytes.extend_from_slice(&object.data);
        bytes
    }

    fn decode(id: &ObjectId, bytes: &[u8]) -> StoreResult<StoredObject> {
        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| StoreError::CorruptObject {
                id: *id,
                reason: "missing kind tag".to_string(),
            })?;
        let tag = std::str::from_utf8(&bytes[..newline]).map_err(|_| StoreError::CorruptObject {
            id: *id,
            reason: "kind tag is not UTF-8".to_string(),
        })?;
        let kind = ObjectKind::from_tag(tag).ok_or_else(|| StoreError::CorruptObject {
            id: *id,
            reason: format!("unknown kind tag: {tag}"),
        })?;
        Ok(StoredObject::new(kind, bytes[newline + 1..].to_vec()))
    }

    fn ids_in_shard(&self, shard: &Path) -> StoreResult<Vec<ObjectId>> {
        let shard_name = shard
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mut ids = Vec::new();
        for entry in fs::read_dir(shard)? {
            let entry = entry?;
            if let Some(leaf) = entry.file_name().to_str() {
                let hex = format!("{shard_name}{leaf}");
                if let Ok(id) = ObjectId::from_hex(&hex) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let path = self.object_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let object = Self::decode(id, &bytes)?;
        // Corruption check: the bytes on disk must still hash to their name.
        let computed = object.compute_id();
        if computed != *id {
            return Err(StoreError::HashMismatch {
                id: *id,
                computed: computed.to_hex(),
            });
        }
        Ok(Some(object))
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let path = self.object_path(&id);
        // Idempotent: content-addressing guarantees an existing file holds
        // identical bytes, so the write is skipped.
        if path.exists() {
            return Ok(id);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, Self::encode(object))?;
        debug!(id = %id.short_hex(), kind = %object.kind, size = object.size, "wrote object");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).exists())
    }

    fn all_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.extend(self.ids_in_shard(&entry.path())?);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn resolve_prefix(&self, prefix: &str) -> StoreResult<Vec<ObjectId>> {
        // Hex digests can never start with a non-hex prefix, and a
        // multi-byte character must not reach the shard slice below.
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }
        // With at least one full shard character pair, only one shard
        // directory can match.
        if prefix.len() >= 2 {
            let shard = self.root.join(&prefix[..2]);
            if !shard.exists() {
                return Ok(Vec::new());
            }
            let mut ids: Vec<ObjectId> = self
                .ids_in_shard(&shard)?
                .into_iter()
                .filter(|id| id.to_hex().starts_with(prefix))
                .collect();
            ids.sort();
            return Ok(ids);
        }
        Ok(self
            .all_ids()?
            .into_iter()
            .filter(|id| id.to_hex().starts_with(prefix))
            .collect())
    }
}

impl std::fmt::Debug for FsObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsObjectStore")
            .field("root", &self.root)
            .finish()
    }
}
