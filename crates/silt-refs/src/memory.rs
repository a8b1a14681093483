use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use silt_types::ObjectId;

use crate::error::{RefError, RefResult};
use crate::names::{validate_branch_name, validate_remote_name};
use crate::traits::RefStore;
use crate::types::Head;

/// In-memory reference store for tests and embedding.
pub struct InMemoryRefStore {
    branches: RwLock<BTreeMap<String, ObjectId>>,
    head: RwLock<Option<Head>>,
    remotes: RwLock<BTreeMap<String, PathBuf>>,
}

impl InMemoryRefStore {
    /// Create an empty ref store with no HEAD.
    pub fn new() -> Self {
        Self {
            branches: RwLock::new(BTreeMap::new()),
            head: RwLock::new(None),
            remotes: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryRefStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RefStore for InMemoryRefStore {
    fn read_branch(&self, name: &str) -> RefResult<Option<ObjectId>> {
        let branches = self.branches.read().expect("lock poisoned");
        Ok(branches.get(name).copied())
    }

    fn write_branch(&self, name: &str, target: ObjectId) -> RefResult<()> {
        validate_branch_name(name)?;
        let mut branches = self.branches.write().expect("lock poisoned");
        branches.insert(name.to_string(), target);
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> RefResult<()> {
        if self.head()?.branch_name() == Some(name) {
            return Err(RefError::DeleteCurrentBranch {
                name: name.to_string(),
            });
        }
        let mut branches = self.branches.write().expect("lock poisoned");
        if branches.remove(name).is_none() {
            return Err(RefError::NotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn branches(&self) -> RefResult<Vec<(String, ObjectId)>> {
        let branches = self.branches.read().expect("lock poisoned");
        Ok(branches.iter().map(|(n, t)| (n.clone(), *t)).collect())
    }

    fn head(&self) -> RefResult<Head> {
        let head = self.head.read().expect("lock poisoned");
        head.clone().ok_or(RefError::HeadUnset)
    }

    fn set_head(&self, branch: &str) -> RefResult<()> {
        validate_branch_name(branch)?;
        let mut head = self.head.write().expect("lock poisoned");
        *head = Some(Head::Symbolic(branch.to_string()));
        Ok(())
    }

    fn set_head_detached(&self, target: ObjectId) -> RefResult<()> {
        let mut head = self.head.write().expect("lock poisoned");
        *head = Some(Head::Detached(target));
        Ok(())
    }

    fn read_remote(&self, name: &str) -> RefResult<Option<PathBuf>> {
        let remotes = self.remotes.read().expect("lock poisoned");
        Ok(remotes.get(name).cloned())
    }

    fn add_remote(&self, name: &str, path: &Path) -> RefResult<()> {
        validate_remote_name(name)?;
        let mut remotes = self.remotes.write().expect("lock poisoned");
        if remotes.contains_key(name) {
            return Err(RefError::RemoteExists {
                name: name.to_string(),
            });
        }
        remotes.insert(name.to_string(), path.to_path_buf());
        Ok(())
    }

    fn remove_remote(&self, name: &str) -> RefResult<()> {
        let mut remotes = self.remotes.write().expect("lock poisoned");
        if remotes.remove(name).is_none() {
            return Err(RefError::RemoteNotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn remotes(&self) -> RefResult<Vec<(String, PathBuf)>> {
        let remotes = self.remotes.read().expect("lock poisoned");
        Ok(remotes.iter().map(|(n, p)| (n.clone(), p.clone())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    #[test]
    fn head_starts_unset() {
        let store = InMemoryRefStore::new();
        assert!(matches!(store.head(), Err(RefError::HeadUnset)));
    }

    #[test]
    fn write_and_read_branch() {
        let store = InMemoryRefStore::new();
        store.write_branch("master", oid(1)).unwrap();
        assert_eq!(store.read_branch("master").unwrap(), Some(oid(1)));
        assert_eq!(store.read_branch("other").unwrap(), None);
    }

    #[test]
    fn write_branch_moves_pointer() {
        let store = InMemoryRefStore::new();
        store.write_branch("master", oid(1)).unwrap();
        store.write_branch("master", oid(2)).unwrap();
        assert_eq!(store.read_branch("master").unwrap(), Some(oid(2)));
    }

    #[test]
    fn create_branch_rejects_duplicate() {
        let store = InMemoryRefStore::new();
        store.create_branch("feature", oid(1)).unwrap();
        assert!(matches!(
            store.create_branch("feature", oid(2)),
            Err(RefError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn invalid_name_is_rejected() {
        let store = InMemoryRefStore::new();
        assert!(matches!(
            store.write_branch("bad..name", oid(1)),
            Err(RefError::InvalidBranchName { .. })
        ));
    }

    #[test]
    fn cannot_delete_current_branch() {
        let store = InMemoryRefStore::new();
        store.write_branch("master", oid(1)).unwrap();
        store.set_head("master").unwrap();
        assert!(matches!(
            store.delete_branch("master"),
            Err(RefError::DeleteCurrentBranch { .. })
        ));
    }

    #[test]
    fn delete_missing_branch_fails() {
        let store = InMemoryRefStore::new();
        store.write_branch("master", oid(1)).unwrap();
        store.set_head("master").unwrap();
        assert!(matches!(
            store.delete_branch("ghost"),
            Err(RefError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_other_branch_succeeds() {
        let store = InMemoryRefStore::new();
        store.write_branch("master", oid(1)).unwrap();
        store.write_branch("feature", oid(2)).unwrap();
        store.set_head("master").unwrap();
        store.delete_branch("feature").unwrap();
        assert_eq!(store.read_branch("feature").unwrap(), None);
    }

    #[test]
    fn branches_sorted_by_name() {
        let store = InMemoryRefStore::new();
        store.write_branch("zeta", oid(1)).unwrap();
        store.write_branch("alpha", oid(2)).unwrap();
        let names: Vec<String> = store.branches().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn detached_head_roundtrip() {
        let store = InMemoryRefStore::new();
        store.set_head_detached(oid(7)).unwrap();
        assert_eq!(store.head().unwrap(), Head::Detached(oid(7)));
        store.set_head("master").unwrap();
        assert_eq!(store.head().unwrap(), Head::Symbolic("master".to_string()));
    }

    #[test]
    fn remote_lifecycle() {
        let store = InMemoryRefStore::new();
        store.add_remote("origin", Path::new("/tmp/other")).unwrap();
        assert_eq!(
            store.read_remote("origin").unwrap(),
            Some(PathBuf::from("/tmp/other"))
        );
        assert!(matches!(
            store.add_remote("origin", Path::new("/elsewhere")),
            Err(RefError::RemoteExists { .. })
        ));
        store.remove_remote("origin").unwrap();
        assert!(matches!(
            store.remove_remote("origin"),
            Err(RefError::RemoteNotFound { .. })
        ));
    }
}
