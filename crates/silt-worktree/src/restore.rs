//! The three-pass restore and the unconditional single-file checkout.

use silt_store::{Blob, Commit, ObjectStore, Snapshot, StoreError};
use silt_types::ObjectId;
use tracing::debug;

use crate::error::{WorktreeError, WorktreeResult};
use crate::worktree::Worktree;

fn read_blob(store: &dyn ObjectStore, id: &ObjectId) -> WorktreeResult<Blob> {
    let obj = store.read(id)?.ok_or(StoreError::NotFound(*id))?;
    Ok(Blob::from_stored_object(&obj)?)
}

/// Materialize `target` into the working tree, replacing `current`.
///
/// Three passes, in order:
///
/// 1. Safety: every file in `current` must exist with its tracked digest,
///    otherwise [`WorktreeError::UncommittedChanges`]. No file has been
///    touched when this fails.
/// 2. Untracked collision: a name in `target` but not `current` must not
///    already exist on disk, otherwise
///    [`WorktreeError::UntrackedFileConflict`]. Still nothing touched.
/// 3. Apply: delete every `current` file, then write every `target` blob.
///
/// The caller owns clearing the stage afterwards.
pub fn restore(
    worktree: &Worktree,
    store: &dyn ObjectStore,
    target: &Snapshot,
    current: &Snapshot,
) -> WorktreeResult<()> {
    // Safety pass.
    for (name, digest) in current {
        if !worktree.exists(name) || worktree.file_digest(name)? != *digest {
            return Err(WorktreeError::UncommittedChanges { name: name.clone() });
        }
    }

    // Untracked-collision pass.
    for name in target.keys() {
        if !current.contains_key(name) && worktree.exists(name) {
            return Err(WorktreeError::UntrackedFileConflict { name: name.clone() });
        }
    }

    // Apply pass. Overwrites only happen to files that passed the safety
    // check above.
    for name in current.keys() {
        worktree.delete(name)?;
    }
    for (name, digest) in target {
        let blob = read_blob(store, digest)?;
        worktree.write(name, &blob.data)?;
    }
    debug!(files = target.len(), "restored snapshot");

    Ok(())
}

/// Overwrite one working file with its version in `commit`, bypassing all
/// restore safety passes.
pub fn checkout_file(
    worktree: &Worktree,
    store: &dyn ObjectStore,
    commit: &Commit,
    name: &str,
) -> WorktreeResult<()> {
    let digest = commit
        .tracked(name)
        .ok_or_else(|| WorktreeError::FileNotInCommit {
            name: name.to_string(),
        })?;
    let blob = read_blob(store, &digest)?;
    worktree.write(name, &blob.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use silt_store::InMemoryObjectStore;

    fn temp_worktree() -> (tempfile::TempDir, Worktree) {
        let dir = tempfile::tempdir().unwrap();
        let worktree = Worktree::new(dir.path());
        (dir, worktree)
    }

    /// Write a blob for (name, content) and return its id.
    fn put_blob(store: &InMemoryObjectStore, name: &str, content: &[u8]) -> ObjectId {
        let blob = Blob::new(name, content.to_vec());
        store.write(&blob.to_stored_object().unwrap()).unwrap()
    }

    fn snapshot(entries: &[(&str, ObjectId)]) -> Snapshot {
        entries.iter().map(|(n, d)| (n.to_string(), *d)).collect()
    }

    // -----------------------------------------------------------------
    // Restore happy path
    // -----------------------------------------------------------------

    #[test]
    fn restore_replaces_tracked_files() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let old = put_blob(&store, "x", b"old");
        let new = put_blob(&store, "y", b"new");
        wt.write("x", b"old").unwrap();

        restore(&wt, &store, &snapshot(&[("y", new)]), &snapshot(&[("x", old)])).unwrap();

        assert!(!wt.exists("x"));
        assert_eq!(wt.read("y").unwrap(), b"new");
    }

    #[test]
    fn restore_to_same_file_different_content() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let v1 = put_blob(&store, "x", b"1\n");
        let v2 = put_blob(&store, "x", b"2\n");
        wt.write("x", b"1\n").unwrap();

        restore(&wt, &store, &snapshot(&[("x", v2)]), &snapshot(&[("x", v1)])).unwrap();
        assert_eq!(wt.read("x").unwrap(), b"2\n");
    }

    #[test]
    fn restore_empty_target_clears_tracked_files() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let v1 = put_blob(&store, "x", b"1");
        wt.write("x", b"1").unwrap();

        restore(&wt, &store, &Snapshot::new(), &snapshot(&[("x", v1)])).unwrap();
        assert!(!wt.exists("x"));
    }

    // -----------------------------------------------------------------
    // Safety passes
    // -----------------------------------------------------------------

    #[test]
    fn modified_tracked_file_blocks_restore() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let v1 = put_blob(&store, "x", b"1");
        let v2 = put_blob(&store, "x", b"2");
        wt.write("x", b"edited by hand").unwrap();

        let err = restore(&wt, &store, &snapshot(&[("x", v2)]), &snapshot(&[("x", v1)]))
            .unwrap_err();
        assert!(matches!(err, WorktreeError::UncommittedChanges { .. }));
        // Nothing was touched.
        assert_eq!(wt.read("x").unwrap(), b"edited by hand");
    }

    #[test]
    fn missing_tracked_file_blocks_restore() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();
        let v1 = put_blob(&store, "x", b"1");

        let err =
            restore(&wt, &store, &Snapshot::new(), &snapshot(&[("x", v1)])).unwrap_err();
        assert!(matches!(err, WorktreeError::UncommittedChanges { .. }));
    }

    #[test]
    fn untracked_file_in_the_way_blocks_restore() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let incoming = put_blob(&store, "x", b"incoming");
        wt.write("x", b"precious untracked work").unwrap();

        let err = restore(&wt, &store, &snapshot(&[("x", incoming)]), &Snapshot::new())
            .unwrap_err();
        assert!(matches!(err, WorktreeError::UntrackedFileConflict { .. }));
        assert_eq!(wt.read("x").unwrap(), b"precious untracked work");
    }

    #[test]
    fn unrelated_untracked_files_survive_restore() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let v1 = put_blob(&store, "x", b"1");
        wt.write("x", b"1").unwrap();
        wt.write("notes", b"keep me").unwrap();

        restore(&wt, &store, &Snapshot::new(), &snapshot(&[("x", v1)])).unwrap();
        assert_eq!(wt.read("notes").unwrap(), b"keep me");
    }

    // -----------------------------------------------------------------
    // Single-file checkout
    // -----------------------------------------------------------------

    #[test]
    fn checkout_file_overwrites_unconditionally() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();

        let digest = put_blob(&store, "x", b"committed");
        let commit = Commit::new(
            "c",
            chrono_now(),
            None,
            snapshot(&[("x", digest)]),
        );
        wt.write("x", b"dirty local edit").unwrap();

        checkout_file(&wt, &store, &commit, "x").unwrap();
        assert_eq!(wt.read("x").unwrap(), b"committed");
    }

    #[test]
    fn checkout_file_absent_from_commit() {
        let (_dir, wt) = temp_worktree();
        let store = InMemoryObjectStore::new();
        let commit = Commit::new("c", chrono_now(), None, Snapshot::new());

        let err = checkout_file(&wt, &store, &commit, "x").unwrap_err();
        assert!(matches!(err, WorktreeError::FileNotInCommit { .. }));
    }

    fn chrono_now() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::UNIX_EPOCH
    }
}
