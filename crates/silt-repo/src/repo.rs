//! The repository: metadata layout, stage mutation, and commit creation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use silt_refs::{FsRefStore, Head, RefStore};
use silt_stage::{RemovalOutcome, Stage};
use silt_store::{
    Blob, Commit, FsObjectStore, ObjectKind, ObjectStore, Snapshot, StoredObject,
};
use silt_types::ObjectId;
use silt_worktree::Worktree;
use tracing::{debug, info};

use crate::error::{RepoError, RepoResult};

/// Name of the metadata directory under the repository root.
pub const SILT_DIR: &str = ".silt";

/// The branch every repository starts on.
pub const DEFAULT_BRANCH: &str = "master";

const STAGE_FILE: &str = "stage";

/// A repository rooted at a working directory.
///
/// Layout under `<root>/.silt/`:
///
/// - `objects/` -- the content-addressed object store
/// - `branches/`, `HEAD`, `remote/` -- the reference store
/// - `stage` -- the staging area, one JSON document
pub struct Repository {
    root: PathBuf,
    silt_dir: PathBuf,
    pub(crate) store: FsObjectStore,
    pub(crate) refs: FsRefStore,
    pub(crate) worktree: Worktree,
}

impl Repository {
    /// Create a new repository in `root`.
    ///
    /// Writes the shared root commit, points `master` at it, and sets HEAD.
    pub fn init(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        let silt_dir = root.join(SILT_DIR);
        if silt_dir.exists() {
            return Err(RepoError::AlreadyInitialized { path: root });
        }
        fs::create_dir_all(&silt_dir)?;

        let repo = Self::assemble(root, silt_dir)?;
        let root_commit = Commit::root();
        let root_id = repo.store.write(&root_commit.to_stored_object()?)?;
        repo.refs.create_branch(DEFAULT_BRANCH, root_id)?;
        repo.refs.set_head(DEFAULT_BRANCH)?;
        Stage::new().save(&repo.stage_path())?;

        info!(root = %repo.root.display(), "initialized repository");
        Ok(repo)
    }

    /// Open an existing repository rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        let silt_dir = root.join(SILT_DIR);
        if !silt_dir.is_dir() {
            return Err(RepoError::NotARepository { path: root });
        }
        Self::assemble(root, silt_dir)
    }

    fn assemble(root: PathBuf, silt_dir: PathBuf) -> RepoResult<Self> {
        let store = FsObjectStore::open(silt_dir.join("objects"))?;
        let refs = FsRefStore::open(&silt_dir)?;
        let worktree = Worktree::new(&root);
        Ok(Self {
            root,
            silt_dir,
            store,
            refs,
            worktree,
        })
    }

    /// The working-directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The object store.
    pub fn store(&self) -> &FsObjectStore {
        &self.store
    }

    /// The reference store.
    pub fn refs(&self) -> &FsRefStore {
        &self.refs
    }

    /// The working tree.
    pub fn worktree(&self) -> &Worktree {
        &self.worktree
    }

    fn stage_path(&self) -> PathBuf {
        self.silt_dir.join(STAGE_FILE)
    }

    /// Load the staging area from disk.
    pub fn stage(&self) -> RepoResult<Stage> {
        Ok(Stage::load(&self.stage_path())?)
    }

    fn save_stage(&self, stage: &Stage) -> RepoResult<()> {
        Ok(stage.save(&self.stage_path())?)
    }

    pub(crate) fn clear_stage(&self) -> RepoResult<()> {
        self.save_stage(&Stage::new())
    }

    /// The commit digest HEAD resolves to.
    pub fn head_id(&self) -> RepoResult<ObjectId> {
        match self.refs.head()? {
            Head::Detached(id) => Ok(id),
            Head::Symbolic(branch) => {
                self.refs
                    .read_branch(&branch)?
                    .ok_or(RepoError::BranchNotFound { name: branch })
            }
        }
    }

    /// The commit HEAD resolves to.
    pub fn head_commit(&self) -> RepoResult<Commit> {
        self.read_commit(&self.head_id()?)
    }

    /// Read and decode a commit object.
    pub fn read_commit(&self, id: &ObjectId) -> RepoResult<Commit> {
        let obj = self
            .store
            .read(id)?
            .ok_or_else(|| RepoError::NoSuchCommit { spec: id.to_hex() })?;
        Ok(Commit::from_stored_object(&obj)?)
    }

    /// Resolve a full commit id or a hex prefix (at least 4 characters) to
    /// exactly one commit.
    pub fn resolve_commit(&self, spec: &str) -> RepoResult<ObjectId> {
        let no_such = || RepoError::NoSuchCommit {
            spec: spec.to_string(),
        };

        if spec.len() < 4 || !spec.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(no_such());
        }
        // Stored digests render as lowercase hex; match case-insensitively.
        let spec_hex = spec.to_ascii_lowercase();
        if let Ok(id) = ObjectId::from_hex(&spec_hex) {
            return match self.store.read(&id)? {
                Some(obj) if obj.kind == ObjectKind::Commit => Ok(id),
                _ => Err(no_such()),
            };
        }

        // Prefix search, counting only commit objects.
        let mut matches = Vec::new();
        for id in self.store.resolve_prefix(&spec_hex)? {
            if let Some(obj) = self.store.read(&id)? {
                if obj.kind == ObjectKind::Commit {
                    matches.push(id);
                }
            }
        }
        match matches.as_slice() {
            [] => Err(no_such()),
            [id] => Ok(*id),
            _ => Err(RepoError::AmbiguousPrefix {
                prefix: spec.to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------
    // Stage mutation
    // -----------------------------------------------------------------

    /// Stage a working file for the next commit.
    ///
    /// The blob is written immediately; only the stage entry is pending.
    pub fn add(&self, name: &str) -> RepoResult<()> {
        let bytes = self.worktree.read(name)?;
        let blob = Blob::new(name, bytes);
        let digest = self.store.write(&blob.to_stored_object()?)?;

        let mut stage = self.stage()?;
        stage.record_addition(name, digest, self.head_commit()?.tracked(name));
        self.save_stage(&stage)?;
        debug!(file = name, digest = %digest.short_hex(), "staged addition");
        Ok(())
    }

    /// Stage a file for removal, deleting the working copy when it is
    /// tracked by HEAD.
    pub fn rm(&self, name: &str) -> RepoResult<()> {
        let mut stage = self.stage()?;
        let outcome = stage.record_removal(name, self.head_commit()?.tracked(name))?;
        self.save_stage(&stage)?;
        if outcome == RemovalOutcome::DeleteWorkingFile {
            self.worktree.delete(name)?;
        }
        debug!(file = name, ?outcome, "staged removal");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Commit creation
    // -----------------------------------------------------------------

    /// Commit the staged changes.
    pub fn commit(&self, message: &str) -> RepoResult<ObjectId> {
        self.commit_at(message, Utc::now())
    }

    /// Commit with an explicit timestamp.
    pub fn commit_at(&self, message: &str, when: DateTime<Utc>) -> RepoResult<ObjectId> {
        if message.trim().is_empty() {
            return Err(RepoError::EmptyMessage);
        }
        let stage = self.stage()?;
        if stage.is_empty() {
            return Err(RepoError::NothingStaged);
        }

        let parent = self.head_id()?;
        let snapshot = self.build_snapshot(&self.read_commit(&parent)?.snapshot, &stage);
        let commit = Commit::new(message, when, Some(parent), snapshot);
        self.finalize_commit(&commit.to_stored_object()?)
    }

    /// Parent snapshot plus staged additions, minus staged removals, minus
    /// files deleted out of band.
    fn build_snapshot(&self, parent: &Snapshot, stage: &Stage) -> Snapshot {
        let mut snapshot = parent.clone();
        for (name, digest) in &stage.additions {
            snapshot.insert(name.clone(), *digest);
        }
        for name in stage.removals.keys() {
            snapshot.remove(name);
        }
        snapshot.retain(|name, _| self.worktree.exists(name));
        snapshot
    }

    /// Write a commit object, advance HEAD's target, clear the stage.
    ///
    /// The ref is the last write: an interruption before it leaves history
    /// untouched.
    pub(crate) fn finalize_commit(&self, object: &StoredObject) -> RepoResult<ObjectId> {
        let id = self.store.write(object)?;
        match self.refs.head()? {
            Head::Symbolic(branch) => self.refs.write_branch(&branch, id)?,
            Head::Detached(_) => self.refs.set_head_detached(id)?,
        }
        self.clear_stage()?;
        info!(commit = %id.short_hex(), "created commit");
        Ok(id)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("root", &self.root).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::testutil::{temp_repo, write_and_add};

    // -----------------------------------------------------------------
    // Init / open
    // -----------------------------------------------------------------

    #[test]
    fn init_creates_master_at_the_root_commit() {
        let (_dir, repo) = temp_repo();
        let head = repo.head_commit().unwrap();
        assert_eq!(head.message, "initial commit");
        assert!(head.parent.is_none());
        assert!(head.snapshot.is_empty());
        assert_eq!(
            repo.refs().head().unwrap(),
            Head::Symbolic(DEFAULT_BRANCH.to_string())
        );
    }

    #[test]
    fn reinit_is_rejected() {
        let (dir, _repo) = temp_repo();
        assert!(matches!(
            Repository::init(dir.path()),
            Err(RepoError::AlreadyInitialized { .. })
        ));
    }

    #[test]
    fn open_outside_a_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Repository::open(dir.path()),
            Err(RepoError::NotARepository { .. })
        ));
    }

    #[test]
    fn two_fresh_repositories_share_the_root_commit() {
        let (_d1, a) = temp_repo();
        let (_d2, b) = temp_repo();
        assert_eq!(a.head_id().unwrap(), b.head_id().unwrap());
    }

    // -----------------------------------------------------------------
    // Add / rm
    // -----------------------------------------------------------------

    #[test]
    fn add_stages_and_stores_the_blob() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");

        let stage = repo.stage().unwrap();
        let digest = stage.additions.get("x").unwrap();
        assert!(repo.store().exists(digest).unwrap());
    }

    #[test]
    fn add_missing_file_fails() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(
            repo.add("ghost"),
            Err(RepoError::Worktree(
                silt_worktree::WorktreeError::FileNotFound { .. }
            ))
        ));
    }

    #[test]
    fn rm_of_untracked_unstaged_file_fails() {
        let (_dir, repo) = temp_repo();
        repo.worktree().write("x", b"1\n").unwrap();
        assert!(matches!(repo.rm("x"), Err(RepoError::Stage(_))));
    }

    #[test]
    fn rm_of_tracked_file_deletes_working_copy() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("add x").unwrap();

        repo.rm("x").unwrap();
        assert!(!repo.worktree().exists("x"));
        assert!(repo.stage().unwrap().removals.contains_key("x"));
    }

    // -----------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------

    #[test]
    fn commit_records_snapshot_and_advances_branch() {
        let (_dir, repo) = temp_repo();
        let root = repo.head_id().unwrap();
        write_and_add(&repo, "x", b"1\n");
        let id = repo.commit("add x").unwrap();

        assert_eq!(repo.head_id().unwrap(), id);
        let commit = repo.head_commit().unwrap();
        assert_eq!(commit.parent, Some(root));
        assert!(commit.snapshot.contains_key("x"));
        assert!(repo.stage().unwrap().is_empty());
    }

    #[test]
    fn commit_with_blank_message_fails() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        assert!(matches!(repo.commit("   "), Err(RepoError::EmptyMessage)));
    }

    #[test]
    fn commit_with_empty_stage_fails() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(repo.commit("empty"), Err(RepoError::NothingStaged)));
    }

    #[test]
    fn commit_carries_forward_untouched_files() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("add x").unwrap();
        write_and_add(&repo, "y", b"2\n");
        repo.commit("add y").unwrap();

        let snapshot = repo.head_commit().unwrap().snapshot;
        assert!(snapshot.contains_key("x"));
        assert!(snapshot.contains_key("y"));
    }

    #[test]
    fn staged_removal_drops_the_file_from_the_snapshot() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        write_and_add(&repo, "y", b"2\n");
        repo.commit("add both").unwrap();

        repo.rm("x").unwrap();
        repo.commit("drop x").unwrap();

        let snapshot = repo.head_commit().unwrap().snapshot;
        assert!(!snapshot.contains_key("x"));
        assert!(snapshot.contains_key("y"));
    }

    #[test]
    fn out_of_band_deletion_is_pruned_from_the_snapshot() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        write_and_add(&repo, "y", b"2\n");
        repo.commit("add both").unwrap();

        // Delete x without `rm`, stage an unrelated change, commit.
        repo.worktree().delete("x").unwrap();
        write_and_add(&repo, "y", b"22\n");
        repo.commit("edit y").unwrap();

        assert!(!repo.head_commit().unwrap().snapshot.contains_key("x"));
    }

    #[test]
    fn restored_commit_restages_clean_and_recommits_the_same_snapshot() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        write_and_add(&repo, "y", b"2\n");
        let base = repo.commit("add both").unwrap();
        write_and_add(&repo, "x", b"1.1\n");
        repo.commit("edit x").unwrap();

        repo.reset(&base.to_hex()).unwrap();

        // Re-adding every restored file normalizes away: nothing differs
        // from what HEAD already tracks.
        for name in repo.worktree().list_files().unwrap() {
            repo.add(&name).unwrap();
        }
        assert!(repo.stage().unwrap().is_empty());

        // A commit on top reproduces the restored mapping exactly.
        write_and_add(&repo, "z", b"3\n");
        let next = repo.commit("add z").unwrap();
        let mut snapshot = repo.read_commit(&next).unwrap().snapshot;
        snapshot.remove("z");
        assert_eq!(snapshot, repo.read_commit(&base).unwrap().snapshot);
    }

    // -----------------------------------------------------------------
    // Commit resolution
    // -----------------------------------------------------------------

    #[test]
    fn resolve_full_id_and_prefix() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        let id = repo.commit("add x").unwrap();

        assert_eq!(repo.resolve_commit(&id.to_hex()).unwrap(), id);
        assert_eq!(repo.resolve_commit(&id.to_hex()[..8]).unwrap(), id);
    }

    #[test]
    fn resolve_rejects_short_or_unknown_specs() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(
            repo.resolve_commit("abc"),
            Err(RepoError::NoSuchCommit { .. })
        ));
        assert!(matches!(
            repo.resolve_commit("deadbeef"),
            Err(RepoError::NoSuchCommit { .. })
        ));
        assert!(matches!(
            repo.resolve_commit("not-hex-at-all"),
            Err(RepoError::NoSuchCommit { .. })
        ));
    }

    #[test]
    fn resolve_accepts_uppercase_hex() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        let id = repo.commit("add x").unwrap();

        let upper = id.to_hex().to_ascii_uppercase();
        assert_eq!(repo.resolve_commit(&upper).unwrap(), id);
        assert_eq!(repo.resolve_commit(&upper[..8]).unwrap(), id);
    }

    #[test]
    fn resolve_never_returns_a_blob() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        let stage = repo.stage().unwrap();
        let blob_id = *stage.additions.get("x").unwrap();

        assert!(matches!(
            repo.resolve_commit(&blob_id.to_hex()),
            Err(RepoError::NoSuchCommit { .. })
        ));
    }
}
