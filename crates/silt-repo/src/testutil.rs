//! Shared helpers for the in-crate test modules.

use crate::repo::Repository;

pub(crate) fn temp_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

pub(crate) fn write_and_add(repo: &Repository, name: &str, content: &[u8]) {
    repo.worktree().write(name, content).unwrap();
    repo.add(name).unwrap();
}
