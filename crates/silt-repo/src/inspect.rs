//! Read-only views: history, message search, and working-tree status.

use std::collections::BTreeSet;

use silt_graph::first_parent_history;
use silt_refs::RefStore;
use silt_stage::{FileState, StatusReport};
use silt_store::{Blob, Commit, ObjectKind, ObjectStore};
use silt_types::ObjectId;

use crate::error::RepoResult;
use crate::repo::Repository;

impl Repository {
    /// History from HEAD following first-parent edges, newest first.
    pub fn log(&self) -> RepoResult<Vec<(ObjectId, Commit)>> {
        Ok(first_parent_history(&self.store, &self.head_id()?)?)
    }

    /// Every commit in the object store, in no particular order.
    pub fn global_log(&self) -> RepoResult<Vec<(ObjectId, Commit)>> {
        let mut out = Vec::new();
        for id in self.store.all_ids()? {
            if let Some(obj) = self.store.read(&id)? {
                if obj.kind == ObjectKind::Commit {
                    out.push((id, Commit::from_stored_object(&obj)?));
                }
            }
        }
        Ok(out)
    }

    /// Ids of every commit whose message contains `needle`.
    pub fn find(&self, needle: &str) -> RepoResult<Vec<ObjectId>> {
        Ok(self
            .global_log()?
            .into_iter()
            .filter(|(_, commit)| commit.message.contains(needle))
            .map(|(id, _)| id)
            .collect())
    }

    /// A full status snapshot: branches, staged entries, working-tree drift,
    /// and untracked files.
    pub fn status(&self) -> RepoResult<StatusReport> {
        let stage = self.stage()?;
        let head = self.head_commit()?;

        let branches = self.refs.branches()?.into_iter().map(|(n, _)| n).collect();
        let current_branch = self.refs.head()?.branch_name().map(str::to_string);

        let staged: Vec<String> = stage.additions.keys().cloned().collect();
        let removed: Vec<String> = stage.removals.keys().cloned().collect();

        // Files whose working copy drifted from what a commit would record:
        // the staged digest when one exists, the tracked digest otherwise.
        let mut unstaged = Vec::new();
        let names: BTreeSet<&String> =
            head.snapshot.keys().chain(stage.additions.keys()).collect();
        for name in names {
            if stage.removals.contains_key(name) {
                continue;
            }
            let expected = stage
                .additions
                .get(name)
                .or_else(|| head.snapshot.get(name))
                .copied();
            let Some(expected) = expected else { continue };
            if !self.worktree.exists(name) {
                unstaged.push((name.clone(), FileState::Deleted));
            } else if self.worktree.file_digest(name)? != expected {
                unstaged.push((name.clone(), FileState::Modified));
            }
        }

        // On disk but neither staged nor tracked; a file recreated after
        // staging its removal counts as untracked again.
        let mut untracked = Vec::new();
        for name in self.worktree.list_files()? {
            let tracked =
                head.snapshot.contains_key(&name) && !stage.removals.contains_key(&name);
            if !tracked && !stage.additions.contains_key(&name) {
                untracked.push(name);
            }
        }

        Ok(StatusReport {
            branches,
            current_branch,
            staged,
            removed,
            unstaged,
            untracked,
        })
    }

    /// The bytes `commit` tracks for `name`, or `None` when untracked there.
    pub fn blob_bytes_at(&self, commit: &Commit, name: &str) -> RepoResult<Option<Vec<u8>>> {
        let Some(digest) = commit.tracked(name) else {
            return Ok(None);
        };
        let obj = self
            .store
            .read(&digest)?
            .ok_or(silt_store::StoreError::NotFound(digest))?;
        Ok(Some(Blob::from_stored_object(&obj)?.data))
    }

    /// The working copy's bytes for `name`, or `None` when absent.
    pub fn working_bytes(&self, name: &str) -> RepoResult<Option<Vec<u8>>> {
        if !self.worktree.exists(name) {
            return Ok(None);
        }
        Ok(Some(self.worktree.read(name)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{temp_repo, write_and_add};

    #[test]
    fn log_is_newest_first_back_to_the_root() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        let c1 = repo.commit("first").unwrap();
        write_and_add(&repo, "x", b"2\n");
        let c2 = repo.commit("second").unwrap();

        let ids: Vec<ObjectId> = repo.log().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids[0], c2);
        assert_eq!(ids[1], c1);
        assert_eq!(
            repo.log().unwrap().last().unwrap().1.message,
            "initial commit"
        );
    }

    #[test]
    fn global_log_sees_commits_on_every_branch() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("on master").unwrap();
        repo.branch("side").unwrap();
        repo.checkout_branch("side").unwrap();
        write_and_add(&repo, "y", b"2\n");
        repo.commit("on side").unwrap();
        repo.checkout_branch("master").unwrap();

        // Root + one commit per branch; `log` from master sees only two.
        assert_eq!(repo.global_log().unwrap().len(), 3);
        assert_eq!(repo.log().unwrap().len(), 2);
    }

    #[test]
    fn find_matches_by_substring() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        let c1 = repo.commit("fix the parser").unwrap();
        write_and_add(&repo, "x", b"2\n");
        repo.commit("add docs").unwrap();

        assert_eq!(repo.find("parser").unwrap(), vec![c1]);
        assert!(repo.find("nothing matches this").unwrap().is_empty());
        assert_eq!(repo.find("initial commit").unwrap().len(), 1);
    }

    #[test]
    fn status_sections_are_populated() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "tracked", b"1\n");
        write_and_add(&repo, "doomed", b"x\n");
        repo.commit("base").unwrap();
        repo.branch("side").unwrap();

        write_and_add(&repo, "staged", b"2\n");
        repo.rm("doomed").unwrap();
        repo.worktree().write("tracked", b"drifted\n").unwrap();
        repo.worktree().write("stray", b"?\n").unwrap();

        let report = repo.status().unwrap();
        assert_eq!(report.current_branch.as_deref(), Some("master"));
        assert_eq!(report.branches, vec!["master", "side"]);
        assert_eq!(report.staged, vec!["staged"]);
        assert_eq!(report.removed, vec!["doomed"]);
        assert_eq!(
            report.unstaged,
            vec![("tracked".to_string(), FileState::Modified)]
        );
        assert_eq!(report.untracked, vec!["stray"]);
    }

    #[test]
    fn status_reports_deleted_tracked_file() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("base").unwrap();
        repo.worktree().delete("x").unwrap();

        let report = repo.status().unwrap();
        assert_eq!(report.unstaged, vec![("x".to_string(), FileState::Deleted)]);
    }

    #[test]
    fn clean_repository_has_clean_status() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("base").unwrap();
        assert!(repo.status().unwrap().is_clean());
    }

    #[test]
    fn version_bytes_for_diffing() {
        let (_dir, repo) = temp_repo();
        write_and_add(&repo, "x", b"1\n");
        repo.commit("base").unwrap();
        repo.worktree().write("x", b"2\n").unwrap();

        let head = repo.head_commit().unwrap();
        assert_eq!(repo.blob_bytes_at(&head, "x").unwrap(), Some(b"1\n".to_vec()));
        assert_eq!(repo.blob_bytes_at(&head, "y").unwrap(), None);
        assert_eq!(repo.working_bytes("x").unwrap(), Some(b"2\n".to_vec()));
        assert_eq!(repo.working_bytes("y").unwrap(), None);
    }
}
