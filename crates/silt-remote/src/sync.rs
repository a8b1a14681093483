//! Object transfer and ref advancement between two repositories on disk.
//!
//! Everything here goes through the core repository API: read a branch tip,
//! walk reachable commits, copy missing objects, advance a ref. Blobs are
//! copied before their commits and the ref moves last, so an interrupted
//! transfer never publishes a tip whose history is incomplete.

use std::path::Path;

use silt_graph::{is_ancestor, reachable_commits};
use silt_refs::{RefError, RefStore};
use silt_repo::{MergeOutcome, Repository};
use silt_store::ObjectStore;
use silt_types::ObjectId;
use tracing::{debug, info};

use crate::error::{RemoteError, RemoteResult};

/// Record `path` as remote `name`.
pub fn add_remote(repo: &Repository, name: &str, path: &Path) -> RemoteResult<()> {
    repo.refs().add_remote(name, path).map_err(|e| match e {
        RefError::RemoteExists { name } => RemoteError::RemoteExists { name },
        other => other.into(),
    })
}

/// Forget remote `name`.
pub fn rm_remote(repo: &Repository, name: &str) -> RemoteResult<()> {
    repo.refs().remove_remote(name).map_err(|e| match e {
        RefError::RemoteNotFound { name } => RemoteError::RemoteNotFound { name },
        other => other.into(),
    })
}

/// Open the repository a remote entry points to.
pub fn open_remote(repo: &Repository, name: &str) -> RemoteResult<Repository> {
    let path = repo
        .refs()
        .read_remote(name)?
        .ok_or_else(|| RemoteError::RemoteNotFound {
            name: name.to_string(),
        })?;
    Ok(Repository::open(path)?)
}

/// Push the local `branch` to remote `name`.
///
/// Fast-forward only: the remote tip must be absent from, equal to, or an
/// ancestor of the local tip, otherwise [`RemoteError::NotFastForward`].
pub fn push(repo: &Repository, name: &str, branch: &str) -> RemoteResult<ObjectId> {
    let remote = open_remote(repo, name)?;
    let local_tip = repo
        .refs()
        .read_branch(branch)?
        .ok_or_else(|| RemoteError::BranchNotFound {
            name: branch.to_string(),
        })?;

    if let Some(remote_tip) = remote.refs().read_branch(branch)? {
        // A remote tip we have never seen cannot be our ancestor.
        if !repo.store().exists(&remote_tip)?
            || !is_ancestor(repo.store(), &remote_tip, &local_tip)?
        {
            return Err(RemoteError::NotFastForward);
        }
    }

    copy_missing(repo.store(), remote.store(), &local_tip)?;
    remote.refs().write_branch(branch, local_tip)?;
    info!(remote = name, branch, tip = %local_tip.short_hex(), "pushed");
    Ok(local_tip)
}

/// Fetch `branch` from remote `name` into the local branch
/// `<name>/<branch>`.
pub fn fetch(repo: &Repository, name: &str, branch: &str) -> RemoteResult<ObjectId> {
    let remote = open_remote(repo, name)?;
    let remote_tip = remote
        .refs()
        .read_branch(branch)?
        .ok_or_else(|| RemoteError::RemoteBranchMissing {
            remote: name.to_string(),
            branch: branch.to_string(),
        })?;

    copy_missing(remote.store(), repo.store(), &remote_tip)?;
    let tracking = format!("{name}/{branch}");
    repo.refs().write_branch(&tracking, remote_tip)?;
    info!(branch = tracking, tip = %remote_tip.short_hex(), "fetched");
    Ok(remote_tip)
}

/// Fetch `branch` from remote `name`, then merge the tracking branch into
/// the current branch.
pub fn pull(repo: &Repository, name: &str, branch: &str) -> RemoteResult<MergeOutcome> {
    fetch(repo, name, branch)?;
    Ok(repo.merge(&format!("{name}/{branch}"))?)
}

/// Copy every object reachable from `tip` that `dst` lacks.
///
/// Each missing commit's snapshot blobs go in first, the commit objects
/// after, so `dst` never holds a commit whose blobs are absent.
fn copy_missing(
    src: &dyn ObjectStore,
    dst: &dyn ObjectStore,
    tip: &ObjectId,
) -> RemoteResult<()> {
    let mut pending_commits = Vec::new();
    let mut copied_blobs = 0usize;

    for (id, commit) in reachable_commits(src, tip)? {
        if dst.exists(&id)? {
            continue;
        }
        for digest in commit.snapshot.values() {
            if !dst.exists(digest)? {
                let blob = src
                    .read(digest)?
                    .ok_or(silt_store::StoreError::NotFound(*digest))?;
                dst.write(&blob)?;
                copied_blobs += 1;
            }
        }
        let obj = src.read(&id)?.ok_or(silt_store::StoreError::NotFound(id))?;
        pending_commits.push(obj);
    }

    let copied_commits = pending_commits.len();
    for obj in &pending_commits {
        dst.write(obj)?;
    }
    debug!(commits = copied_commits, blobs = copied_blobs, "copied objects");
    Ok(())
}
