//! Breadth-first walks over the commit DAG.

use std::collections::{HashMap, HashSet, VecDeque};

use silt_store::{Commit, ObjectStore};
use silt_types::ObjectId;

use crate::error::{GraphError, GraphResult};

/// Load a commit, failing with [`GraphError::MissingCommit`] if absent.
pub fn load_commit(store: &dyn ObjectStore, id: &ObjectId) -> GraphResult<Commit> {
    let obj = store.read(id)?.ok_or(GraphError::MissingCommit(*id))?;
    Ok(Commit::from_stored_object(&obj)?)
}

fn parent_edges(commit: &Commit) -> impl Iterator<Item = ObjectId> + '_ {
    commit.parent.iter().chain(commit.merge_parent.iter()).copied()
}

/// BFS upward from `tip` over both parent edges, recording each visited
/// commit's distance from the tip (the tip itself is at distance 0).
pub fn ancestor_distances(
    store: &dyn ObjectStore,
    tip: &ObjectId,
) -> GraphResult<HashMap<ObjectId, u32>> {
    let mut distances = HashMap::new();
    distances.insert(*tip, 0u32);
    let mut queue: VecDeque<(ObjectId, u32)> = VecDeque::new();
    queue.push_back((*tip, 0));

    while let Some((current, depth)) = queue.pop_front() {
        let commit = load_commit(store, &current)?;
        for parent in parent_edges(&commit) {
            if !distances.contains_key(&parent) {
                distances.insert(parent, depth + 1);
                queue.push_back((parent, depth + 1));
            }
        }
    }

    Ok(distances)
}

/// Returns `true` if `ancestor` is `tip` itself or reachable from `tip`
/// through parent edges.
pub fn is_ancestor(
    store: &dyn ObjectStore,
    ancestor: &ObjectId,
    tip: &ObjectId,
) -> GraphResult<bool> {
    if ancestor == tip {
        return Ok(true);
    }
    let mut visited = HashSet::new();
    visited.insert(*tip);
    let mut queue = VecDeque::new();
    queue.push_back(*tip);

    while let Some(current) = queue.pop_front() {
        let commit = load_commit(store, &current)?;
        for parent in parent_edges(&commit) {
            if parent == *ancestor {
                return Ok(true);
            }
            if visited.insert(parent) {
                queue.push_back(parent);
            }
        }
    }

    Ok(false)
}

/// Every commit reachable from `tip` (including the tip), as `(id, commit)`
/// pairs in BFS order.
pub fn reachable_commits(
    store: &dyn ObjectStore,
    tip: &ObjectId,
) -> GraphResult<Vec<(ObjectId, Commit)>> {
    let mut visited = HashSet::new();
    visited.insert(*tip);
    let mut queue = VecDeque::new();
    queue.push_back(*tip);
    let mut out = Vec::new();

    while let Some(current) = queue.pop_front() {
        let commit = load_commit(store, &current)?;
        for parent in parent_edges(&commit) {
            if visited.insert(parent) {
                queue.push_back(parent);
            }
        }
        out.push((current, commit));
    }

    Ok(out)
}

/// Walk from `tip` to the root following only first-parent edges.
///
/// This is the `log` view: merge commits appear once and their second parent
/// line is not descended into.
pub fn first_parent_history(
    store: &dyn ObjectStore,
    tip: &ObjectId,
) -> GraphResult<Vec<(ObjectId, Commit)>> {
    let mut out = Vec::new();
    let mut cursor = Some(*tip);
    while let Some(id) = cursor {
        let commit = load_commit(store, &id)?;
        cursor = commit.parent;
        out.push((id, commit));
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use silt_store::{Commit, InMemoryObjectStore, ObjectStore, Snapshot};
    use silt_types::ObjectId;

    /// Append a commit with the given parents and return its id.
    pub fn put_commit(
        store: &InMemoryObjectStore,
        seq: u32,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
    ) -> ObjectId {
        let mut commit = Commit::new(
            format!("commit {seq}"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, seq).unwrap(),
            parent,
            Snapshot::new(),
        );
        commit.merge_parent = merge_parent;
        store.write(&commit.to_stored_object().unwrap()).unwrap()
    }

    /// Linear chain: root -> a -> b. Returns (root, a, b).
    pub fn linear_chain(store: &InMemoryObjectStore) -> (ObjectId, ObjectId, ObjectId) {
        let root = put_commit(store, 0, None, None);
        let a = put_commit(store, 1, Some(root), None);
        let b = put_commit(store, 2, Some(a), None);
        (root, a, b)
    }

    /// Diamond via a merge commit:
    /// ```text
    ///   root
    ///   /  \
    ///  l    r
    ///   \  /
    ///    m   (parent = l, merge_parent = r)
    /// ```
    pub fn diamond(store: &InMemoryObjectStore) -> (ObjectId, ObjectId, ObjectId, ObjectId) {
        let root = put_commit(store, 0, None, None);
        let l = put_commit(store, 1, Some(root), None);
        let r = put_commit(store, 2, Some(root), None);
        let m = put_commit(store, 3, Some(l), Some(r));
        (root, l, r, m)
    }
}
