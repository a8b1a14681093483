//! Per-file three-way snapshot resolution.

use silt_store::{Blob, ObjectStore, Snapshot, StoreError};
use silt_types::ObjectId;
use tracing::debug;

use crate::error::{MergeError, MergeResult};
use silt_graph::{find_split_point, load_commit, SplitPoint};

/// The result of resolving two snapshots against their common base.
///
/// `conflicts` lists the files whose snapshot entry is a synthesized
/// conflict-marker blob. A non-empty list is still a completed merge; the
/// caller reports the conflicts and commits the snapshot regardless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The merged filename -> blob-digest mapping.
    pub snapshot: Snapshot,
    /// Sorted names of files that resolved to a conflict blob.
    pub conflicts: Vec<String>,
}

impl Resolution {
    /// Returns `true` if every file resolved cleanly.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Resolve the merge of `current` and `other` tips.
///
/// Runs the split-point search, mapping its short-circuit outcomes to
/// [`MergeError`] variants, then resolves the two snapshots against the
/// base snapshot file by file.
pub fn merge_tips(
    store: &dyn ObjectStore,
    current: &ObjectId,
    other: &ObjectId,
) -> MergeResult<Resolution> {
    let base = match find_split_point(store, current, other)? {
        SplitPoint::SelfMerge => return Err(MergeError::SelfMerge),
        SplitPoint::AlreadyAncestor => return Err(MergeError::AlreadyAncestor),
        SplitPoint::FastForwardable => return Err(MergeError::FastForwardable),
        SplitPoint::Base(id) => id,
    };

    let base_commit = load_commit(store, &base)?;
    let current_commit = load_commit(store, current)?;
    let other_commit = load_commit(store, other)?;

    resolve_snapshots(
        store,
        &base_commit.snapshot,
        &current_commit.snapshot,
        &other_commit.snapshot,
    )
}

/// Resolve `current` and `other` against `base`, file by file.
///
/// For each name in the union of the three snapshots:
/// - both sides agree (same digest or both absent): that state wins;
/// - only one side diverged from the base: the diverging side wins,
///   including deletions;
/// - both diverged, differently: a conflict blob is synthesized, written to
///   the store, and recorded in the resolution.
pub fn resolve_snapshots(
    store: &dyn ObjectStore,
    base: &Snapshot,
    current: &Snapshot,
    other: &Snapshot,
) -> MergeResult<Resolution> {
    let mut names: Vec<&String> = base.keys().chain(current.keys()).chain(other.keys()).collect();
    names.sort();
    names.dedup();

    let mut resolution = Resolution::default();
    for name in names {
        let b = base.get(name);
        let c = current.get(name);
        let o = other.get(name);

        let winner = if c == o {
            c
        } else if b == c {
            o
        } else if b == o {
            c
        } else {
            let id = synthesize_conflict(store, name, c, o)?;
            debug!(file = %name, "merge conflict");
            resolution.conflicts.push(name.clone());
            resolution.snapshot.insert(name.clone(), id);
            continue;
        };
        if let Some(digest) = winner {
            resolution.snapshot.insert(name.clone(), *digest);
        }
    }

    Ok(resolution)
}

/// Build and store the conflict blob for `name`.
///
/// The blob splices both sides between fixed marker lines; an absent side
/// contributes zero bytes. No newline is inserted between the content and
/// the following marker, so content not ending in a newline runs into it.
fn synthesize_conflict(
    store: &dyn ObjectStore,
    name: &str,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> MergeResult<ObjectId> {
    let head_bytes = read_side(store, current)?;
    let other_bytes = read_side(store, other)?;

    let mut data = Vec::with_capacity(head_bytes.len() + other_bytes.len() + 26);
    data.extend_from_slice(b"<<<<<<<\n");
    data.extend_from_slice(&head_bytes);
    data.extend_from_slice(b"=======\n");
    data.extend_from_slice(&other_bytes);
    data.extend_from_slice(b">>>>>>>\n");

    let blob = Blob::new(name, data);
    Ok(store.write(&blob.to_stored_object()?)?)
}

fn read_side(store: &dyn ObjectStore, digest: Option<&ObjectId>) -> MergeResult<Vec<u8>> {
    match digest {
        None => Ok(Vec::new()),
        Some(id) => {
            let obj = store.read(id)?.ok_or(StoreError::NotFound(*id))?;
            Ok(Blob::from_stored_object(&obj)?.data)
        }
    }
}
