//! Split-point search: the nearest common ancestor of two branch tips.

use std::collections::{HashSet, VecDeque};

use silt_store::ObjectStore;
use silt_types::ObjectId;
use tracing::debug;

use crate::error::GraphResult;
use crate::walk::{ancestor_distances, load_commit};

/// Outcome of the split-point search between `current` and `other`.
///
/// The three non-`Base` variants are short-circuits: no merge is performed
/// and no commit is created. `FastForwardable` in particular is a signal to
/// the caller, never acted on silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitPoint {
    /// The two tips are the same commit.
    SelfMerge,
    /// `other` is already an ancestor of `current`; nothing to merge.
    AlreadyAncestor,
    /// `current` is an ancestor of `other`; the caller should fast-forward.
    FastForwardable,
    /// A true three-way merge with this commit as the common base.
    Base(ObjectId),
}

/// Find the split point of `current` and `other`.
///
/// Walks `current`'s ancestry breadth-first recording distances, then walks
/// from `other` level by level. The first level containing any commit from
/// `current`'s ancestry decides the outcome; among candidates in that level
/// the one with the lowest recorded distance from `current` wins, with the
/// digest ordering as the final tie-break for determinism.
pub fn find_split_point(
    store: &dyn ObjectStore,
    current: &ObjectId,
    other: &ObjectId,
) -> GraphResult<SplitPoint> {
    if current == other {
        return Ok(SplitPoint::SelfMerge);
    }

    let distances = ancestor_distances(store, current)?;
    if distances.contains_key(other) {
        return Ok(SplitPoint::AlreadyAncestor);
    }

    let mut visited = HashSet::new();
    visited.insert(*other);
    let mut level = vec![*other];

    while !level.is_empty() {
        // Candidates in this level that are also ancestors of `current`.
        let mut best: Option<(u32, ObjectId)> = None;
        for id in &level {
            if let Some(&distance) = distances.get(id) {
                let candidate = (distance, *id);
                if best.map_or(true, |b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }
        if let Some((distance, id)) = best {
            if id == *current {
                return Ok(SplitPoint::FastForwardable);
            }
            debug!(split = %id.short_hex(), distance, "found split point");
            return Ok(SplitPoint::Base(id));
        }

        let mut next = VecDeque::new();
        for id in level {
            let commit = load_commit(store, &id)?;
            for parent in commit.parent.into_iter().chain(commit.merge_parent) {
                if visited.insert(parent) {
                    next.push_back(parent);
                }
            }
        }
        level = next.into_iter().collect();
    }

    // Unreachable for well-formed repositories: all commits descend from one
    // root, so a common ancestor always exists.
    Ok(SplitPoint::AlreadyAncestor)
}
