// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Placeholder id allocation for objects that have not been saved yet.

use crate::models::ObjectId;
use std::collections::HashSet;

/// Return the first `new-N` id (N starting at 1) absent from `existing`.
///
/// Call again with the current id set for every added object; the result
/// is not cached.
pub fn allocate_placeholder_id<'a, I>(existing: I) -> ObjectId
where
    I: IntoIterator<Item = &'a ObjectId>,
{
    allocate_placeholder_id_above(existing, 0)
}

/// Like [`allocate_placeholder_id`], but never returns `new-N` with
/// `N <= retired`. Passing the highest placeholder number handed out so far
/// keeps ids of removed objects from being minted again.
pub fn allocate_placeholder_id_above<'a, I>(existing: I, retired: u32) -> ObjectId
where
    I: IntoIterator<Item = &'a ObjectId>,
{
    let taken: HashSet<u32> = existing
        .into_iter()
        .filter_map(|id| match id {
            ObjectId::Placeholder(n) => Some(*n),
            ObjectId::Persisted(_) => None,
        })
        .collect();

    let mut candidate = retired + 1;
    while taken.contains(&candidate) {
        candidate += 1;
    }
    ObjectId::Placeholder(candidate)
}
