//! Collision tables shared by the meet-in-the-middle steps.

use gf2::BitVec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::ControlFlow;

/// A projected partial column sum together with the columns that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionEntry<Indexes = Vec<usize>> {
    pub key: BitVec,
    pub indexes: Indexes,
}

impl<Indexes> CollisionEntry<Indexes> {
    pub fn new(key: BitVec, indexes: Indexes) -> Self {
        Self { key, indexes }
    }
}

pub fn sort_by_key<Indexes>(entries: &mut [CollisionEntry<Indexes>]) {
    entries.sort_unstable_by(|left, right| left.key.cmp(&right.key));
}

/// Length of the run of equal keys starting at `start`.
fn run_length<Indexes>(entries: &[CollisionEntry<Indexes>], start: usize) -> usize {
    entries[start..]
        .iter()
        .take_while(|entry| entry.key == entries[start].key)
        .count()
}

/// Equality join of two lists sorted with [`sort_by_key`].
///
/// `visit` sees every pair with equal keys: each run of equal keys on the left is paired with
/// every entry of the matching run on the right. The join stops at the first
/// [`ControlFlow::Break`], whose value is returned.
pub fn merge_join<Left, Right, Output>(
    left: &[CollisionEntry<Left>],
    right: &[CollisionEntry<Right>],
    mut visit: impl FnMut(&CollisionEntry<Left>, &CollisionEntry<Right>) -> ControlFlow<Output>,
) -> Option<Output> {
    let (mut left_start, mut right_start) = (0, 0);
    while left_start < left.len() && right_start < right.len() {
        match left[left_start].key.cmp(&right[right_start].key) {
            std::cmp::Ordering::Less => left_start += 1,
            std::cmp::Ordering::Greater => right_start += 1,
            std::cmp::Ordering::Equal => {
                let left_end = left_start + run_length(left, left_start);
                let right_end = right_start + run_length(right, right_start);
                for left_entry in &left[left_start..left_end] {
                    for right_entry in &right[right_start..right_end] {
                        if let ControlFlow::Break(output) = visit(left_entry, right_entry) {
                            return Some(output);
                        }
                    }
                }
                left_start = left_end;
                right_start = right_end;
            }
        }
    }
    None
}

/// Equality join through a hash multimap built over `left`; neither list needs sorting.
pub fn hash_join<Left, Right, Output>(
    left: &[CollisionEntry<Left>],
    right: &[CollisionEntry<Right>],
    mut visit: impl FnMut(&CollisionEntry<Left>, &CollisionEntry<Right>) -> ControlFlow<Output>,
) -> Option<Output> {
    let mut buckets: HashMap<&BitVec, Vec<usize>> = HashMap::with_capacity(left.len());
    for (position, entry) in left.iter().enumerate() {
        buckets.entry(&entry.key).or_default().push(position);
    }
    for right_entry in right {
        for &position in buckets.get(&right_entry.key).into_iter().flatten() {
            if let ControlFlow::Break(output) = visit(&left[position], right_entry) {
                return Some(output);
            }
        }
    }
    None
}

/// How two collision lists are matched on their keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStrategy {
    /// Sort both lists, then walk them with [`merge_join`].
    #[default]
    SortMerge,
    /// [`hash_join`]; the lists keep their order.
    Hash,
}

impl JoinStrategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SortMerge => "sort-merge",
            Self::Hash => "hash",
        }
    }

    /// Visits every pair of entries with equal keys until `visit` breaks.
    ///
    /// Under [`JoinStrategy::SortMerge`] both lists are sorted in place first, and pairs come
    /// in increasing key order.
    pub fn join<Left, Right, Output>(
        self,
        left: &mut [CollisionEntry<Left>],
        right: &mut [CollisionEntry<Right>],
        visit: impl FnMut(&CollisionEntry<Left>, &CollisionEntry<Right>) -> ControlFlow<Output>,
    ) -> Option<Output> {
        match self {
            Self::SortMerge => {
                sort_by_key(left);
                sort_by_key(right);
                merge_join(left, right, visit)
            }
            Self::Hash => hash_join(left, right, visit),
        }
    }
}

impl std::fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
