//! Linear undo history over selection snapshots.
//!
//! The buffer is a flat vector of full snapshots plus a cursor. Pushing
//! after stepping back discards every snapshot beyond the cursor first —
//! the standard linear-undo policy, abandoned branches are gone for good.
//! All operations are total: stepping past either edge is a silent no-op.

use crate::datekey::DateKey;
use std::collections::BTreeSet;

/// One materialization of the selection set at a point in time.
///
/// Element order carries no meaning; two snapshots describe the same
/// selection iff their value sets are equal (see [`Snapshot::same_selection`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Vec<DateKey>);

impl Snapshot {
    /// Wrap an existing key list.
    #[must_use]
    pub const fn new(keys: Vec<DateKey>) -> Self {
        Self(keys)
    }

    /// The empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Keys in stored order.
    #[must_use]
    pub fn keys(&self) -> &[DateKey] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `key` is a member of this selection.
    #[must_use]
    pub fn contains(&self, key: &DateKey) -> bool {
        self.0.contains(key)
    }

    /// Copy the selection into a set for mutation.
    #[must_use]
    pub fn to_set(&self) -> BTreeSet<DateKey> {
        self.0.iter().cloned().collect()
    }

    /// Order-independent equality: same value set, any element order.
    #[must_use]
    pub fn same_selection(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let mut a = self.0.clone();
        let mut b = other.0.clone();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl FromIterator<DateKey> for Snapshot {
    fn from_iter<T: IntoIterator<Item = DateKey>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered snapshots plus a cursor into them.
///
/// Invariant: once seeded, `cursor < snapshots.len()` always holds.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Start a history with a single initial snapshot at cursor 0.
    #[must_use]
    pub fn seeded(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop everything beyond the cursor, append, advance to the new entry.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Move the cursor back one entry. Returns whether it moved.
    pub fn step_back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor forward one entry. Returns whether it moved.
    pub fn step_forward(&mut self) -> bool {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn can_step_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_step_forward(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
