//! Selection model: the live duty set derived from the undo history,
//! plus the saved-baseline comparison that drives the save control.

use crate::calendar::YearMonth;
use crate::datekey::DateKey;
use crate::history::{History, Snapshot};
use std::collections::BTreeSet;

/// The user's duty selection with undo/redo and save tracking.
///
/// The active selection is always the snapshot at the history cursor. The
/// saved baseline is whatever was last loaded from or written to the store;
/// it is deliberately not part of the history.
#[derive(Debug, Clone)]
pub struct Schedule {
    history: History,
    saved: Snapshot,
}

impl Schedule {
    /// Seed from the snapshot loaded at startup (or empty).
    #[must_use]
    pub fn from_saved(saved: Snapshot) -> Self {
        Self {
            history: History::seeded(saved.clone()),
            saved,
        }
    }

    /// The active selection snapshot.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    /// Flip membership of `key` and record a new history entry.
    ///
    /// Toggling the same key twice restores the prior membership but still
    /// produces two entries: undo granularity is per toggle.
    pub fn toggle(&mut self, key: DateKey) {
        let mut set: BTreeSet<DateKey> = self.current().to_set();
        if !set.remove(&key) {
            set.insert(key);
        }
        self.history.push(set.into_iter().collect());
    }

    /// Whether `key` is currently selected.
    #[must_use]
    pub fn is_selected(&self, key: &DateKey) -> bool {
        self.current().contains(key)
    }

    /// Step back one toggle. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        self.history.step_back()
    }

    /// Step forward one toggle. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.history.step_forward()
    }

    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.history.can_step_back()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_step_forward()
    }

    /// Save-pending check: true when the active selection differs from the
    /// saved baseline. Order-independent by construction.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.current().same_selection(&self.saved)
    }

    /// Record that the active selection was written to the store.
    pub fn mark_saved(&mut self) {
        self.saved = self.current().clone();
    }

    /// Selected keys within `ym`, sorted ascending.
    #[must_use]
    pub fn month_keys(&self, ym: YearMonth) -> Vec<DateKey> {
        crate::analysis::month_selection(self.current(), ym)
    }

    /// Number of selected days within `ym`.
    #[must_use]
    pub fn month_count(&self, ym: YearMonth) -> usize {
        self.current()
            .keys()
            .iter()
            .filter(|k| ym.contains(k))
            .count()
    }
}
