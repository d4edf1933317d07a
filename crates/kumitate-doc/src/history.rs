//! Linear undo/redo over full document snapshots.
//!
//! Invariant: `entries[cursor]` is always the current document. A fresh
//! history holds exactly one entry (the starting document) with the cursor at
//! 0, so there is nothing to undo. Snapshotting after an undo discards the
//! redo tail.
//!
//! Depth is bounded by `limit` undo steps; when exceeded, the oldest entries
//! are dropped and the cursor shifts down with them.

use kumitate_types::BlockInstance;

use crate::{DocError, Result};

/// One point in history: the full block sequence plus what produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// Operation that produced this state (`"insert"`, `"reorder"`, …).
    pub label: &'static str,
    pub blocks: Vec<BlockInstance>,
}

/// Snapshot stack with a cursor.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    /// Maximum undo steps kept; `None` = unbounded.
    limit: Option<usize>,
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: Vec<BlockInstance>, limit: Option<usize>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                label: "open",
                blocks: initial,
            }],
            cursor: 0,
            limit,
        }
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: Vec<BlockInstance>) {
        *self = Self::new(initial, self.limit);
    }

    /// Record a new current state, truncating any redo tail.
    pub fn snapshot(&mut self, label: &'static str, blocks: Vec<BlockInstance>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { label, blocks });
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            let max_entries = limit + 1;
            if self.entries.len() > max_entries {
                let excess = self.entries.len() - max_entries;
                self.entries.drain(..excess);
                self.cursor -= excess;
            }
        }
    }

    /// Step back; returns the state to restore.
    pub fn undo(&mut self) -> Result<&HistoryEntry> {
        if self.cursor == 0 {
            return Err(DocError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(&self.entries[self.cursor])
    }

    /// Step forward; returns the state to restore.
    pub fn redo(&mut self) -> Result<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return Err(DocError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Label of the operation an undo would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.can_undo().then(|| self.entries[self.cursor].label)
    }

    /// Label of the operation a redo would reapply.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.can_redo().then(|| self.entries[self.cursor + 1].label)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
