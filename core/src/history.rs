//! Undo/redo history of committed amplitude pairs.
//!
//! Entries live in an arena and link to their neighbours by index. `current`
//! is the entry the user is looking at; `top` is the newest committed entry.
//! After an undo, the entries between `current` and `top` can be redone until
//! the next [`History::push`], which drops them.
//!
//! ```text
//! first <-> ... <-> current <-> ... <-> top
//!                      ^ undo     redo ^
//! ```

use std::iter;
use std::mem;

use thiserror::Error;

use qubit_types::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history is empty")]
    Empty,
    #[error("no prior state to return to")]
    NoPriorState,
}

#[derive(Debug, Clone, Default)]
struct Entry {
    snapshot: Snapshot,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Linear edit history with a movable cursor.
///
/// Released slots are kept on a free list and reused by later pushes, so a
/// long session of undo-then-edit cycles does not grow the arena.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Entry>,
    free: Vec<usize>,
    first: Option<usize>,
    current: Option<usize>,
    top: Option<usize>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, including ones that can still be redone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.current.is_some_and(|i| self.entries[i].prev.is_some())
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.current != self.top
    }

    /// Zero-based position of the cursor, counted from the first entry.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        let mut at = self.current?;
        let mut steps = 0;
        while let Some(prev) = self.entries[at].prev {
            at = prev;
            steps += 1;
        }
        Some(steps)
    }

    /// Commit a snapshot after the cursor and make it both current and top.
    ///
    /// Anything that could have been redone from the old cursor is discarded.
    pub fn push(&mut self, snapshot: impl Into<Snapshot>) -> &Snapshot {
        let prev = self.current;
        if let Some(cur) = prev {
            let abandoned = self.entries[cur].next.take();
            self.release_from(abandoned);
        }

        let index = self.alloc(Entry {
            snapshot: snapshot.into(),
            prev,
            next: None,
        });
        match prev {
            Some(cur) => self.entries[cur].next = Some(index),
            None => self.first = Some(index),
        }
        self.current = Some(index);
        self.top = Some(index);

        tracing::trace!(len = self.len(), "history push");
        &self.entries[index].snapshot
    }

    /// Step the cursor back one entry.
    pub fn undo(&mut self) -> Result<&Snapshot, HistoryError> {
        let cur = self.current.ok_or(HistoryError::Empty)?;
        let prev = self.entries[cur].prev.ok_or(HistoryError::NoPriorState)?;
        self.current = Some(prev);
        tracing::trace!("history undo");
        Ok(&self.entries[prev].snapshot)
    }

    /// Step the cursor forward one entry. At the top this returns the
    /// current entry unchanged.
    pub fn redo(&mut self) -> Result<&Snapshot, HistoryError> {
        let cur = self.current.ok_or(HistoryError::Empty)?;
        let target = match self.entries[cur].next {
            Some(next) if self.current != self.top => next,
            _ => cur,
        };
        self.current = Some(target);
        tracing::trace!(moved = target != cur, "history redo");
        Ok(&self.entries[target].snapshot)
    }

    /// Step back one entry and discard the old current entry together with
    /// everything after it. The new current entry becomes the top.
    pub fn truncate_at_current(&mut self) -> Result<&Snapshot, HistoryError> {
        let cur = self.current.ok_or(HistoryError::Empty)?;
        let prev = self.entries[cur].prev.ok_or(HistoryError::NoPriorState)?;

        self.entries[prev].next = None;
        self.release_from(Some(cur));
        self.current = Some(prev);
        self.top = Some(prev);

        tracing::trace!(len = self.len(), "history truncate");
        Ok(&self.entries[prev].snapshot)
    }

    pub fn peek_current(&self) -> Result<&Snapshot, HistoryError> {
        let cur = self.current.ok_or(HistoryError::Empty)?;
        Ok(&self.entries[cur].snapshot)
    }

    /// The oldest entry, for callers that offer a restart.
    pub fn first(&self) -> Result<&Snapshot, HistoryError> {
        let first = self.first.ok_or(HistoryError::Empty)?;
        Ok(&self.entries[first].snapshot)
    }

    /// Snapshots from first to top, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        let mut at = self.first;
        iter::from_fn(move || {
            let entry = &self.entries[at?];
            at = entry.next;
            Some(&entry.snapshot)
        })
    }

    fn alloc(&mut self, entry: Entry) -> usize {
        if let Some(index) = self.free.pop() {
            self.entries[index] = entry;
            index
        } else {
            self.entries.push(entry);
            self.entries.len() - 1
        }
    }

    fn release_from(&mut self, start: Option<usize>) {
        let mut at = start;
        while let Some(index) = at {
            let entry = mem::take(&mut self.entries[index]);
            at = entry.next;
            self.free.push(index);
        }
    }
}
