//! Linear undo/redo log with atomic edit groups and a save point.

use crate::buffer::TextBuffer;
use tracing::warn;

/// Direction of a recorded buffer mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// One reversible buffer mutation.
///
/// `group == 0` marks a standalone entry; consecutive entries sharing a
/// non-zero group undo and redo together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoEntry {
    pub kind: EditKind,
    pub offset: usize,
    pub text: String,
    pub len: usize,
    pub cursor_before: usize,
    pub cursor_after: usize,
    pub anchor_before: Option<usize>,
    pub group: u32,
}

impl UndoEntry {
    /// Records `text` inserted at `offset`.
    ///
    /// # Arguments
    /// - `offset`: Char offset the text now starts at.
    /// - `text`: Inserted text, kept for redo.
    /// - `cursor_before`: Cursor an undo of this entry restores.
    ///
    /// # Returns
    /// A standalone entry whose redo cursor sits after the insertion.
    pub fn insert(offset: usize, text: impl Into<String>, cursor_before: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            kind: EditKind::Insert,
            offset,
            text,
            len,
            cursor_before,
            cursor_after: offset + len,
            anchor_before: None,
            group: 0,
        }
    }

    /// Records `text` removed from `offset`.
    ///
    /// # Arguments
    /// - `offset`: Char offset the removed text started at.
    /// - `text`: Removed text, reinserted on undo.
    /// - `cursor_before`: Cursor an undo of this entry restores.
    ///
    /// # Returns
    /// A standalone entry whose redo cursor sits at `offset`.
    pub fn delete(offset: usize, text: impl Into<String>, cursor_before: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            kind: EditKind::Delete,
            offset,
            text,
            len,
            cursor_before,
            cursor_after: offset,
            anchor_before: None,
            group: 0,
        }
    }

    /// Sets the selection anchor an undo restores alongside `cursor_before`.
    pub fn with_anchor(mut self, anchor_before: Option<usize>) -> Self {
        self.anchor_before = anchor_before;
        self
    }

    /// Tags the entry so it undoes and redoes with neighbours sharing `group`.
    pub fn in_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    fn revert(&self, buffer: &mut TextBuffer) {
        match self.kind {
            EditKind::Insert => {
                buffer.delete(self.offset, self.len);
            }
            EditKind::Delete => {
                buffer.insert(self.offset, &self.text);
            }
        }
    }

    fn reapply(&self, buffer: &mut TextBuffer) {
        match self.kind {
            EditKind::Insert => {
                buffer.insert(self.offset, &self.text);
            }
            EditKind::Delete => {
                buffer.delete(self.offset, self.len);
            }
        }
    }
}

/// Cursor and selection anchor to restore after an undo or redo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorState {
    pub cursor: usize,
    pub anchor: Option<usize>,
}

/// Flat history with a `current` position separating undo and redo sides.
#[derive(Debug)]
pub struct EditHistory {
    entries: Vec<UndoEntry>,
    current: usize,
    next_group: u32,
    save_point: Option<usize>,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Creates an empty history positioned at its save point.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
            next_group: 0,
            save_point: Some(0),
        }
    }

    /// Records an applied mutation, discarding any redo entries first.
    ///
    /// When storage cannot grow the entry is dropped: the edit stays applied
    /// but is not undoable.
    pub fn push(&mut self, entry: UndoEntry) {
        if self.current < self.entries.len() {
            if self.save_point.is_some_and(|point| point > self.current) {
                self.save_point = None;
            }
            self.entries.truncate(self.current);
        }
        if self.entries.try_reserve(1).is_err() {
            warn!(
                entries = self.entries.len(),
                "undo history allocation failed; edit is not undoable"
            );
            return;
        }
        self.entries.push(entry);
        self.current = self.entries.len();
    }

    /// Allocates a fresh non-zero group id.
    pub fn next_group(&mut self) -> u32 {
        self.next_group = self.next_group.wrapping_add(1).max(1);
        self.next_group
    }

    /// Returns whether [`undo`](Self::undo) has an entry to revert.
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current < self.entries.len()
    }

    /// Reverts the newest entry, or its whole group.
    ///
    /// # Arguments
    /// - `buffer`: Buffer the entries were recorded against, in the state
    ///   left by the newest entry.
    ///
    /// # Returns
    /// The cursor and anchor from before the earliest reverted entry, or
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> Option<CursorState> {
        if self.current == 0 {
            return None;
        }
        loop {
            self.current -= 1;
            let entry = &self.entries[self.current];
            entry.revert(buffer);
            let group = entry.group;
            let continues = group != 0
                && self.current > 0
                && self.entries[self.current - 1].group == group;
            if !continues {
                break Some(CursorState {
                    cursor: entry.cursor_before,
                    anchor: entry.anchor_before,
                });
            }
        }
    }

    /// Reapplies the next undone entry, or its whole group.
    ///
    /// # Returns
    /// The bare cursor after the last reapplied entry, or `None` when there
    /// is nothing to redo.
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> Option<CursorState> {
        if self.current >= self.entries.len() {
            return None;
        }
        loop {
            let entry = &self.entries[self.current];
            entry.reapply(buffer);
            let cursor = entry.cursor_after;
            let group = entry.group;
            self.current += 1;
            let continues = group != 0
                && self.current < self.entries.len()
                && self.entries[self.current].group == group;
            if !continues {
                break Some(CursorState {
                    cursor,
                    anchor: None,
                });
            }
        }
    }

    /// Records the current position as the persisted state.
    pub fn mark_saved(&mut self) {
        self.save_point = Some(self.current);
    }

    /// Returns whether the content differs from the last save point.
    pub fn is_modified(&self) -> bool {
        self.save_point != Some(self.current)
    }

    /// Drops every entry. The empty history counts as saved.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = 0;
        self.save_point = Some(0);
    }

    /// Number of stored entries on both the undo and redo sides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
