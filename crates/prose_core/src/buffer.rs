//! Gap-buffer text storage with char-indexed editing primitives.

use crate::constants::{DEFAULT_GAP_GROW, DEFAULT_GAP_INIT};
use std::ops::Range;
use tracing::warn;

/// Char storage with a movable gap at the most recent edit point.
///
/// Logical positions count `char`s and lie in `[0, len()]`. The gap occupies
/// `data[gap_start..gap_end]`; its contents are never observable.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    data: Vec<char>,
    gap_start: usize,
    gap_end: usize,
    grow: usize,
    mutation: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates an empty buffer with the default gap size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_GAP_INIT, DEFAULT_GAP_GROW)
    }

    /// Creates an empty buffer with `initial` chars of gap and `grow` chars of
    /// headroom added whenever the gap has to be enlarged.
    pub fn with_capacity(initial: usize, grow: usize) -> Self {
        let initial = initial.max(1);
        Self {
            data: vec!['\0'; initial],
            gap_start: 0,
            gap_end: initial,
            grow: grow.max(1),
            mutation: 0,
        }
    }

    /// Creates a buffer holding `text` with the gap parked at the end.
    ///
    /// The mutation counter starts at zero: loading is not an edit.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, DEFAULT_GAP_INIT, DEFAULT_GAP_GROW)
    }

    /// Like [`TextBuffer::from_text`] with explicit gap sizing.
    pub fn from_text_with(text: &str, initial: usize, grow: usize) -> Self {
        let initial = initial.max(1);
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        data.resize(len + initial, '\0');
        Self {
            data,
            gap_start: len,
            gap_end: len + initial,
            grow: grow.max(1),
            mutation: 0,
        }
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Returns the logical length in chars.
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns `true` when the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total allocated slots, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Logical position of the gap.
    pub fn gap_start(&self) -> usize {
        self.gap_start
    }

    /// Monotonic counter bumped by every effective insert or delete.
    pub fn mutation(&self) -> u64 {
        self.mutation
    }

    /// Returns the char at `pos`, or `'\0'` when `pos` is out of range.
    pub fn char_at(&self, pos: usize) -> char {
        if pos >= self.len() {
            return '\0';
        }
        if pos < self.gap_start {
            self.data[pos]
        } else {
            self.data[pos + self.gap_len()]
        }
    }

    /// Iterates every char in logical order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Iterates the chars of `range`, clamped to the buffer.
    pub fn chars_in(&self, range: Range<usize>) -> impl Iterator<Item = char> + '_ {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.chars().skip(start).take(end - start)
    }

    /// Copies `len` chars starting at `start` into a new string (clamped).
    pub fn copy_range(&self, start: usize, len: usize) -> String {
        let start = start.min(self.len());
        let end = start.saturating_add(len).min(self.len());
        let mut out = String::with_capacity(end - start);
        if start < self.gap_start {
            let head_end = end.min(self.gap_start);
            out.extend(self.data[start..head_end].iter());
        }
        if end > self.gap_start {
            let tail_start = start.max(self.gap_start) + self.gap_len();
            let tail_end = end + self.gap_len();
            out.extend(self.data[tail_start..tail_end].iter());
        }
        out
    }

    /// Returns the whole content as a string.
    pub fn to_text(&self) -> String {
        self.chars().collect()
    }

    /// Moves the gap so that it starts at `pos` (clamped).
    ///
    /// Cost is proportional to the distance moved.
    fn move_gap(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        let gap = self.gap_len();
        if pos < self.gap_start {
            // Shift data[pos..gap_start] right to end at gap_end.
            self.data.copy_within(pos..self.gap_start, pos + gap);
        } else if pos > self.gap_start {
            // Shift data[gap_end..pos + gap] left to start at gap_start.
            self.data.copy_within(self.gap_end..pos + gap, self.gap_start);
        }
        self.gap_start = pos;
        self.gap_end = pos + gap;
    }

    /// Makes room for `needed` chars in the gap.
    ///
    /// Returns `false` when the allocation cannot be satisfied; the buffer is
    /// left untouched in that case.
    fn ensure_gap(&mut self, needed: usize) -> bool {
        if self.gap_len() >= needed {
            return true;
        }
        let Some(new_total) = self
            .data
            .len()
            .checked_add(needed)
            .and_then(|total| total.checked_add(self.grow))
        else {
            warn!(needed, "text buffer growth overflowed; dropping write");
            return false;
        };
        let mut grown: Vec<char> = Vec::new();
        if grown.try_reserve_exact(new_total).is_err() {
            warn!(
                needed,
                requested = new_total,
                "text buffer allocation failed; dropping write"
            );
            return false;
        }
        let tail_len = self.data.len() - self.gap_end;
        let new_gap_end = new_total - tail_len;
        grown.extend_from_slice(&self.data[..self.gap_start]);
        grown.resize(new_gap_end, '\0');
        grown.extend_from_slice(&self.data[self.gap_end..]);
        self.data = grown;
        self.gap_end = new_gap_end;
        true
    }

    /// Inserts `text` at `pos` (clamped) and returns the number of chars
    /// written. Returns zero when `text` is empty or growth failed.
    pub fn insert(&mut self, pos: usize, text: &str) -> usize {
        let count = text.chars().count();
        if count == 0 {
            return 0;
        }
        let pos = pos.min(self.len());
        if !self.ensure_gap(count) {
            return 0;
        }
        self.move_gap(pos);
        for (slot, ch) in self.data[self.gap_start..self.gap_start + count]
            .iter_mut()
            .zip(text.chars())
        {
            *slot = ch;
        }
        self.gap_start += count;
        self.mutation = self.mutation.wrapping_add(1);
        count
    }

    /// Deletes up to `len` chars starting at `pos` and returns how many were
    /// removed after clamping to the buffer end.
    pub fn delete(&mut self, pos: usize, len: usize) -> usize {
        let total = self.len();
        if pos >= total || len == 0 {
            return 0;
        }
        let count = len.min(total - pos);
        self.move_gap(pos);
        self.gap_end += count;
        self.mutation = self.mutation.wrapping_add(1);
        count
    }

    #[cfg(test)]
    pub(crate) fn ensure_gap_for_test(&mut self, needed: usize) -> bool {
        self.ensure_gap(needed)
    }
}
