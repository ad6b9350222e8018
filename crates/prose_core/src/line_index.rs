//! Logical line index: ordered line-start offsets over a [`TextBuffer`].

use crate::buffer::TextBuffer;

/// Sorted char offsets at which each logical line begins.
///
/// `offsets[0]` is always `0`, so an empty document has one line. Line `i`
/// owns `[offsets[i], offsets[i + 1])`, newline included.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
    dirty: bool,
    rescans: u64,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            dirty: true,
            rescans: 0,
        }
    }
}

impl LineIndex {
    /// Builds an index for `buffer`.
    pub fn build(buffer: &TextBuffer) -> Self {
        let mut index = Self::default();
        index.rebuild(buffer);
        index
    }

    /// Rescans the buffer for newlines.
    ///
    /// This is the O(n) fallback for edits the incremental entry points
    /// reject, and the only way to clear the dirty flag.
    ///
    /// # Arguments
    /// - `buffer`: Buffer whose current contents the index must describe.
    pub fn rebuild(&mut self, buffer: &TextBuffer) {
        self.offsets.clear();
        self.offsets.push(0);
        self.offsets.extend(
            buffer
                .chars()
                .enumerate()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(idx, _)| idx + 1),
        );
        self.dirty = false;
        self.rescans += 1;
    }

    /// Returns whether the offsets may no longer match the buffer.
    ///
    /// # Returns
    /// `true` until the next [`rebuild`](Self::rebuild); incremental updates
    /// refuse to run while set.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags the offsets as stale so the next edit notification is refused.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Number of full rescans performed over the index's lifetime.
    ///
    /// Perf logging reports it so editing sessions that keep falling back
    /// to rescans show up.
    pub fn rescans(&self) -> u64 {
        self.rescans
    }

    /// Line start offsets in ascending order.
    ///
    /// # Returns
    /// A slice whose first element is always `0` and whose length equals
    /// [`line_count`](Self::line_count).
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of logical lines; never zero.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the greatest line whose start is `<= offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.offsets
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }

    /// Start offset of `line`, clamped to the last line.
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.offsets.len() - 1);
        self.offsets[line]
    }

    /// End offset of `line`, excluding its newline. The last line ends at the
    /// buffer end.
    pub fn line_end(&self, line: usize, buffer: &TextBuffer) -> usize {
        let line = line.min(self.offsets.len() - 1);
        match self.offsets.get(line + 1) {
            Some(next) => next.saturating_sub(1),
            None => buffer.len(),
        }
    }

    /// Applies an insert of `text` at `pos` that already happened in the buffer.
    ///
    /// Returns `false` when the edit is not handled incrementally and the
    /// caller must [`rebuild`](Self::rebuild).
    pub fn notify_insert(&mut self, pos: usize, text: &str) -> bool {
        if self.dirty {
            return false;
        }
        let mut newlines = 0usize;
        let mut count = 0usize;
        for ch in text.chars() {
            count += 1;
            if ch == '\n' {
                newlines += 1;
            }
        }
        let line = self.line_of(pos);
        match (newlines, count) {
            (0, _) => {
                for start in &mut self.offsets[line + 1..] {
                    *start += count;
                }
                true
            }
            (1, 1) => {
                for start in &mut self.offsets[line + 1..] {
                    *start += 1;
                }
                self.offsets.insert(line + 1, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Applies a deletion of `deleted` starting at `pos` that already
    /// happened in the buffer. Returns `false` when a rebuild is required.
    pub fn notify_delete(&mut self, pos: usize, deleted: &str) -> bool {
        if self.dirty {
            return false;
        }
        let mut newlines = 0usize;
        let mut count = 0usize;
        for ch in deleted.chars() {
            count += 1;
            if ch == '\n' {
                newlines += 1;
            }
        }
        let line = self.line_of(pos);
        match (newlines, count) {
            (0, _) => {
                for start in &mut self.offsets[line + 1..] {
                    *start = start.saturating_sub(count);
                }
                true
            }
            (1, 1) => {
                if line + 1 >= self.offsets.len() {
                    return false;
                }
                self.offsets.remove(line + 1);
                for start in &mut self.offsets[line + 1..] {
                    *start = start.saturating_sub(1);
                }
                true
            }
            _ => false,
        }
    }
}
