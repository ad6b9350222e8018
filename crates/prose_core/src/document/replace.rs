//! Find and replace over the document text.

use super::{Document, IndexSync};
use crate::search;

impl Document {
    /// Start offsets of every case-insensitive, non-overlapping match.
    pub fn find_all(&self, query: &str) -> Vec<usize> {
        search::find_all(self.buffer.chars(), query)
    }

    /// Selects the first match after the current selection (or cursor),
    /// wrapping to the document start. Returns `false` without a match.
    pub fn select_next_match(&mut self, query: &str) -> bool {
        let from = self
            .selection_range()
            .map_or(self.cursor, |range| range.end);
        let matches = self.find_all(query);
        self.select_match(search::next_match(&matches, from), query)
    }

    /// Selects the last match before the current selection (or cursor),
    /// wrapping to the document end.
    pub fn select_prev_match(&mut self, query: &str) -> bool {
        let from = self
            .selection_range()
            .map_or(self.cursor, |range| range.start);
        let matches = self.find_all(query);
        self.select_match(search::prev_match(&matches, from), query)
    }

    fn select_match(&mut self, start: Option<usize>, query: &str) -> bool {
        match start {
            Some(start) => {
                self.set_selection(start, start + query.chars().count());
                true
            }
            None => false,
        }
    }

    /// Replaces `query_len` chars at `offset` with `replacement` as one
    /// grouped undo step.
    pub fn replace_at(&mut self, offset: usize, query_len: usize, replacement: &str) -> bool {
        let len = self.length();
        let start = offset.min(len);
        let end = start.saturating_add(query_len).min(len);
        if start == end && replacement.is_empty() {
            return false;
        }
        self.set_selection(start, end);
        if start == end {
            self.anchor = None;
        }
        self.insert_text(replacement)
    }

    /// Replaces every match of `query` under one undo group and returns the
    /// number of replacements. The cursor lands after the last one.
    pub fn replace_all(&mut self, query: &str, replacement: &str) -> usize {
        let matches = self.find_all(query);
        if matches.is_empty() {
            return 0;
        }
        let started = self.perf_start();
        let query_len = query.chars().count();
        let replacement_len = replacement.chars().count();
        let sync = if query.contains('\n') || replacement.contains('\n') {
            IndexSync::Deferred
        } else {
            IndexSync::Incremental
        };
        let group = self.history.next_group();
        let mut last_end = self.cursor;
        for (idx, start) in matches.iter().enumerate() {
            // Earlier replacements shift later matches.
            let pos = (start + idx * replacement_len) - idx * query_len;
            last_end = pos + replacement_len;
            self.splice(pos, query_len, replacement, group, last_end, sync);
        }
        if sync == IndexSync::Deferred {
            self.lines.rebuild(&self.buffer);
        }
        self.cursor = last_end.min(self.length());
        self.anchor = None;
        self.finish_edit("replace_all", started);
        matches.len()
    }
}
