//! Cursor motion: words, rows, lines, pages and tab-aware columns.

use super::{Document, EditorMode};
use crate::wrap::char_width;

/// Word chars for motion and word selection: alphanumerics and `_`.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

impl Document {
    /// Start of the word at or before `offset`, skipping non-word chars first.
    pub fn word_start(&self, offset: usize) -> usize {
        let mut pos = offset.min(self.length());
        while pos > 0 && !is_word_char(self.char_at(pos - 1)) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.char_at(pos - 1)) {
            pos -= 1;
        }
        pos
    }

    /// End of the word run starting at `offset`; `offset` itself when it is
    /// not on a word char.
    pub fn word_end(&self, offset: usize) -> usize {
        let len = self.length();
        let mut pos = offset.min(len);
        while pos < len && is_word_char(self.char_at(pos)) {
            pos += 1;
        }
        pos
    }

    /// Selects the word under `offset`. On a non-word char only moves the
    /// cursor there and returns `false`.
    pub fn select_word_at(&mut self, offset: usize) -> bool {
        let offset = offset.min(self.length());
        if !is_word_char(self.char_at(offset)) {
            self.move_cursor(offset, false);
            return false;
        }
        let mut start = offset;
        while start > 0 && is_word_char(self.char_at(start - 1)) {
            start -= 1;
        }
        let end = self.word_end(offset);
        self.set_selection(start, end);
        true
    }

    /// Left arrow. Without `extend`, an active selection collapses to its
    /// start instead of moving.
    pub fn move_left(&mut self, extend: bool, word: bool) {
        if word {
            let target = self.word_start(self.cursor);
            self.move_cursor(target, extend);
            return;
        }
        if !extend {
            if let Some(range) = self.selection_range() {
                self.move_cursor(range.start, false);
                return;
            }
        }
        self.move_cursor(self.cursor.saturating_sub(1), extend);
    }

    /// Right arrow; word steps stop at the next word end.
    pub fn move_right(&mut self, extend: bool, word: bool) {
        if word {
            let len = self.length();
            let mut pos = self.cursor;
            while pos < len && !is_word_char(self.char_at(pos)) {
                pos += 1;
            }
            let target = self.word_end(pos);
            self.move_cursor(target, extend);
            return;
        }
        if !extend {
            if let Some(range) = self.selection_range() {
                self.move_cursor(range.end, false);
                return;
            }
        }
        self.move_cursor(self.cursor.saturating_add(1), extend);
    }

    /// Display column of `offset` within its logical line (tab = 4).
    pub fn visual_col_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.length());
        let start = self.line_start(self.line_of(offset));
        self.buffer.chars_in(start..offset).map(char_width).sum()
    }

    /// Offset on `line` whose display column is the greatest not exceeding
    /// `vcol`, clamped to the line end.
    pub fn offset_at_visual_col(&self, line: usize, vcol: usize) -> usize {
        let start = self.line_start(line);
        let end = self.line_end(line);
        let mut col = 0usize;
        let mut pos = start;
        for ch in self.buffer.chars_in(start..end) {
            let width = char_width(ch);
            if col + width > vcol {
                break;
            }
            col += width;
            pos += 1;
        }
        pos
    }

    /// Sticky column used by vertical motion.
    fn vertical_goal(&mut self) -> usize {
        if let Some(col) = self.desired_col {
            return col;
        }
        match self.mode {
            EditorMode::Prose => self.offset_to_visual_row_col(self.cursor).1,
            EditorMode::Code => self.visual_col_of(self.cursor),
        }
    }

    fn offset_in_row(&mut self, row: usize, goal: usize) -> usize {
        match self.mode {
            EditorMode::Prose => self.visual_row_col_to_offset(row, goal),
            EditorMode::Code => self.offset_at_visual_col(row, goal),
        }
    }

    /// Moves by `delta_rows` visual rows (logical lines in code mode),
    /// keeping the column the motion started from. Stops at the first and
    /// last row; returns `false` when already there.
    pub fn move_vertical(&mut self, delta_rows: isize, extend: bool) -> bool {
        let rows = self.visual_row_count();
        let row = self.visual_row_of(self.cursor);
        let target = row
            .saturating_add_signed(delta_rows)
            .min(rows.saturating_sub(1));
        if target == row {
            return false;
        }
        let goal = self.vertical_goal();
        let offset = self.offset_in_row(target, goal);
        self.move_cursor(offset, extend);
        self.desired_col = Some(goal);
        true
    }

    /// Page motion: like [`Document::move_vertical`], but on the first or
    /// last row it jumps to the document start or end.
    pub fn move_page(&mut self, delta_rows: isize, extend: bool) {
        if self.move_vertical(delta_rows, extend) {
            return;
        }
        if delta_rows < 0 {
            self.move_document_start(extend);
        } else if delta_rows > 0 {
            self.move_document_end(extend);
        }
    }

    /// Smart home: jumps to the first non-blank char of the row, or to the
    /// row start when already there.
    pub fn move_home(&mut self, extend: bool) {
        let row = self.visual_row_of(self.cursor);
        let start = self.visual_row_start(row);
        let limit = self.row_cursor_limit(row);
        let mut first = start;
        while first < limit && is_blank(self.char_at(first)) {
            first += 1;
        }
        let target = if self.cursor == first { start } else { first };
        self.move_cursor(target, extend);
    }

    /// End of the visual row (logical line when not wrapping).
    pub fn move_end(&mut self, extend: bool) {
        let row = self.visual_row_of(self.cursor);
        let target = self.row_cursor_limit(row);
        self.move_cursor(target, extend);
    }

    /// Start of the logical line.
    pub fn move_line_start(&mut self, extend: bool) {
        let start = self.line_start(self.line_of(self.cursor));
        self.move_cursor(start, extend);
    }

    /// End of the logical line, before its newline.
    pub fn move_line_end(&mut self, extend: bool) {
        let end = self.line_end(self.line_of(self.cursor));
        self.move_cursor(end, extend);
    }

    pub fn move_document_start(&mut self, extend: bool) {
        self.move_cursor(0, extend);
    }

    pub fn move_document_end(&mut self, extend: bool) {
        self.move_cursor(self.length(), extend);
    }
}
