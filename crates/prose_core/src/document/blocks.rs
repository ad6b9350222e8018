//! Structural edits: word deletion, auto-indent, block indent and line moves.

use super::{Document, EditorMode, IndexSync};

const INDENT: &str = "    ";
const INDENT_WIDTH: usize = 4;

impl Document {
    /// Deletes back to the start of the previous word (at least one char).
    pub fn delete_word_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.cursor == 0 {
            return false;
        }
        let mut start = self.word_start(self.cursor);
        if start == self.cursor {
            start -= 1;
        }
        self.delete_span(
            start,
            self.cursor - start,
            IndexSync::Incremental,
            "delete_word_backward",
        )
    }

    /// Deletes forward to the end of the current word (at least one char).
    pub fn delete_word_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.cursor >= self.length() {
            return false;
        }
        let mut end = self.word_end(self.cursor);
        if end == self.cursor {
            end += 1;
        }
        self.delete_span(
            self.cursor,
            end - self.cursor,
            IndexSync::Incremental,
            "delete_word_forward",
        )
    }

    /// Enter key. In code mode the new line repeats the leading blanks of the
    /// line being split and gains one indent level after `{`, `:` or `(`.
    pub fn insert_newline(&mut self) -> bool {
        if self.mode != EditorMode::Code {
            return self.insert_text("\n");
        }
        let split_at = self
            .selection_range()
            .map_or(self.cursor, |range| range.start);
        let line_start = self.line_start(self.line_of(split_at));
        let mut text = String::from("\n");
        text.extend(
            self.buffer
                .chars_in(line_start..split_at)
                .take_while(|ch| *ch == ' ' || *ch == '\t'),
        );
        if split_at > line_start && matches!(self.char_at(split_at - 1), '{' | ':' | '(') {
            text.push_str(INDENT);
        }
        self.insert_text(&text)
    }

    /// Tab key without a block selection: spaces in code mode, a tab in prose.
    pub fn insert_tab(&mut self) -> bool {
        match self.mode {
            EditorMode::Code => self.insert_text(INDENT),
            EditorMode::Prose => self.insert_char('\t'),
        }
    }

    /// Lines touched by the selection, or the cursor line without one. A
    /// selection ending at column 0 leaves that line out.
    fn block_lines(&self) -> (usize, usize) {
        match self.selection_range() {
            Some(range) => {
                let first = self.line_of(range.start);
                let mut last = self.line_of(range.end);
                if last > first && range.end == self.line_start(last) {
                    last -= 1;
                }
                (first, last)
            }
            None => {
                let line = self.line_of(self.cursor);
                (line, line)
            }
        }
    }

    /// Prefixes every block line with one indent level as a single undo step.
    ///
    /// With a selection the whole block ends up selected; without one only
    /// the cursor line is indented. Code mode only.
    pub fn indent_selection(&mut self) -> bool {
        if self.mode != EditorMode::Code {
            return false;
        }
        let started = self.perf_start();
        let had_selection = self.has_selection();
        let (first, last) = self.block_lines();
        let starts: Vec<usize> = (first..=last).map(|line| self.line_start(line)).collect();
        let cursor_after = self.cursor + INDENT_WIDTH * starts.len();
        let group = self.history.next_group();
        for (idx, start) in starts.iter().enumerate() {
            let pos = start + idx * INDENT_WIDTH;
            self.splice(pos, 0, INDENT, group, cursor_after, IndexSync::Incremental);
        }
        if had_selection {
            self.anchor = Some(self.line_start(first));
            self.cursor = self.line_end(last);
        } else {
            self.cursor = cursor_after;
            self.anchor = None;
        }
        self.finish_edit("indent", started);
        true
    }

    /// Removes up to one indent level (four spaces or one tab) from every
    /// block line as a single undo step. Code mode only.
    pub fn dedent_selection(&mut self) -> bool {
        if self.mode != EditorMode::Code {
            return false;
        }
        let had_selection = self.has_selection();
        let (first, last) = self.block_lines();
        let cuts: Vec<(usize, usize)> = (first..=last)
            .map(|line| {
                let start = self.line_start(line);
                (start, self.leading_indent_len(start, self.line_end(line)))
            })
            .filter(|(_, len)| *len > 0)
            .collect();
        if cuts.is_empty() {
            return false;
        }
        let started = self.perf_start();
        let cursor_line_start = self.line_start(self.line_of(self.cursor));
        let cursor_after = match cuts.iter().find(|(start, _)| *start == cursor_line_start) {
            Some((start, len)) => self.cursor.saturating_sub(*len).max(*start),
            None => self.cursor,
        };
        let group = self.history.next_group();
        let mut removed = 0usize;
        for (start, len) in cuts {
            self.splice(start - removed, len, "", group, cursor_after, IndexSync::Incremental);
            removed += len;
        }
        if had_selection {
            self.anchor = Some(self.line_start(first));
            self.cursor = self.line_end(last);
        } else {
            self.cursor = cursor_after;
            self.anchor = None;
        }
        self.finish_edit("dedent", started);
        true
    }

    fn leading_indent_len(&self, start: usize, end: usize) -> usize {
        if start < end && self.char_at(start) == '\t' {
            return 1;
        }
        self.buffer
            .chars_in(start..end)
            .take(INDENT_WIDTH)
            .take_while(|ch| *ch == ' ')
            .count()
    }

    /// Swaps the cursor line with the one above. Code mode only.
    pub fn move_line_up(&mut self) -> bool {
        if self.mode != EditorMode::Code {
            return false;
        }
        let line = self.line_of(self.cursor);
        if line == 0 {
            return false;
        }
        let prev_start = self.line_start(line - 1);
        let start = self.line_start(line);
        let end = self.line_end(line);
        let col = self.cursor - start;
        let prev_text = self.extract_text(prev_start, start - 1 - prev_start);
        let text = self.extract_text(start, end - start);
        self.swap_lines(prev_start, end, format!("{text}\n{prev_text}"), prev_start + col)
    }

    /// Swaps the cursor line with the one below. Code mode only.
    pub fn move_line_down(&mut self) -> bool {
        if self.mode != EditorMode::Code {
            return false;
        }
        let line = self.line_of(self.cursor);
        if line + 1 >= self.line_count() {
            return false;
        }
        let start = self.line_start(line);
        let next_start = self.line_start(line + 1);
        let next_end = self.line_end(line + 1);
        let col = self.cursor - start;
        let text = self.extract_text(start, next_start - 1 - start);
        let next_text = self.extract_text(next_start, next_end - next_start);
        let cursor_after = start + next_text.chars().count() + 1 + col;
        self.swap_lines(start, next_end, format!("{next_text}\n{text}"), cursor_after)
    }

    fn swap_lines(&mut self, start: usize, end: usize, replacement: String, cursor: usize) -> bool {
        let started = self.perf_start();
        let group = self.history.next_group();
        self.splice(start, end - start, &replacement, group, cursor, IndexSync::Rebuild);
        self.cursor = cursor.min(self.length());
        self.anchor = None;
        self.finish_edit("move_line", started);
        true
    }
}
