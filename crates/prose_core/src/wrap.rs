//! Soft-wrap index mapping logical lines to visual rows.

use crate::buffer::TextBuffer;
use crate::constants::{FALLBACK_WRAP_COL, TAB_WIDTH};
use crate::line_index::LineIndex;

/// Start of one visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapEntry {
    pub offset: usize,
    pub line: usize,
}

/// Display width of a single char in wrap and column math.
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        1
    }
}

fn is_break_char(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn normalize_wrap_col(wrap_col: usize) -> usize {
    if wrap_col == 0 {
        FALLBACK_WRAP_COL
    } else {
        wrap_col
    }
}

/// Visual row starts for the whole document at a given wrap column.
///
/// Never patched incrementally: any buffer edit marks it dirty and the next
/// geometry query rebuilds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapIndex {
    entries: Vec<WrapEntry>,
    wrap_col: usize,
    dirty: bool,
}

impl Default for WrapIndex {
    fn default() -> Self {
        Self {
            entries: vec![WrapEntry { offset: 0, line: 0 }],
            wrap_col: 0,
            dirty: true,
        }
    }
}

impl WrapIndex {
    /// Returns whether an edit happened since the last rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Invalidates the rows; called after every content edit.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Column budget the entries were built for.
    pub fn wrap_col(&self) -> usize {
        self.wrap_col
    }

    /// Returns whether the entries are unusable for `wrap_col`.
    pub fn needs_rebuild(&self, wrap_col: usize) -> bool {
        self.dirty || self.wrap_col != normalize_wrap_col(wrap_col)
    }

    /// Row starts in document order.
    ///
    /// # Returns
    /// At least one entry; every logical line owns one or more consecutive
    /// entries, the first at the line's start offset.
    pub fn entries(&self) -> &[WrapEntry] {
        &self.entries
    }

    /// Greedily packs every logical line into rows of `wrap_col` columns.
    ///
    /// A row that would overflow breaks after its last space or tab, including
    /// one sitting exactly on the overflowing column; a row without
    /// whitespace breaks at the column boundary. `lines` must be fresh for
    /// `buffer`.
    ///
    /// # Arguments
    /// - `buffer`: Text to wrap.
    /// - `lines`: Logical line index for `buffer`.
    /// - `wrap_col`: Column budget; `0` selects [`FALLBACK_WRAP_COL`].
    pub fn rebuild(&mut self, buffer: &TextBuffer, lines: &LineIndex, wrap_col: usize) {
        let wrap_col = normalize_wrap_col(wrap_col);
        self.entries.clear();
        self.entries.reserve(lines.line_count());

        let mut chars = buffer.chars();
        let mut widths: Vec<usize> = Vec::new();
        for line in 0..lines.line_count() {
            let start = lines.line_start(line);
            let end = lines.line_end(line, buffer);
            self.entries.push(WrapEntry {
                offset: start,
                line,
            });

            widths.clear();
            let mut row_start = start;
            let mut col = 0usize;
            let mut last_break: Option<usize> = None;
            for offset in start..end {
                let Some(ch) = chars.next() else {
                    break;
                };
                let width = char_width(ch);
                widths.push(width);
                col += width;
                if is_break_char(ch) {
                    last_break = Some(offset + 1);
                }
                if col <= wrap_col {
                    continue;
                }
                // Whitespace that overflows still ends the row it belongs to.
                let next_start = match last_break {
                    Some(brk) if brk > row_start => brk,
                    _ if offset > row_start => offset,
                    _ => continue,
                };
                widths.drain(..next_start - row_start);
                row_start = next_start;
                last_break = None;
                self.entries.push(WrapEntry {
                    offset: row_start,
                    line,
                });
                col = widths.iter().sum();
            }
            if line + 1 < lines.line_count() {
                // Newline owned by this line.
                chars.next();
            }
        }

        self.wrap_col = wrap_col;
        self.dirty = false;
    }

    /// Number of visual rows; never zero.
    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    /// Start offset of `vline`, clamped to the last row.
    pub fn row_start(&self, vline: usize) -> usize {
        self.entries[vline.min(self.entries.len() - 1)].offset
    }

    /// Logical line a visual row belongs to.
    pub fn logical_line_of_row(&self, vline: usize) -> usize {
        self.entries[vline.min(self.entries.len() - 1)].line
    }

    /// Visual row containing `offset`.
    pub fn visual_line_of(&self, offset: usize) -> usize {
        self.entries
            .partition_point(|entry| entry.offset <= offset)
            .saturating_sub(1)
    }

    /// End offset of `vline`: the next row's start when it continues the same
    /// logical line, otherwise the logical line's end.
    pub fn visual_line_end(&self, vline: usize, lines: &LineIndex, buffer: &TextBuffer) -> usize {
        let vline = vline.min(self.entries.len() - 1);
        let entry = self.entries[vline];
        match self.entries.get(vline + 1) {
            Some(next) if next.line == entry.line => next.offset,
            _ => lines.line_end(entry.line, buffer),
        }
    }

    /// Char column of `offset` within `vline`.
    pub fn col_in_vline(&self, offset: usize, vline: usize) -> usize {
        offset.saturating_sub(self.row_start(vline))
    }
}
