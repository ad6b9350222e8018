//! Document model: a text buffer plus the indices, history and cursor state
//! that must stay consistent with it after every public operation.

mod blocks;
mod motion;
mod replace;

#[cfg(test)]
mod tests;

pub use motion::is_word_char;

use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::constants::PERF_TARGET;
use crate::error::EditorError;
use crate::history::{CursorState, EditHistory, UndoEntry};
use crate::line_index::LineIndex;
use crate::stats::{SessionDelta, TextStats};
use crate::text::{self, LineEnding};
use crate::wrap::WrapIndex;
use serde::Deserialize;
use std::ops::Range;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Editing personality of a document.
///
/// Prose soft-wraps at the wrap column; code never wraps and enables the
/// structural edits (auto-indent, block indent, line moves).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Prose,
    Code,
}

const CODE_EXTENSIONS: &[&str] = &[
    "c", "h", "cpp", "hpp", "py", "js", "ts", "rs", "java", "cs", "go", "rb", "sh", "json", "xml",
    "html", "css", "sql", "yaml", "toml",
];

impl EditorMode {
    /// Picks a mode from a file extension (case-insensitive).
    pub fn for_path(path: &Path) -> Self {
        let is_code = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                CODE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);
        if is_code {
            Self::Code
        } else {
            Self::Prose
        }
    }
}

/// How the line index follows a buffer edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IndexSync {
    /// Try the cheap update and fall back to a rescan.
    Incremental,
    /// Always rescan.
    Rebuild,
    /// Leave the index stale; the caller rescans once after a batch.
    Deferred,
}

/// One open text document.
#[derive(Debug)]
pub struct Document {
    buffer: TextBuffer,
    lines: LineIndex,
    wrap: WrapIndex,
    history: EditHistory,
    cursor: usize,
    anchor: Option<usize>,
    desired_col: Option<usize>,
    mode: EditorMode,
    wrap_col: usize,
    stats: TextStats,
    stats_dirty: bool,
    baseline: TextStats,
    line_ending: LineEnding,
    perf_log: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty prose document with default configuration.
    pub fn new() -> Self {
        Self::with_config("", &EditorConfig::default())
    }

    /// Creates a prose document holding `text` with default configuration.
    pub fn from_text(text: &str) -> Self {
        Self::with_config(text, &EditorConfig::default())
    }

    /// Creates a document holding `text`, sized and tuned by `config`.
    ///
    /// `text` is taken as-is; use [`Document::from_bytes`] for raw file
    /// contents that may carry a BOM or carriage returns.
    pub fn with_config(text: &str, config: &EditorConfig) -> Self {
        let buffer = TextBuffer::from_text_with(text, config.gap_init, config.gap_grow);
        let lines = LineIndex::build(&buffer);
        let stats = TextStats::measure(buffer.chars());
        Self {
            buffer,
            lines,
            wrap: WrapIndex::default(),
            history: EditHistory::new(),
            cursor: 0,
            anchor: None,
            desired_col: None,
            mode: EditorMode::Prose,
            wrap_col: config.wrap_col,
            stats,
            stats_dirty: false,
            baseline: stats,
            line_ending: config.line_ending,
            perf_log: config.perf_log,
        }
    }

    /// Decodes loaded file bytes into a document.
    ///
    /// A file whose every line feed is CRLF keeps that convention on save;
    /// otherwise `config.line_ending` applies.
    ///
    /// # Errors
    /// Propagates [`text::decode_loaded_with_limit`] failures, including
    /// payloads above `config.max_load_bytes`.
    pub fn from_bytes(bytes: &[u8], config: &EditorConfig) -> Result<Self, EditorError> {
        let decoded = text::decode_loaded_with_limit(bytes, config.max_load_bytes)?;
        let mut doc = Self::with_config(&decoded, config);
        if text::detect_line_ending(bytes) == LineEnding::CrLf {
            doc.line_ending = LineEnding::CrLf;
        }
        Ok(doc)
    }

    /// Encodes the content for persistence using the document line ending.
    pub fn to_bytes(&self) -> Vec<u8> {
        text::encode_for_save(&self.text(), self.line_ending)
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, ending: LineEnding) {
        self.line_ending = ending;
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches between prose and code behavior.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            self.mode = mode;
            self.wrap.mark_dirty();
            self.desired_col = None;
        }
    }

    pub fn wrap_col(&self) -> usize {
        self.wrap_col
    }

    /// Changes the soft-wrap budget; rows are recomputed on the next query.
    pub fn set_wrap_col(&mut self, cols: usize) {
        self.wrap_col = cols;
    }

    /// Returns whether visual rows differ from logical lines.
    pub fn wraps(&self) -> bool {
        self.mode == EditorMode::Prose
    }

    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn char_at(&self, pos: usize) -> char {
        self.buffer.char_at(pos)
    }

    /// Copies `len` chars from `start`, clamped to the document.
    pub fn extract_text(&self, start: usize, len: usize) -> String {
        self.buffer.copy_range(start, len)
    }

    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    /// Buffer mutation counter for caller-side caches.
    pub fn mutation(&self) -> u64 {
        self.buffer.mutation()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn desired_col(&self) -> Option<usize> {
        self.desired_col
    }

    pub fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|anchor| anchor != self.cursor)
    }

    /// Returns the selected range, or `None` when nothing is selected.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some(anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        Some(self.extract_text(range.start, range.len()))
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.length();
        self.desired_col = None;
    }

    /// Selects `[anchor, cursor)` in either direction, clamped.
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        let len = self.length();
        self.anchor = Some(anchor.min(len));
        self.cursor = cursor.min(len);
        self.desired_col = None;
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Moves the cursor to `pos` (clamped).
    ///
    /// Extending keeps an existing anchor or drops one at the old cursor;
    /// otherwise the selection is cleared.
    ///
    /// # Arguments
    /// - `pos`: Target char offset; values past the end land on the end.
    /// - `extend`: Grow or shrink the selection instead of collapsing it.
    pub fn move_cursor(&mut self, pos: usize, extend: bool) {
        let pos = pos.min(self.length());
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = pos;
        self.desired_col = None;
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.lines.line_start(line)
    }

    pub fn line_end(&self, line: usize) -> usize {
        self.lines.line_end(line, &self.buffer)
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_of(offset.min(self.length()))
    }

    /// Logical `(line, column)` of `offset`; columns count chars.
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.length());
        let line = self.lines.line_of(offset);
        (line, offset - self.lines.line_start(line))
    }

    /// Offset of `(line, col)`, clamped to the line's content.
    pub fn line_col_to_offset(&self, line: usize, col: usize) -> usize {
        let start = self.line_start(line);
        let end = self.line_end(line);
        start.saturating_add(col).min(end)
    }

    /// Rebuilds the wrap index if the content or wrap column changed.
    pub fn ensure_layout(&mut self) {
        if self.lines.is_dirty() {
            self.lines.rebuild(&self.buffer);
        }
        if !self.wraps() || !self.wrap.needs_rebuild(self.wrap_col) {
            return;
        }
        let started = Instant::now();
        self.wrap.rebuild(&self.buffer, &self.lines, self.wrap_col);
        debug!(
            rows = self.wrap.row_count(),
            wrap_col = self.wrap.wrap_col(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "wrap index rebuilt"
        );
    }

    pub fn visual_row_count(&mut self) -> usize {
        self.ensure_layout();
        if self.wraps() {
            self.wrap.row_count()
        } else {
            self.lines.line_count()
        }
    }

    pub fn visual_row_of(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.length());
        self.ensure_layout();
        if self.wraps() {
            self.wrap.visual_line_of(offset)
        } else {
            self.lines.line_of(offset)
        }
    }

    pub fn visual_row_start(&mut self, row: usize) -> usize {
        self.ensure_layout();
        if self.wraps() {
            self.wrap.row_start(row)
        } else {
            self.lines.line_start(row)
        }
    }

    pub fn visual_row_end(&mut self, row: usize) -> usize {
        self.ensure_layout();
        if self.wraps() {
            self.wrap.visual_line_end(row, &self.lines, &self.buffer)
        } else {
            self.lines.line_end(row, &self.buffer)
        }
    }

    /// Returns whether `row` is followed by a soft-wrapped continuation.
    fn row_continues(&mut self, row: usize) -> bool {
        self.ensure_layout();
        self.wraps()
            && row + 1 < self.wrap.row_count()
            && self.wrap.logical_line_of_row(row + 1) == self.wrap.logical_line_of_row(row)
    }

    /// Last offset the cursor may occupy on `row`.
    ///
    /// A soft-wrapped row ends where the next one starts; parking the cursor
    /// there would place it on the next row, so it stops one char earlier.
    pub(crate) fn row_cursor_limit(&mut self, row: usize) -> usize {
        let start = self.visual_row_start(row);
        let end = self.visual_row_end(row);
        if self.row_continues(row) && end > start {
            end - 1
        } else {
            end
        }
    }

    /// Visual `(row, column)` of `offset`; columns count chars.
    ///
    /// Rebuilds the wrap index first when an edit or wrap change left it
    /// stale. Without wrapping, rows are logical lines.
    pub fn offset_to_visual_row_col(&mut self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.length());
        let row = self.visual_row_of(offset);
        (row, offset - self.visual_row_start(row))
    }

    /// Offset at `(row, col)`, clamped to the row.
    pub fn visual_row_col_to_offset(&mut self, row: usize, col: usize) -> usize {
        let row = row.min(self.visual_row_count().saturating_sub(1));
        let start = self.visual_row_start(row);
        start.saturating_add(col).min(self.row_cursor_limit(row))
    }

    /// Inserts `text` at the cursor, replacing the selection if any.
    ///
    /// A replaced selection and its replacement form one undo group. The line
    /// index is patched in place for each half and rescanned only when
    /// [`LineIndex::notify_delete`] or [`LineIndex::notify_insert`] refuses.
    ///
    /// # Returns
    /// `true` when the content changed.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let started = self.perf_start();
        if let Some(range) = self.selection_range() {
            let group = self.history.next_group();
            let inserted = self.splice(
                range.start,
                range.len(),
                text,
                group,
                range.start + text.chars().count(),
                IndexSync::Incremental,
            );
            self.cursor = range.start + inserted;
            self.anchor = None;
            self.finish_edit("replace_selection", started);
            return true;
        }
        if text.is_empty() {
            return false;
        }
        let pos = self.cursor;
        let inserted = self.buffer.insert(pos, text);
        if inserted == 0 {
            return false;
        }
        self.sync_lines_after_insert(pos, text, IndexSync::Incremental);
        self.history
            .push(UndoEntry::insert(pos, text, self.cursor).with_anchor(self.anchor));
        self.cursor = pos + inserted;
        self.anchor = None;
        self.finish_edit("insert", started);
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut encoded = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut encoded))
    }

    /// Deletes the selection as one undo entry.
    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range() else {
            return false;
        };
        self.delete_span(
            range.start,
            range.len(),
            IndexSync::Incremental,
            "delete_selection",
        )
    }

    /// Deletes the selection, or the char before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.cursor == 0 {
            return false;
        }
        self.delete_span(self.cursor - 1, 1, IndexSync::Incremental, "backspace")
    }

    /// Deletes the selection, or the char after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        if self.cursor >= self.length() {
            return false;
        }
        self.delete_span(self.cursor, 1, IndexSync::Incremental, "delete_forward")
    }

    /// Removes and returns the selected text.
    pub fn cut(&mut self) -> Option<String> {
        let selected = self.selected_text()?;
        self.delete_selection();
        Some(selected)
    }

    /// Inserts clipboard text with carriage returns stripped.
    pub fn paste(&mut self, text: &str) -> bool {
        if text.contains('\r') {
            let cleaned: String = text.chars().filter(|ch| *ch != '\r').collect();
            self.insert_text(&cleaned)
        } else {
            self.insert_text(text)
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reverts the newest edit or edit group.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.buffer) {
            Some(state) => {
                self.restore_after_history(state);
                true
            }
            None => false,
        }
    }

    /// Reapplies the next undone edit or edit group.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.buffer) {
            Some(state) => {
                self.restore_after_history(state);
                true
            }
            None => false,
        }
    }

    fn restore_after_history(&mut self, state: CursorState) {
        self.lines.rebuild(&self.buffer);
        let len = self.length();
        self.cursor = state.cursor.min(len);
        self.anchor = state.anchor.map(|anchor| anchor.min(len));
        self.wrap.mark_dirty();
        self.stats_dirty = true;
        self.desired_col = None;
    }

    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    /// Current counts, recomputed only after an edit.
    pub fn stats(&mut self) -> TextStats {
        if self.stats_dirty {
            self.stats = TextStats::measure(self.buffer.chars());
            self.stats_dirty = false;
        }
        self.stats
    }

    /// Change in counts since the document was loaded or the baseline reset.
    pub fn session_delta(&mut self) -> SessionDelta {
        let baseline = self.baseline;
        self.stats().delta_since(&baseline)
    }

    pub fn reset_session_baseline(&mut self) {
        self.baseline = self.stats();
    }

    fn perf_start(&self) -> Option<Instant> {
        self.perf_log.then(Instant::now)
    }

    /// Bookkeeping shared by every content edit.
    fn finish_edit(&mut self, op: &'static str, started: Option<Instant>) {
        self.wrap.mark_dirty();
        self.stats_dirty = true;
        self.desired_col = None;
        if let Some(started) = started {
            info!(
                target: PERF_TARGET,
                op,
                len = self.buffer.len(),
                lines = self.lines.line_count(),
                line_rescans = self.lines.rescans(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "edit applied"
            );
        }
    }

    fn sync_lines_after_insert(&mut self, pos: usize, text: &str, sync: IndexSync) {
        if sync == IndexSync::Incremental && self.lines.notify_insert(pos, text) {
            return;
        }
        debug!(pos, "line index rebuilt after insert");
        self.lines.rebuild(&self.buffer);
    }

    fn sync_lines_after_delete(&mut self, pos: usize, removed: &str, sync: IndexSync) {
        if sync == IndexSync::Incremental && self.lines.notify_delete(pos, removed) {
            return;
        }
        debug!(pos, "line index rebuilt after delete");
        self.lines.rebuild(&self.buffer);
    }

    /// Deletes `[start, start + len)` as one undo entry and parks the cursor
    /// at `start`.
    fn delete_span(&mut self, start: usize, len: usize, sync: IndexSync, op: &'static str) -> bool {
        let started = self.perf_start();
        let removed = self.buffer.copy_range(start, len);
        if self.buffer.delete(start, len) == 0 {
            return false;
        }
        self.sync_lines_after_delete(start, &removed, sync);
        self.history
            .push(UndoEntry::delete(start, removed, self.cursor).with_anchor(self.anchor));
        self.cursor = start;
        self.anchor = None;
        self.finish_edit(op, started);
        true
    }

    /// Replaces `[start, start + len)` with `text` under `group` without
    /// touching the cursor or selection. Returns chars inserted.
    ///
    /// With [`IndexSync::Incremental`] the line index is patched after each
    /// half, falling back to a rebuild per half; [`IndexSync::Rebuild`]
    /// rebuilds once at the end and [`IndexSync::Deferred`] leaves that to
    /// the caller. Entries record the current cursor and
    /// anchor as their "before" state; `cursor_after` is what a redo of this
    /// splice restores.
    fn splice(
        &mut self,
        start: usize,
        len: usize,
        text: &str,
        group: u32,
        cursor_after: usize,
        sync: IndexSync,
    ) -> usize {
        let removed = self.buffer.copy_range(start, len);
        if !removed.is_empty() && self.buffer.delete(start, len) > 0 {
            if sync == IndexSync::Incremental {
                self.sync_lines_after_delete(start, &removed, sync);
            }
            let mut entry = UndoEntry::delete(start, removed, self.cursor)
                .with_anchor(self.anchor)
                .in_group(group);
            if text.is_empty() {
                entry.cursor_after = cursor_after;
            }
            self.history.push(entry);
        }
        let inserted = self.buffer.insert(start, text);
        if inserted > 0 {
            if sync == IndexSync::Incremental {
                self.sync_lines_after_insert(start, text, sync);
            }
            let mut entry = UndoEntry::insert(start, text, self.cursor)
                .with_anchor(self.anchor)
                .in_group(group);
            entry.cursor_after = cursor_after;
            self.history.push(entry);
        }
        if sync == IndexSync::Rebuild {
            self.lines.rebuild(&self.buffer);
        }
        inserted
    }
}
