//! Normalized editing commands and the reducer that applies them.

use crate::document::{Document, EditorMode};
use crate::error::EditorError;
use crate::search;

/// One host input, already mapped from keys, menus or clipboard events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    InsertText(String),
    InsertNewline,
    InsertTab,
    Backspace { word: bool },
    DeleteForward { word: bool },
    MoveLeft { select: bool, word: bool },
    MoveRight { select: bool, word: bool },
    MoveUp { select: bool },
    MoveDown { select: bool },
    PageUp { select: bool, rows: usize },
    PageDown { select: bool, rows: usize },
    MoveHome { select: bool },
    MoveEnd { select: bool },
    DocumentStart { select: bool },
    DocumentEnd { select: bool },
    MoveTo { offset: usize, select: bool },
    SelectAll,
    SelectWordAt(usize),
    ClearSelection,
    Copy,
    Cut,
    Paste(String),
    Undo,
    Redo,
    Indent,
    Dedent,
    MoveLineUp,
    MoveLineDown,
    FindNext(String),
    FindPrev(String),
    ReplaceNext { query: String, replacement: String },
    ReplaceAll { query: String, replacement: String },
    SetMode(EditorMode),
    SetWrapCol(usize),
    MarkSaved,
}

impl Command {
    /// Returns whether the command can change document content.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertText(_)
                | Self::InsertNewline
                | Self::InsertTab
                | Self::Backspace { .. }
                | Self::DeleteForward { .. }
                | Self::Cut
                | Self::Paste(_)
                | Self::Undo
                | Self::Redo
                | Self::Indent
                | Self::Dedent
                | Self::MoveLineUp
                | Self::MoveLineDown
                | Self::ReplaceNext { .. }
                | Self::ReplaceAll { .. }
        )
    }
}

/// What applying a command did, for the host to act on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Content changed.
    pub changed: bool,
    /// Text the host should place on the clipboard.
    pub copied: Option<String>,
    /// A search command found and selected a match.
    pub found: bool,
    /// Number of replacements performed.
    pub replaced: usize,
}

fn require_query(query: &str) -> Result<(), EditorError> {
    if query.is_empty() {
        Err(EditorError::EmptyQuery)
    } else {
        Ok(())
    }
}

/// Applies one command to `doc`.
///
/// # Errors
/// Returns [`EditorError::EmptyQuery`] for search or replace commands with
/// an empty query; the document is untouched in that case.
pub fn apply(doc: &mut Document, command: Command) -> Result<ApplyOutcome, EditorError> {
    let mut outcome = ApplyOutcome::default();
    match command {
        Command::InsertText(text) => outcome.changed = doc.insert_text(&text),
        Command::InsertNewline => outcome.changed = doc.insert_newline(),
        Command::InsertTab => {
            outcome.changed = if doc.mode() == EditorMode::Code && doc.has_selection() {
                doc.indent_selection()
            } else {
                doc.insert_tab()
            };
        }
        Command::Backspace { word } => {
            outcome.changed = if word {
                doc.delete_word_backward()
            } else {
                doc.backspace()
            };
        }
        Command::DeleteForward { word } => {
            outcome.changed = if word {
                doc.delete_word_forward()
            } else {
                doc.delete_forward()
            };
        }
        Command::MoveLeft { select, word } => doc.move_left(select, word),
        Command::MoveRight { select, word } => doc.move_right(select, word),
        Command::MoveUp { select } => {
            doc.move_vertical(-1, select);
        }
        Command::MoveDown { select } => {
            doc.move_vertical(1, select);
        }
        Command::PageUp { select, rows } => {
            let rows = isize::try_from(rows.max(1)).unwrap_or(isize::MAX);
            doc.move_page(-rows, select);
        }
        Command::PageDown { select, rows } => {
            let rows = isize::try_from(rows.max(1)).unwrap_or(isize::MAX);
            doc.move_page(rows, select);
        }
        Command::MoveHome { select } => doc.move_home(select),
        Command::MoveEnd { select } => doc.move_end(select),
        Command::DocumentStart { select } => doc.move_document_start(select),
        Command::DocumentEnd { select } => doc.move_document_end(select),
        Command::MoveTo { offset, select } => doc.move_cursor(offset, select),
        Command::SelectAll => doc.select_all(),
        Command::SelectWordAt(offset) => {
            doc.select_word_at(offset);
        }
        Command::ClearSelection => doc.clear_selection(),
        Command::Copy => outcome.copied = doc.selected_text(),
        Command::Cut => {
            outcome.copied = doc.cut();
            outcome.changed = outcome.copied.is_some();
        }
        Command::Paste(text) => outcome.changed = doc.paste(&text),
        Command::Undo => outcome.changed = doc.undo(),
        Command::Redo => outcome.changed = doc.redo(),
        Command::Indent => outcome.changed = doc.indent_selection(),
        Command::Dedent => outcome.changed = doc.dedent_selection(),
        Command::MoveLineUp => outcome.changed = doc.move_line_up(),
        Command::MoveLineDown => outcome.changed = doc.move_line_down(),
        Command::FindNext(query) => {
            require_query(&query)?;
            outcome.found = doc.select_next_match(&query);
        }
        Command::FindPrev(query) => {
            require_query(&query)?;
            outcome.found = doc.select_prev_match(&query);
        }
        Command::ReplaceNext { query, replacement } => {
            require_query(&query)?;
            let on_match = doc
                .selected_text()
                .is_some_and(|text| search::same_folded(&text, &query));
            if on_match || doc.select_next_match(&query) {
                if let Some(range) = doc.selection_range() {
                    outcome.changed = doc.replace_at(range.start, range.len(), &replacement);
                    outcome.replaced = usize::from(outcome.changed);
                }
                outcome.found = doc.select_next_match(&query);
            }
        }
        Command::ReplaceAll { query, replacement } => {
            require_query(&query)?;
            outcome.replaced = doc.replace_all(&query, &replacement);
            outcome.changed = outcome.replaced > 0;
        }
        Command::SetMode(mode) => doc.set_mode(mode),
        Command::SetWrapCol(cols) => doc.set_wrap_col(cols),
        Command::MarkSaved => doc.mark_saved(),
    }
    Ok(outcome)
}

/// Applies commands in order, merging their outcomes.
///
/// # Errors
/// Stops at the first failing command; earlier commands stay applied.
pub fn apply_all(
    doc: &mut Document,
    commands: impl IntoIterator<Item = Command>,
) -> Result<ApplyOutcome, EditorError> {
    let mut merged = ApplyOutcome::default();
    for command in commands {
        let outcome = apply(doc, command)?;
        merged.changed |= outcome.changed;
        merged.found |= outcome.found;
        merged.replaced += outcome.replaced;
        if outcome.copied.is_some() {
            merged.copied = outcome.copied;
        }
    }
    Ok(merged)
}
