//! Editing core for prose and code documents: gap-buffer storage, logical
//! and soft-wrapped line indices, grouped undo/redo, and the document model
//! that keeps them consistent.

pub mod brackets;
pub mod buffer;
pub mod command;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod history;
pub mod line_index;
pub mod search;
pub mod spell;
pub mod stats;
pub mod text;
pub mod workspace;
pub mod wrap;

#[cfg(test)]
mod test_support;

pub use brackets::{find_matching_bracket, LineCarry, PlainTokenizer, TokenKind, Tokenizer};
pub use buffer::TextBuffer;
pub use command::{apply, apply_all, ApplyOutcome, Command};
pub use config::EditorConfig;
pub use document::{Document, EditorMode};
pub use error::EditorError;
pub use history::{CursorState, EditHistory, EditKind, UndoEntry};
pub use line_index::LineIndex;
pub use spell::{misspelled_ranges, SpellCache, SpellOracle};
pub use stats::{SessionDelta, TextStats};
pub use text::{decode_loaded, decode_loaded_with_limit, encode_for_save, LineEnding};
pub use workspace::{DocumentId, Workspace};
pub use wrap::{WrapEntry, WrapIndex};
