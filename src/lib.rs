//! Root crate facade for the prose editing core.

pub use prose_core::{
    apply, apply_all, brackets, buffer, command, config, constants, decode_loaded,
    decode_loaded_with_limit, document, encode_for_save, error, find_matching_bracket, history, line_index, misspelled_ranges,
    search, spell, stats, text, workspace, wrap, ApplyOutcome, Command, CursorState, Document,
    DocumentId, EditHistory, EditKind, EditorConfig, EditorError, EditorMode, LineCarry,
    LineEnding, LineIndex, PlainTokenizer, SessionDelta, SpellCache, SpellOracle, TextBuffer,
    TextStats, TokenKind, Tokenizer, UndoEntry, Workspace, WrapEntry, WrapIndex,
};
