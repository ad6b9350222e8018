//! Shared constants used across prose crates.

/// Initial gap size (in chars) for a freshly created text buffer.
pub const DEFAULT_GAP_INIT: usize = 4_096;

/// Extra headroom (in chars) added on top of the needed size when the gap grows.
pub const DEFAULT_GAP_GROW: usize = 4_096;

/// Display columns occupied by a tab character in every column computation.
pub const TAB_WIDTH: usize = 4;

/// Wrap column used when a caller asks for wrapping with a zero budget.
pub const FALLBACK_WRAP_COL: usize = 80;

/// Default soft-wrap budget for prose documents.
pub const DEFAULT_WRAP_COL: usize = 80;

/// Largest file (in bytes) accepted by [`crate::text::decode_loaded`].
pub const MAX_LOAD_BYTES: usize = 512 * 1024 * 1024;

/// Entry bound for the spell-check result cache before half of it is evicted.
pub const DEFAULT_SPELL_CACHE_MAX: usize = 8_192;

/// Words at or above this char length are never sent to the spell oracle.
pub const SPELL_MAX_WORD_CHARS: usize = 64;

/// Tracing target for opt-in edit timing events.
pub const PERF_TARGET: &str = "prose_core::perf";
