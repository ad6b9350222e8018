//! Editor configuration loaded from environment variables.

use crate::constants::{
    DEFAULT_GAP_GROW, DEFAULT_GAP_INIT, DEFAULT_SPELL_CACHE_MAX, DEFAULT_WRAP_COL, MAX_LOAD_BYTES,
};
use crate::text::LineEnding;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Runtime configuration shared by every document a host opens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorConfig {
    /// Initial gap capacity for new buffers.
    pub gap_init: usize,
    /// Headroom added whenever the gap must grow.
    pub gap_grow: usize,
    /// Soft-wrap budget in display columns for prose documents.
    pub wrap_col: usize,
    /// Line ending written by [`crate::Document::to_bytes`].
    pub line_ending: LineEnding,
    /// Largest payload in bytes [`crate::Document::from_bytes`] accepts.
    pub max_load_bytes: usize,
    /// Entry bound for the workspace spell-check cache.
    pub spell_cache_max: usize,
    /// Emit per-edit timing events under [`crate::constants::PERF_TARGET`].
    pub perf_log: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gap_init: DEFAULT_GAP_INIT,
            gap_grow: DEFAULT_GAP_GROW,
            wrap_col: DEFAULT_WRAP_COL,
            line_ending: LineEnding::Lf,
            max_load_bytes: MAX_LOAD_BYTES,
            spell_cache_max: DEFAULT_SPELL_CACHE_MAX,
            perf_log: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a line ending name, case-insensitive.
///
/// # Arguments
/// - `value`: `lf`/`unix` or `crlf`/`windows`, surrounding whitespace ignored.
///
/// # Returns
/// The matching [`LineEnding`], or `None` for anything else.
pub fn parse_line_ending(value: &str) -> Option<LineEnding> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lf" | "unix" => Some(LineEnding::Lf),
        "crlf" | "windows" => Some(LineEnding::CrLf),
        _ => None,
    }
}

/// Reads `name` through `parse`, warning and returning `default` when the
/// variable is set but unusable.
fn env_parsed<T, F>(name: &str, default: T, parse: F) -> T
where
    T: std::fmt::Debug,
    F: FnOnce(&str) -> Option<T>,
{
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match parse(&raw) {
        Some(value) => value,
        None => {
            warn!(
                var = name,
                value = %raw,
                fallback = ?default,
                "ignoring invalid environment value"
            );
            default
        }
    }
}

fn env_number<T: FromStr + std::fmt::Debug>(name: &str, default: T) -> T {
    env_parsed(name, default, |raw| raw.trim().parse().ok())
}

impl EditorConfig {
    /// Load configuration from `PROSE_*` environment variables.
    ///
    /// Missing values take the defaults in [`crate::constants`]; unparsable
    /// ones do too, after a `warn!`. A zero gap size is bumped to one so
    /// buffers can always grow.
    ///
    /// # Returns
    /// A populated [`EditorConfig`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gap_init: env_number("PROSE_GAP_INIT", defaults.gap_init).max(1),
            gap_grow: env_number("PROSE_GAP_GROW", defaults.gap_grow).max(1),
            wrap_col: env_number("PROSE_WRAP_COL", defaults.wrap_col),
            line_ending: env_parsed("PROSE_LINE_ENDING", defaults.line_ending, parse_line_ending),
            max_load_bytes: env_number("PROSE_MAX_LOAD_BYTES", defaults.max_load_bytes),
            spell_cache_max: env_number("PROSE_SPELL_CACHE_MAX", defaults.spell_cache_max),
            perf_log: env_parsed("PROSE_PERF_LOG", defaults.perf_log, parse_env_flag),
        }
    }
}
