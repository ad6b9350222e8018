//! Error types for the fallible edges of the editing core.
//!
//! Buffer and index operations never fail: positions are clamped and
//! allocation pressure degrades to a logged no-op. Only loading bytes,
//! resolving workspace handles, and a few malformed commands surface errors.
use crate::workspace::DocumentId;
use thiserror::Error;

/// Top-level error type for the editing core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),

    #[error("Search query must not be empty")]
    EmptyQuery,
}

impl From<std::str::Utf8Error> for EditorError {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: value.valid_up_to(),
        }
    }
}
