//! Load/save normalization at the byte boundary.
//!
//! In memory a document is UTF-8 text with `\n` line endings only. Loading
//! strips a byte-order mark and carriage returns; saving can expand line
//! feeds back to CRLF.

use crate::constants::MAX_LOAD_BYTES;
use crate::error::EditorError;
use serde::Deserialize;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Line ending written on save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Guesses the dominant line ending of raw file bytes.
///
/// Returns [`LineEnding::CrLf`] only when every line feed is preceded by a
/// carriage return.
pub fn detect_line_ending(bytes: &[u8]) -> LineEnding {
    let mut saw_lf = false;
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            saw_lf = true;
            if idx == 0 || bytes[idx - 1] != b'\r' {
                return LineEnding::Lf;
            }
        }
    }
    if saw_lf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

/// Decodes loaded bytes into editor text.
///
/// # Errors
/// Returns [`EditorError::TooLarge`] above [`MAX_LOAD_BYTES`] and
/// [`EditorError::InvalidUtf8`] when the payload is not UTF-8.
pub fn decode_loaded(bytes: &[u8]) -> Result<String, EditorError> {
    decode_loaded_with_limit(bytes, MAX_LOAD_BYTES)
}

/// [`decode_loaded`] with a caller-chosen size limit in bytes.
///
/// # Errors
/// Returns [`EditorError::TooLarge`] above `limit` and
/// [`EditorError::InvalidUtf8`] when the payload is not UTF-8.
pub fn decode_loaded_with_limit(bytes: &[u8], limit: usize) -> Result<String, EditorError> {
    if bytes.len() > limit {
        return Err(EditorError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(body)?;
    if text.contains('\r') {
        Ok(text.chars().filter(|ch| *ch != '\r').collect())
    } else {
        Ok(text.to_owned())
    }
}

/// Encodes editor text for persistence with the requested line ending.
pub fn encode_for_save(text: &str, ending: LineEnding) -> Vec<u8> {
    match ending {
        LineEnding::Lf => text.as_bytes().to_vec(),
        LineEnding::CrLf => text.replace('\n', "\r\n").into_bytes(),
    }
}
