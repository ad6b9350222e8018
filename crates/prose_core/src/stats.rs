//! Character, word and line counts for a document.

use serde::Serialize;

/// Snapshot of document counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

/// Signed change in counts since a baseline snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionDelta {
    pub chars: isize,
    pub words: isize,
    pub lines: isize,
}

/// Returns whether `ch` continues a counted word.
///
/// Apostrophes and hyphens keep contractions and compounds as one word.
pub fn is_stats_word_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '\'' || ch == '-'
}

impl TextStats {
    /// Counts `chars`, treating every maximal run of word chars as one word.
    pub fn measure(chars: impl Iterator<Item = char>) -> Self {
        let mut stats = Self {
            chars: 0,
            words: 0,
            lines: 1,
        };
        let mut in_word = false;
        for ch in chars {
            stats.chars += 1;
            if ch == '\n' {
                stats.lines += 1;
            }
            if is_stats_word_char(ch) {
                if !in_word {
                    stats.words += 1;
                    in_word = true;
                }
            } else {
                in_word = false;
            }
        }
        stats
    }

    /// Change from `baseline` to `self`.
    pub fn delta_since(&self, baseline: &TextStats) -> SessionDelta {
        fn diff(now: usize, then: usize) -> isize {
            (now as isize).saturating_sub(then as isize)
        }
        SessionDelta {
            chars: diff(self.chars, baseline.chars),
            words: diff(self.words, baseline.words),
            lines: diff(self.lines, baseline.lines),
        }
    }
}
