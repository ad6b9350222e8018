//! Spell-check oracle contract and a bounded memoizing cache in front of it.

use crate::config::EditorConfig;
use crate::constants::{DEFAULT_SPELL_CACHE_MAX, SPELL_MAX_WORD_CHARS};
use crate::document::Document;
use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use tracing::debug;

/// Host-provided dictionary lookup. Must be pure for a given word.
pub trait SpellOracle {
    fn is_correct(&self, word: &str) -> bool;
}

impl<F> SpellOracle for F
where
    F: Fn(&str) -> bool,
{
    fn is_correct(&self, word: &str) -> bool {
        self(word)
    }
}

/// Memoizes oracle answers keyed by the lowercased word.
///
/// Once `max_entries` answers are stored the oldest half is evicted.
#[derive(Debug)]
pub struct SpellCache {
    answers: HashMap<String, bool>,
    order: VecDeque<String>,
    max_entries: usize,
}

impl Default for SpellCache {
    fn default() -> Self {
        Self::new(DEFAULT_SPELL_CACHE_MAX)
    }
}

impl SpellCache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// - `max_entries`: Answers kept before eviction; values below two are
    ///   raised to two so eviction always leaves room.
    pub fn new(max_entries: usize) -> Self {
        Self {
            answers: HashMap::new(),
            order: VecDeque::new(),
            max_entries: max_entries.max(2),
        }
    }

    /// Creates a cache bounded by `config.spell_cache_max`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.spell_cache_max)
    }

    /// Entry bound after which the oldest half is evicted.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.order.clear();
    }

    /// Returns whether `word` is spelled correctly.
    ///
    /// Single chars, words containing digits and words of
    /// [`SPELL_MAX_WORD_CHARS`] or more chars count as correct without asking
    /// the oracle.
    pub fn check(&mut self, word: &str, oracle: &dyn SpellOracle) -> bool {
        let len = word.chars().count();
        if len <= 1 || len >= SPELL_MAX_WORD_CHARS || word.chars().any(|ch| ch.is_numeric()) {
            return true;
        }
        let key = word.to_lowercase();
        if let Some(answer) = self.answers.get(&key) {
            return *answer;
        }
        let answer = oracle.is_correct(word);
        if self.answers.len() >= self.max_entries {
            self.evict_half();
        }
        self.order.push_back(key.clone());
        self.answers.insert(key, answer);
        answer
    }

    fn evict_half(&mut self) {
        let evict = self.order.len() / 2;
        for key in self.order.drain(..evict) {
            self.answers.remove(&key);
        }
        debug!(evicted = evict, kept = self.answers.len(), "spell cache evicted");
    }
}

fn is_spell_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\''
}

/// Char ranges of misspelled words inside `range` of `doc`.
///
/// Words are runs of alphanumerics and apostrophes; leading and trailing
/// apostrophes are not part of the word.
pub fn misspelled_ranges(
    doc: &Document,
    range: Range<usize>,
    cache: &mut SpellCache,
    oracle: &dyn SpellOracle,
) -> Vec<Range<usize>> {
    let end = range.end.min(doc.length());
    let mut out = Vec::new();
    let mut pos = range.start.min(end);
    while pos < end {
        if !is_spell_word_char(doc.char_at(pos)) {
            pos += 1;
            continue;
        }
        let mut word_end = pos;
        while word_end < end && is_spell_word_char(doc.char_at(word_end)) {
            word_end += 1;
        }
        let mut start = pos;
        let mut stop = word_end;
        while start < stop && doc.char_at(start) == '\'' {
            start += 1;
        }
        while stop > start && doc.char_at(stop - 1) == '\'' {
            stop -= 1;
        }
        if stop > start {
            let word = doc.extract_text(start, stop - start);
            if !cache.check(&word, oracle) {
                out.push(start..stop);
            }
        }
        pos = word_end;
    }
    out
}
