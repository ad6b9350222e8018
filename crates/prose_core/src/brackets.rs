//! Tokenizer contract and bracket matching that skips strings and comments.

use crate::document::Document;

/// Per-char classification produced by a host tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenKind {
    #[default]
    Text,
    Keyword,
    Type,
    Number,
    String,
    Comment,
    Punctuation,
}

impl TokenKind {
    /// Brackets inside these tokens never pair with code brackets.
    pub fn is_inert(self) -> bool {
        matches!(self, Self::String | Self::Comment)
    }
}

/// State carried from the end of one line into the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineCarry {
    pub in_block_comment: bool,
}

/// Pure syntax tokenizer supplied by the host.
///
/// `tokenize` returns one kind per char of `line` (no trailing newline) and
/// the carry for the following line.
pub trait Tokenizer {
    fn tokenize(&self, line: &str, carry_in: LineCarry) -> (Vec<TokenKind>, LineCarry);
}

/// Tokenizer for hosts without highlighting: everything is plain text.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, line: &str, carry_in: LineCarry) -> (Vec<TokenKind>, LineCarry) {
        (vec![TokenKind::Text; line.chars().count()], carry_in)
    }
}

fn bracket_pair(ch: char) -> Option<(char, bool)> {
    match ch {
        '(' => Some((')', true)),
        '[' => Some((']', true)),
        '{' => Some(('}', true)),
        ')' => Some(('(', false)),
        ']' => Some(('[', false)),
        '}' => Some(('{', false)),
        _ => None,
    }
}

/// Token kind of every char in `doc`; newlines are [`TokenKind::Text`].
fn classify(doc: &Document, tokenizer: &dyn Tokenizer) -> Vec<TokenKind> {
    let mut kinds = Vec::with_capacity(doc.length());
    let mut carry = LineCarry::default();
    for line in 0..doc.line_count() {
        let start = doc.line_start(line);
        let end = doc.line_end(line);
        let text = doc.extract_text(start, end - start);
        let (mut line_kinds, next) = tokenizer.tokenize(&text, carry);
        line_kinds.resize(end - start, TokenKind::Text);
        kinds.extend(line_kinds);
        if line + 1 < doc.line_count() {
            kinds.push(TokenKind::Text);
        }
        carry = next;
    }
    kinds
}

/// Offset of the bracket matching the one at `pos`, honoring nesting and
/// ignoring brackets the tokenizer marks as string or comment.
///
/// Returns `None` when `pos` is not a code bracket or has no partner.
pub fn find_matching_bracket(
    doc: &Document,
    pos: usize,
    tokenizer: &dyn Tokenizer,
) -> Option<usize> {
    let open = doc.char_at(pos);
    let (close, forward) = bracket_pair(open)?;
    let kinds = classify(doc, tokenizer);
    if kinds.get(pos).is_some_and(|kind| kind.is_inert()) {
        return None;
    }
    let is_code = |offset: usize| !kinds.get(offset).is_some_and(|kind| kind.is_inert());
    let mut depth = 0usize;
    if forward {
        for offset in pos + 1..doc.length() {
            let ch = doc.char_at(offset);
            if !is_code(offset) {
                continue;
            }
            if ch == open {
                depth += 1;
            } else if ch == close {
                if depth == 0 {
                    return Some(offset);
                }
                depth -= 1;
            }
        }
    } else {
        for offset in (0..pos).rev() {
            let ch = doc.char_at(offset);
            if !is_code(offset) {
                continue;
            }
            if ch == open {
                depth += 1;
            } else if ch == close {
                if depth == 0 {
                    return Some(offset);
                }
                depth -= 1;
            }
        }
    }
    None
}
