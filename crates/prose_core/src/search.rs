//! Case-insensitive literal matching over document chars.

/// Folds a char for case-insensitive comparison.
///
/// Only the first char of a multi-char lowercase mapping is kept so match
/// offsets stay aligned with document offsets.
pub fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Returns whether `text` equals `query` ignoring case.
pub fn same_folded(text: &str, query: &str) -> bool {
    text.chars().map(fold_char).eq(query.chars().map(fold_char))
}

/// Returns the start offsets of every non-overlapping match of `query`,
/// scanning left to right. An empty query matches nothing.
pub fn find_all(haystack: impl Iterator<Item = char>, query: &str) -> Vec<usize> {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let folded: Vec<char> = haystack.map(fold_char).collect();
    let mut matches = Vec::new();
    let mut pos = 0usize;
    while pos + needle.len() <= folded.len() {
        if folded[pos..pos + needle.len()] == needle[..] {
            matches.push(pos);
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    matches
}

/// First match at or after `from`, wrapping to the start of the document.
pub fn next_match(matches: &[usize], from: usize) -> Option<usize> {
    let idx = matches.partition_point(|start| *start < from);
    matches.get(idx).or_else(|| matches.first()).copied()
}

/// Last match strictly before `from`, wrapping to the end of the document.
pub fn prev_match(matches: &[usize], from: usize) -> Option<usize> {
    let idx = matches.partition_point(|start| *start < from);
    match idx {
        0 => matches.last().copied(),
        _ => Some(matches[idx - 1]),
    }
}
