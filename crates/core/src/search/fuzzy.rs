//! Edit-distance based word matching.

use strsim::{levenshtein, normalized_levenshtein};

/// Minimum similarity, in percent, for two words to count as a fuzzy match.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 80;

/// Levenshtein distance between two strings, counted in characters.
///
/// Single-character insertions, deletions and substitutions each cost one.
/// Transpositions are two edits.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity between two words in `[0.0, 1.0]`: one minus the edit distance
/// over the longer word's length.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Whether two words are at least [`SIMILARITY_THRESHOLD_PERCENT`] similar.
///
/// Compared in integer arithmetic so the boundary (one edit in five
/// characters) is exact.
#[must_use]
pub fn is_fuzzy_match(a: &str, b: &str) -> bool {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return true;
    }
    let distance = edit_distance(a, b).min(longest);
    (longest - distance) * 100 >= longest * SIMILARITY_THRESHOLD_PERCENT
}
