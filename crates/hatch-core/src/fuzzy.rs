//! Subsequence scoring used to rank projects against the filter query.

/// Score returned when the query is not a subsequence of the candidate.
pub const NO_MATCH: i32 = -(1 << 30);

const MATCH_BONUS: i32 = 10;
const CONTIGUOUS_BONUS: i32 = 8;
const BOUNDARY_BONUS: i32 = 4;

/// Score `candidate` against `query`, case-insensitively.
///
/// Whitespace in the query is dropped before matching, so `"spike auth"`
/// matches `"2026-03-01-spike-auth"` as if it were `"spikeauth"`. An empty
/// query scores 0 for every candidate. Each matched character earns a base
/// bonus, extra for continuing a run or starting after a word boundary, and
/// loses its position; longer candidates pay a flat length penalty.
pub fn fuzzy_score(candidate: &str, query: &str) -> i32 {
    let query: String = query.split_whitespace().collect();
    if query.is_empty() {
        return 0;
    }

    let candidate: Vec<char> = candidate.to_lowercase().chars().collect();
    let query: Vec<char> = query.to_lowercase().chars().collect();
    if query.len() > candidate.len() {
        return NO_MATCH;
    }

    let mut score = 0i32;
    let mut last_match: isize = -2;
    let mut cursor = 0usize;
    for &wanted in &query {
        let Some(offset) = candidate[cursor..].iter().position(|&c| c == wanted) else {
            return NO_MATCH;
        };
        let pos = cursor + offset;

        score += MATCH_BONUS;
        if pos as isize == last_match + 1 {
            score += CONTIGUOUS_BONUS;
        }
        if pos == 0 || is_word_boundary(candidate[pos - 1]) {
            score += BOUNDARY_BONUS;
        }
        score -= pos as i32;

        last_match = pos as isize;
        cursor = pos + 1;
    }

    score - (candidate.len() / 4) as i32
}

fn is_word_boundary(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | '/' | ' ')
}
