//! Fuzzy matching of normalized names against the official roster.
//!
//! Score weights and the match threshold are load-bearing: every historical
//! report number was produced with exactly these values, so changing any of
//! them changes who a sale belongs to. Treat the block below the way a wire
//! format would be treated.

use crate::normalize::normalize_name;
use crate::types::RosterName;

/// An input token equal to a candidate token.
pub const EXACT_TOKEN_SCORE: i32 = 10;
/// A single-character input token that prefixes a candidate token.
pub const INITIAL_PREFIX_SCORE: i32 = 5;
/// An input token of length >= 3 that prefixes a candidate token.
pub const PARTIAL_PREFIX_SCORE: i32 = 7;
/// Exact match on the trailing token (surname heuristic).
pub const SURNAME_BONUS: i32 = 15;
/// Every candidate token accounted for by some input token.
pub const REVERSE_COVERAGE_BONUS: i32 = 5;
/// Minimum best score for a confident match. A lone surname hit clears it;
/// two partial prefix hits (7 + 7) do not.
pub const MATCH_THRESHOLD: i32 = 15;

/// Map a free-text name onto its best-guess roster entry.
///
/// Returns the roster display form on a confident match, otherwise the
/// normalized input unchanged; callers treat an unmatched name as "Other".
/// Deterministic: ties keep the earliest-scanned candidate, and an exact
/// case-insensitive match short-circuits the scoring loop entirely.
pub fn canonicalize(raw: &str, roster: &[RosterName]) -> String {
    let n = normalize_name(raw);
    if n.is_empty() {
        return n;
    }
    if let Some(direct) = roster.iter().find(|o| o.eq_ignore_ascii_case(&n)) {
        return direct.clone();
    }

    let lowered = n.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();

    let mut best_match: Option<&RosterName> = None;
    let mut best_score = 0;

    for official in roster {
        let official_lower = official.to_lowercase();
        let official_parts: Vec<&str> = official_lower.split_whitespace().collect();
        let score = score_candidate(&parts, &official_parts);
        if score > best_score {
            best_score = score;
            best_match = Some(official);
        }
    }

    match best_match {
        Some(official) if best_score >= MATCH_THRESHOLD => official.clone(),
        _ => n,
    }
}

/// Score one roster candidate against the tokenized input.
///
/// Per input token the first matching rule wins, scanning candidate tokens
/// in order: exact, single-char prefix, len>=3 prefix. An input token of
/// len>=3 with no hit at all withholds the reverse-coverage gate unless
/// some other token scored.
fn score_candidate(parts: &[&str], official_parts: &[&str]) -> i32 {
    let mut score = 0;
    let mut all_parts_found = true;

    for part in parts {
        let mut part_found = false;
        for official_part in official_parts {
            if part == official_part {
                score += EXACT_TOKEN_SCORE;
                part_found = true;
                break;
            }
            if part.len() == 1 && official_part.starts_with(part) {
                score += INITIAL_PREFIX_SCORE;
                part_found = true;
                break;
            }
            if part.len() >= 3 && official_part.starts_with(part) {
                score += PARTIAL_PREFIX_SCORE;
                part_found = true;
                break;
            }
        }
        if !part_found && part.len() >= 3 {
            all_parts_found = false;
        }
    }

    // Surname heuristic: an exact hit on the trailing token outweighs any
    // pile of partial prefix hits.
    if let (Some(last), Some(official_last)) = (parts.last(), official_parts.last()) {
        if last == official_last {
            score += SURNAME_BONUS;
        }
    }

    // Reverse coverage: the candidate brings no token (len >= 2) the input
    // cannot account for under equality or the len>=3 prefix rules.
    if all_parts_found || score > 0 {
        let covered = official_parts.iter().all(|official_part| {
            official_part.len() < 2
                || parts.iter().any(|part| {
                    part == official_part
                        || (part.len() >= 3 && official_part.starts_with(part))
                        || (official_part.len() >= 3 && part.starts_with(official_part))
                })
        });
        if covered {
            score += REVERSE_COVERAGE_BONUS;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<RosterName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_ignores_case_and_scoring() {
        let r = roster(&["John Smith", "John Smithson"]);
        assert_eq!(canonicalize("john smith", &r), "John Smith");
    }

    #[test]
    fn surname_only_matches() {
        let r = roster(&["John Smith"]);
        // "smith": exact token 10 + surname 15 = 25
        assert_eq!(canonicalize("Smith", &r), "John Smith");
    }

    #[test]
    fn empty_roster_returns_input_unchanged() {
        assert_eq!(canonicalize("Jane Doe", &[]), "Jane Doe");
        assert_eq!(canonicalize("", &[]), "");
    }
}
