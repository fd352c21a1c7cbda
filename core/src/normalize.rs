//! Raw assignee-name normalization.
//!
//! RULE: every free-text name entering the attribution path passes through
//! normalize_name() before any lookup or scoring. Nothing downstream ever
//! sees an unnormalized string.

/// Normalize a raw employee-name string into display form.
///
/// - Outer whitespace is trimmed; empty input stays empty (the sentinel
///   for "unassigned").
/// - `"Last, First"` is reordered to `"First Last"`. Only the first two
///   comma segments participate; anything past the second comma drops,
///   so `"Smith, John, Jr"` becomes `"John Smith"`. Dropping the tail
///   keeps the output comma-free and normalization idempotent.
/// - Runs of internal whitespace collapse to single spaces.
///
/// Pure and idempotent.
pub fn normalize_name(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    let reordered = if s.contains(',') {
        let mut segments = s.split(',');
        let last = segments.next().unwrap_or("").trim();
        let first = segments.next().unwrap_or("").trim();
        format!("{first} {last}")
    } else {
        s.to_string()
    };
    reordered.split_whitespace().collect::<Vec<_>>().join(" ")
}
