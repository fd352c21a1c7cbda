//! Consolidation-map construction.
//!
//! RULES:
//!   - Built fresh on every data load; never persisted, never cached
//!     across loads.
//!   - Keys are comma-split, normalized assignee segments, not whole raw
//!     fields. A multi-assignee field like "Jane Doe, John Smith"
//!     contributes one candidate per segment, which is what keeps the
//!     first-resolved-wins lookup honest.
//!   - Resolution order per candidate: manual override table, exact
//!     case-insensitive roster match, fuzzy canonicalization.
//!   - Absence of an entry means "Other" at lookup time.

use crate::canonical::canonicalize;
use crate::config::NameOverrides;
use crate::normalize::normalize_name;
use crate::types::RosterName;
use std::collections::{BTreeMap, BTreeSet};

/// Raw-normalized-segment -> canonical roster name, for one data load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidationMap {
    entries: BTreeMap<String, RosterName>,
}

impl ConsolidationMap {
    /// Scan every supplied raw assignee field and resolve each distinct
    /// normalized segment against the roster.
    pub fn build<'a, I>(roster: &[RosterName], overrides: &NameOverrides, raw_fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut candidates = BTreeSet::new();
        for field in raw_fields {
            for segment in field.split(',') {
                let normalized = normalize_name(segment);
                if !normalized.is_empty() {
                    candidates.insert(normalized);
                }
            }
        }

        let scanned = candidates.len();
        let mut entries = BTreeMap::new();
        for name in candidates {
            if let Some(target) = overrides.lookup(&name) {
                entries.insert(name, target.to_string());
                continue;
            }
            if let Some(direct) = roster.iter().find(|o| o.eq_ignore_ascii_case(&name)) {
                entries.insert(name, direct.clone());
                continue;
            }
            let canonical = canonicalize(&name, roster);
            // canonicalize() echoes the input back when nothing clears the
            // threshold; only a genuine roster landing earns an entry.
            if let Some(matched) = roster.iter().find(|o| o.eq_ignore_ascii_case(&canonical)) {
                entries.insert(name, matched.clone());
            }
        }

        log::debug!(
            "consolidation map: {} of {} distinct names resolved",
            entries.len(),
            scanned
        );
        Self { entries }
    }

    /// Look up an already-normalized segment.
    pub fn resolve(&self, normalized: &str) -> Option<&RosterName> {
        self.entries.get(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
