//! Attribution of transactional records to staff buckets.
//!
//! RULES:
//!   - Every record resolves to exactly one bucket. Multi-assignee fields
//!     credit the first segment that resolves; co-assignees after it get
//!     nothing (sole attribution, preserved from the legacy reports).
//!   - "Web" is only reachable for structurally unassigned records whose
//!     type-specific eligibility predicate holds.
//!   - Resolution is a pure pipeline (normalize, map lookup, bucket); the
//!     engine holds no mutable state after build().

use crate::config::NameOverrides;
use crate::consolidation::ConsolidationMap;
use crate::normalize::normalize_name;
use crate::types::RosterName;
use serde::Serialize;
use std::fmt;

/// Where one record's credit lands. An explicit enum rather than magic
/// strings, so a roster member literally named "Other" can never collide
/// with the fallback bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AttributionBucket {
    /// A specific roster member (sales staff or trainer).
    Staff(RosterName),
    /// Unassigned and web-eligible (e.g. an online New Business join).
    Web,
    /// Everything that failed to resolve.
    Other,
}

impl AttributionBucket {
    pub fn label(&self) -> &str {
        match self {
            AttributionBucket::Staff(name) => name,
            AttributionBucket::Web => "Web",
            AttributionBucket::Other => "Other",
        }
    }
}

impl fmt::Display for AttributionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The contract a record type fulfills to flow through attribution.
pub trait Attributable {
    /// The raw free-text assignee field, if the record carries one.
    fn raw_assignee(&self) -> Option<&str>;

    /// Whether an unassigned record of this type counts as web-sourced.
    fn is_web_eligible(&self) -> bool {
        false
    }
}

/// Short-lived attribution facade, built once per data load.
///
/// Owns the normalized roster (sales staff unioned with trainers) and the
/// consolidation map; resolves any Attributable record to its bucket.
pub struct AttributionEngine {
    roster: Vec<RosterName>,
    map: ConsolidationMap,
}

impl AttributionEngine {
    /// Normalize and union the roster lists, then scan every supplied raw
    /// assignee field into the consolidation map.
    ///
    /// `staff` keeps its incoming order (it drives report row order);
    /// trainers append after, skipping duplicates case-insensitively.
    pub fn build<'a, I>(
        staff: &[String],
        trainers: &[String],
        overrides: &NameOverrides,
        raw_fields: I,
    ) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut roster: Vec<RosterName> = Vec::new();
        for name in staff.iter().chain(trainers.iter()) {
            let normalized = normalize_name(name);
            if normalized.is_empty() {
                continue;
            }
            if !roster.iter().any(|r| r.eq_ignore_ascii_case(&normalized)) {
                roster.push(normalized);
            }
        }

        let map = ConsolidationMap::build(&roster, overrides, raw_fields);
        log::info!(
            "attribution engine: roster of {}, {} consolidated names",
            roster.len(),
            map.len()
        );
        Self { roster, map }
    }

    /// The unioned, normalized roster in display order.
    pub fn roster(&self) -> &[RosterName] {
        &self.roster
    }

    /// The consolidation map, exposed for inspection and debugging.
    pub fn map(&self) -> &ConsolidationMap {
        &self.map
    }

    /// Resolve one record to exactly one bucket.
    pub fn resolve<R: Attributable>(&self, record: &R) -> AttributionBucket {
        self.resolve_assignee(record.raw_assignee(), record.is_web_eligible())
    }

    /// Resolve a raw assignee field directly.
    ///
    /// Empty or absent: Web when eligible, else Other. Otherwise the field
    /// splits on commas and the first segment with a map entry wins; no
    /// segment resolving means Other.
    pub fn resolve_assignee(&self, raw: Option<&str>, web_eligible: bool) -> AttributionBucket {
        let raw = raw.unwrap_or("").trim();
        if raw.is_empty() {
            return if web_eligible {
                AttributionBucket::Web
            } else {
                AttributionBucket::Other
            };
        }
        for segment in raw.split(',') {
            let normalized = normalize_name(segment);
            if normalized.is_empty() {
                continue;
            }
            if let Some(owner) = self.map.resolve(&normalized) {
                return AttributionBucket::Staff(owner.clone());
            }
        }
        AttributionBucket::Other
    }
}
