//! clubreport-core — staff attribution and production reporting for
//! club sales data.
//!
//! DATA FLOW (fixed, documented):
//!   1. The caller fetches the roster and the month's transactional
//!      records from the backend (out of scope here).
//!   2. AttributionEngine::build() normalizes the roster and constructs
//!      the per-load consolidation map.
//!   3. Every record resolves to exactly one AttributionBucket.
//!   4. ProductionReport::compute() groups and sums per bucket.
//!
//! RULES:
//!   - The engine is pure: no I/O past config loading, no randomness, no
//!     shared mutable state across loads.
//!   - The consolidation map lives for one data load and is never
//!     persisted.
//!   - Match scoring weights are load-bearing; see canonical.rs.

pub mod attribution;
pub mod canonical;
pub mod config;
pub mod consolidation;
pub mod error;
pub mod normalize;
pub mod records;
pub mod report;
pub mod types;

pub use attribution::{Attributable, AttributionBucket, AttributionEngine};
pub use canonical::{canonicalize, MATCH_THRESHOLD};
pub use config::{NameOverrides, ReportConfig};
pub use consolidation::ConsolidationMap;
pub use error::{ReportError, ReportResult};
pub use normalize::normalize_name;
pub use report::{ProductionReport, ReportData};
