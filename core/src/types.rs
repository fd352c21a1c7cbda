//! Shared primitive types used across the reporting core.

/// A canonical staff or trainer display name from the roster.
pub type RosterName = String;

/// The backend's stable identifier for one sale/agreement row.
pub type SaleId = i64;
