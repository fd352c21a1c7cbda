//! Backend record payloads and sale classification rules.
//!
//! These mirror the JSON the club-system backend serves. Amounts, dates,
//! and profit centers are opaque payload as far as attribution is
//! concerned; only the assignee fields and the classification rules below
//! participate in bucketing.

use crate::attribution::Attributable;
use crate::types::SaleId;
use serde::{Deserialize, Serialize};

/// Profit centers whose sales count as personal training.
pub const PT_PROFIT_CENTERS: [&str; 4] = [
    "PT Postdate - New",
    "PT Postdate - Renew",
    "Personal Training - NEW",
    "Personal Training - RENEW",
];

/// Curated main-item labels that count as membership upgrades, on top of
/// the generic "upg" prefix rule.
pub const UPGRADE_ITEMS: [&str; 5] = [
    "UPG to AMT+",
    "CT UPGRADE",
    "UPG CTG",
    "Upg to AMT",
    "CT - Upgrade",
];

/// Non-upgrade sales at or below this amount never carry commission
/// credit; tiny passes fall through to the Web/Other rules.
pub const MIN_COMMISSION_AMOUNT: f64 = 25.0;

/// Is this main item an upgrade?
pub fn is_upgrade_item(main_item: &str) -> bool {
    let main = main_item.trim();
    if main.is_empty() {
        return false;
    }
    main.to_lowercase().starts_with("upg")
        || UPGRADE_ITEMS.iter().any(|item| item.eq_ignore_ascii_case(main))
}

/// One sale/agreement row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sale_id: SaleId,
    #[serde(default)]
    pub commission_employees: String,
    #[serde(default)]
    pub profit_center: String,
    #[serde(default)]
    pub main_item: String,
    #[serde(default)]
    pub total_amount: f64,
    /// YYYY-MM-DD; the backend scopes the feed to the reporting month.
    #[serde(default)]
    pub latest_payment_date: String,
}

impl SaleRecord {
    pub fn is_upgrade(&self) -> bool {
        self.profit_center == "Promotion" && is_upgrade_item(&self.main_item)
    }

    pub fn is_personal_training(&self) -> bool {
        let center = self.profit_center.trim();
        PT_PROFIT_CENTERS.iter().any(|c| c.eq_ignore_ascii_case(center))
    }

    pub fn is_new_business(&self) -> bool {
        self.profit_center == "New Business"
    }

    /// The small-pass guard: upgrades always carry commission, everything
    /// else only above MIN_COMMISSION_AMOUNT.
    pub fn carries_commission(&self) -> bool {
        self.is_upgrade() || self.total_amount > MIN_COMMISSION_AMOUNT
    }
}

impl Attributable for SaleRecord {
    fn raw_assignee(&self) -> Option<&str> {
        // A sale below the commission floor is structurally unassigned for
        // attribution purposes even when the field is populated.
        if self.carries_commission() {
            Some(&self.commission_employees)
        } else {
            None
        }
    }

    fn is_web_eligible(&self) -> bool {
        self.is_new_business() && self.commission_employees.trim().is_empty()
    }
}

/// One EFT draft line. Attributed through its parent sale's bucket, so it
/// does not implement Attributable itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EftEntry {
    pub sale_id: SaleId,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub latest_payment_date: String,
}

/// One guest visit. The employee field is a single name, often in
/// "Last, First" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestVisit {
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub visit_date: String,
}

impl Attributable for GuestVisit {
    fn raw_assignee(&self) -> Option<&str> {
        Some(&self.employee_name)
    }
}

/// Kinds of tracked training events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    FirstWorkout,
    ThirtyDayReprogram,
    OtherReprogram,
}

/// One logged workout/reprogram event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEvent {
    #[serde(default)]
    pub trainer_name: String,
    #[serde(default)]
    pub event_date: String,
    pub kind: WorkoutKind,
}

impl Attributable for WorkoutEvent {
    fn raw_assignee(&self) -> Option<&str> {
        Some(&self.trainer_name)
    }
}

/// One roster row for sales staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    #[serde(default)]
    pub quota: f64,
}

/// One roster row for trainers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub name: String,
    #[serde(default)]
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(profit_center: &str, main_item: &str, amount: f64) -> SaleRecord {
        SaleRecord {
            sale_id: 1,
            commission_employees: String::new(),
            profit_center: profit_center.into(),
            main_item: main_item.into(),
            total_amount: amount,
            latest_payment_date: String::new(),
        }
    }

    #[test]
    fn upgrade_detection() {
        assert!(sale("Promotion", "UPG to AMT+", 10.0).is_upgrade());
        assert!(sale("Promotion", "upgrade - premium", 10.0).is_upgrade());
        assert!(sale("Promotion", "ct upgrade", 10.0).is_upgrade());
        assert!(!sale("New Business", "UPG to AMT+", 10.0).is_upgrade());
        assert!(!sale("Promotion", "Guest Pass", 10.0).is_upgrade());
    }

    #[test]
    fn small_passes_carry_no_commission() {
        assert!(!sale("New Business", "Day Pass", 25.0).carries_commission());
        assert!(sale("New Business", "Membership", 25.01).carries_commission());
        // Upgrades are exempt from the floor.
        assert!(sale("Promotion", "UPG CTG", 5.0).carries_commission());
    }

    #[test]
    fn pt_profit_centers_match_case_insensitively() {
        assert!(sale("pt postdate - new", "", 100.0).is_personal_training());
        assert!(!sale("New Business", "", 100.0).is_personal_training());
    }
}
