//! Per-bucket production report computation.
//!
//! Reproduces the club's "Production Results" sheet: one row per staff
//! bucket with today/MTD new-business cash, EFT drafts, personal-training
//! revenue, unit counts, guest traffic, workout tallies, and quota
//! projection. All sums run over the in-memory record set for the current
//! reporting month; the backend scopes the feed, so MTD means "everything
//! loaded" and "today" filters on the as-of date.

use crate::attribution::{AttributionBucket, AttributionEngine};
use crate::config::NameOverrides;
use crate::normalize::normalize_name;
use crate::records::{
    EftEntry, EmployeeRecord, GuestVisit, SaleRecord, TrainerRecord, WorkoutEvent, WorkoutKind,
};
use crate::types::SaleId;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Everything one report render consumes, already fetched by the caller.
/// Any list may be empty; partial loads are a valid operating mode.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    pub employees: Vec<EmployeeRecord>,
    pub trainers: Vec<TrainerRecord>,
    pub sales: Vec<SaleRecord>,
    pub efts: Vec<EftEntry>,
    pub guest_visits: Vec<GuestVisit>,
    pub workouts: Vec<WorkoutEvent>,
}

impl ReportData {
    /// Build the attribution engine for this data set: roster from the
    /// employee and trainer lists, consolidation map from every assignee
    /// field in the transactional records.
    pub fn attribution_engine(&self, overrides: &NameOverrides) -> AttributionEngine {
        let staff: Vec<String> = self.employees.iter().map(|e| e.name.clone()).collect();
        let trainers: Vec<String> = self.trainers.iter().map(|t| t.name.clone()).collect();
        let raw_fields = self
            .sales
            .iter()
            .map(|s| s.commission_employees.as_str())
            .chain(self.guest_visits.iter().map(|g| g.employee_name.as_str()))
            .chain(self.workouts.iter().map(|w| w.trainer_name.as_str()));
        AttributionEngine::build(&staff, &trainers, overrides, raw_fields)
    }
}

/// A today/MTD money pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub today: f64,
    pub mtd: f64,
}

impl PeriodTotal {
    fn add(&mut self, amount: f64, is_today: bool) {
        self.mtd += amount;
        if is_today {
            self.today += amount;
        }
    }
}

/// A today/MTD count pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodCount {
    pub today: u32,
    pub mtd: u32,
}

impl PeriodCount {
    fn bump(&mut self, is_today: bool) {
        self.mtd += 1;
        if is_today {
            self.today += 1;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct Tallies {
    nb_cash: PeriodTotal,
    eft: PeriodTotal,
    pt: PeriodTotal,
    units: PeriodCount,
    guests: PeriodCount,
    first_workouts: PeriodCount,
    thirty_day_reprograms: PeriodCount,
    other_reprograms: PeriodCount,
}

/// One display row of the production sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionRow {
    pub bucket: AttributionBucket,
    pub quota: f64,
    pub nb_cash: PeriodTotal,
    pub eft: PeriodTotal,
    pub pt: PeriodTotal,
    pub units: PeriodCount,
    pub guests: PeriodCount,
    pub first_workouts: PeriodCount,
    pub thirty_day_reprograms: PeriodCount,
    pub other_reprograms: PeriodCount,
    /// `round((mtd / days elapsed) * days in month / quota * 100)`;
    /// absent when the row has no quota.
    pub projected_percent: Option<i64>,
}

impl ProductionRow {
    /// NB cash + EFT month-to-date, the figure quota tracks against.
    pub fn production_mtd(&self) -> f64 {
        self.nb_cash.mtd + self.eft.mtd
    }
}

/// Sheet-level sums across every bucket row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportTotals {
    pub nb_cash: PeriodTotal,
    pub eft: PeriodTotal,
    pub pt: PeriodTotal,
    pub units: PeriodCount,
    pub guests: PeriodCount,
    pub first_workouts: PeriodCount,
    pub thirty_day_reprograms: PeriodCount,
    pub other_reprograms: PeriodCount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionReport {
    pub as_of: NaiveDate,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub rows: Vec<ProductionRow>,
    pub totals: ReportTotals,
}

impl ProductionReport {
    /// Compute the sheet for `as_of` (today/MTD split and projection both
    /// key off it). Deterministic: same data + same engine = same report.
    pub fn compute(data: &ReportData, engine: &AttributionEngine, as_of: NaiveDate) -> Self {
        let today = as_of.format("%Y-%m-%d").to_string();

        // One bucket per sale id. A duplicate id overwrites (last row in
        // the feed wins, like the legacy assignment map), which is also
        // what deduplicates cash sums across the cash and upgrade views
        // of the same agreement.
        let mut sales_by_id: HashMap<SaleId, (AttributionBucket, &SaleRecord)> = HashMap::new();
        for sale in &data.sales {
            sales_by_id.insert(sale.sale_id, (engine.resolve(sale), sale));
        }

        let mut tallies: BTreeMap<AttributionBucket, Tallies> = BTreeMap::new();

        for (bucket, sale) in sales_by_id.values() {
            let t = tallies.entry(bucket.clone()).or_default();
            let is_today = sale.latest_payment_date == today;
            if sale.is_personal_training() {
                t.pt.add(sale.total_amount, is_today);
            } else if sale.is_new_business() || sale.is_upgrade() {
                t.nb_cash.add(sale.total_amount, is_today);
                t.units.bump(is_today);
            }
        }

        for eft in &data.efts {
            let (bucket, is_upgrade) = match sales_by_id.get(&eft.sale_id) {
                Some((bucket, sale)) => (bucket.clone(), sale.is_upgrade()),
                // Orphan draft with no parent sale in the feed.
                None => (AttributionBucket::Other, false),
            };
            if is_upgrade {
                // Upgrade revenue already counts in NB cash.
                continue;
            }
            tallies
                .entry(bucket)
                .or_default()
                .eft
                .add(eft.price, eft.latest_payment_date == today);
        }

        for visit in &data.guest_visits {
            let bucket = engine.resolve(visit);
            tallies
                .entry(bucket)
                .or_default()
                .guests
                .bump(visit.visit_date == today);
        }

        for workout in &data.workouts {
            let bucket = engine.resolve(workout);
            let t = tallies.entry(bucket).or_default();
            let is_today = workout.event_date == today;
            match workout.kind {
                WorkoutKind::FirstWorkout => t.first_workouts.bump(is_today),
                WorkoutKind::ThirtyDayReprogram => t.thirty_day_reprograms.bump(is_today),
                WorkoutKind::OtherReprogram => t.other_reprograms.bump(is_today),
            }
        }

        let quota_by_name: HashMap<String, f64> = data
            .employees
            .iter()
            .map(|e| (normalize_name(&e.name), e.quota))
            .collect();

        let days_elapsed = as_of.day();
        let days_in_month = days_in_month(as_of);

        // Row order: roster order (staff, then trainers), then any
        // override target that points outside the roster, then Web and
        // Other. Web and Other always render even when empty.
        let mut ordered: Vec<AttributionBucket> = engine
            .roster()
            .iter()
            .map(|name| AttributionBucket::Staff(name.clone()))
            .collect();
        for bucket in tallies.keys() {
            if matches!(bucket, AttributionBucket::Staff(_)) && !ordered.contains(bucket) {
                ordered.push(bucket.clone());
            }
        }
        ordered.push(AttributionBucket::Web);
        ordered.push(AttributionBucket::Other);

        let mut rows = Vec::with_capacity(ordered.len());
        let mut totals = ReportTotals::default();
        for bucket in ordered {
            let t = tallies.remove(&bucket).unwrap_or_default();
            let quota = match &bucket {
                AttributionBucket::Staff(name) => {
                    quota_by_name.get(name.as_str()).copied().unwrap_or(0.0)
                }
                _ => 0.0,
            };

            totals.nb_cash.mtd += t.nb_cash.mtd;
            totals.nb_cash.today += t.nb_cash.today;
            totals.eft.mtd += t.eft.mtd;
            totals.eft.today += t.eft.today;
            totals.pt.mtd += t.pt.mtd;
            totals.pt.today += t.pt.today;
            totals.units.mtd += t.units.mtd;
            totals.units.today += t.units.today;
            totals.guests.mtd += t.guests.mtd;
            totals.guests.today += t.guests.today;
            totals.first_workouts.mtd += t.first_workouts.mtd;
            totals.first_workouts.today += t.first_workouts.today;
            totals.thirty_day_reprograms.mtd += t.thirty_day_reprograms.mtd;
            totals.thirty_day_reprograms.today += t.thirty_day_reprograms.today;
            totals.other_reprograms.mtd += t.other_reprograms.mtd;
            totals.other_reprograms.today += t.other_reprograms.today;

            let production_mtd = t.nb_cash.mtd + t.eft.mtd;
            let projected_percent = if quota > 0.0 && days_elapsed > 0 {
                let projected = (production_mtd / f64::from(days_elapsed))
                    * f64::from(days_in_month);
                Some((projected / quota * 100.0).round() as i64)
            } else {
                None
            };

            rows.push(ProductionRow {
                bucket,
                quota,
                nb_cash: t.nb_cash,
                eft: t.eft,
                pt: t.pt,
                units: t.units,
                guests: t.guests,
                first_workouts: t.first_workouts,
                thirty_day_reprograms: t.thirty_day_reprograms,
                other_reprograms: t.other_reprograms,
                projected_percent,
            });
        }

        ProductionReport {
            as_of,
            days_elapsed,
            days_in_month,
            rows,
            totals,
        }
    }

    /// The row for one bucket, if the sheet has it.
    pub fn row(&self, bucket: &AttributionBucket) -> Option<&ProductionRow> {
        self.rows.iter().find(|r| &r.bucket == bucket)
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match first_of_next.and_then(|d| d.pred_opt()) {
        Some(last) => last.day(),
        None => 30,
    }
}
