use chrono::NaiveDate;
use clubreport_core::attribution::AttributionBucket;
use clubreport_core::config::NameOverrides;
use clubreport_core::records::{
    EftEntry, EmployeeRecord, GuestVisit, SaleRecord, TrainerRecord, WorkoutEvent, WorkoutKind,
};
use clubreport_core::report::{ProductionReport, ReportData};

const AS_OF: &str = "2026-08-25";

fn as_of() -> NaiveDate {
    NaiveDate::parse_from_str(AS_OF, "%Y-%m-%d").unwrap()
}

fn sale(
    sale_id: i64,
    commission: &str,
    profit_center: &str,
    main_item: &str,
    amount: f64,
    date: &str,
) -> SaleRecord {
    SaleRecord {
        sale_id,
        commission_employees: commission.into(),
        profit_center: profit_center.into(),
        main_item: main_item.into(),
        total_amount: amount,
        latest_payment_date: date.into(),
    }
}

fn month_data() -> ReportData {
    ReportData {
        employees: vec![
            EmployeeRecord { name: "John Smith".into(), quota: 10000.0 },
            EmployeeRecord { name: "Jane Doe".into(), quota: 0.0 },
        ],
        trainers: vec![TrainerRecord { name: "Jones, Mike".into(), position: "PT".into() }],
        sales: vec![
            sale(1, "Smith, John", "New Business", "Membership", 500.0, AS_OF),
            // Same agreement surfaced twice by the feed; must count once.
            sale(1, "Smith, John", "New Business", "Membership", 500.0, AS_OF),
            sale(2, "John Smith", "New Business", "Membership", 300.0, "2026-08-10"),
            sale(3, "", "New Business", "Web Join", 100.0, "2026-08-12"),
            sale(4, "Jane Doe", "Promotion", "UPG to AMT+", 50.0, AS_OF),
            sale(5, "Unknown Person", "New Business", "Membership", 200.0, "2026-08-03"),
            // Below the commission floor: assigned name is ignored.
            sale(6, "John Smith", "New Business", "Day Pass", 20.0, AS_OF),
            sale(7, "Jones, Mike", "PT Postdate - New", "PT 12 Sessions", 400.0, "2026-08-05"),
        ],
        efts: vec![
            EftEntry { sale_id: 1, price: 49.99, latest_payment_date: AS_OF.into() },
            // Parent is an upgrade; its revenue lives in NB cash.
            EftEntry { sale_id: 4, price: 25.0, latest_payment_date: AS_OF.into() },
            // Orphan draft with no parent sale.
            EftEntry { sale_id: 999, price: 10.0, latest_payment_date: "2026-08-02".into() },
        ],
        guest_visits: vec![
            GuestVisit {
                guest_name: "Walk In".into(),
                employee_name: "Smith, John".into(),
                visit_date: AS_OF.into(),
            },
            GuestVisit {
                guest_name: "Second Guest".into(),
                employee_name: "Smith, John".into(),
                visit_date: "2026-08-04".into(),
            },
        ],
        workouts: vec![
            WorkoutEvent {
                trainer_name: "M Jones".into(),
                event_date: AS_OF.into(),
                kind: WorkoutKind::FirstWorkout,
            },
            WorkoutEvent {
                trainer_name: "Mike Jones".into(),
                event_date: "2026-08-06".into(),
                kind: WorkoutKind::ThirtyDayReprogram,
            },
        ],
    }
}

fn compute() -> ProductionReport {
    let data = month_data();
    let engine = data.attribution_engine(&NameOverrides::default());
    ProductionReport::compute(&data, &engine, as_of())
}

fn row<'a>(report: &'a ProductionReport, label: &str) -> &'a clubreport_core::report::ProductionRow {
    let bucket = match label {
        "Web" => AttributionBucket::Web,
        "Other" => AttributionBucket::Other,
        name => AttributionBucket::Staff(name.to_string()),
    };
    report.row(&bucket).unwrap_or_else(|| panic!("no row for {label}"))
}

#[test]
fn today_and_mtd_split_on_payment_date() {
    let report = compute();
    let john = row(&report, "John Smith");
    assert_eq!(john.nb_cash.today, 500.0);
    assert_eq!(john.nb_cash.mtd, 800.0);
    assert_eq!(john.units.mtd, 2);
    assert_eq!(john.units.today, 1);
}

#[test]
fn duplicate_sale_ids_count_once() {
    let report = compute();
    // Sale 1 appears twice in the feed but contributes 500, not 1000.
    assert_eq!(row(&report, "John Smith").nb_cash.today, 500.0);
}

#[test]
fn duplicate_sale_ids_keep_the_last_row() {
    let data = ReportData {
        employees: vec![EmployeeRecord { name: "John Smith".into(), quota: 0.0 }],
        sales: vec![
            sale(1, "John Smith", "New Business", "Membership", 500.0, AS_OF),
            sale(1, "John Smith", "New Business", "Membership", 600.0, AS_OF),
        ],
        ..ReportData::default()
    };
    let engine = data.attribution_engine(&NameOverrides::default());
    let report = ProductionReport::compute(&data, &engine, as_of());
    let john = row(&report, "John Smith");
    assert_eq!(john.nb_cash.mtd, 600.0);
    assert_eq!(john.units.mtd, 1);
}

#[test]
fn upgrade_cash_lands_in_nb_cash_and_its_eft_is_excluded() {
    let report = compute();
    let jane = row(&report, "Jane Doe");
    assert_eq!(jane.nb_cash.mtd, 50.0);
    assert_eq!(jane.units.mtd, 1);
    assert_eq!(jane.eft.mtd, 0.0);
}

#[test]
fn eft_follows_the_parent_sale_bucket() {
    let report = compute();
    let john = row(&report, "John Smith");
    assert_eq!(john.eft.today, 49.99);
    assert_eq!(john.eft.mtd, 49.99);
    // Orphan drafts fall to Other.
    assert_eq!(row(&report, "Other").eft.mtd, 10.0);
}

#[test]
fn unassigned_web_join_lands_in_web() {
    let report = compute();
    let web = row(&report, "Web");
    assert_eq!(web.nb_cash.mtd, 100.0);
    assert_eq!(web.units.mtd, 1);
}

#[test]
fn small_passes_and_unknown_names_land_in_other() {
    let report = compute();
    let other = row(&report, "Other");
    // 200 from the unmatched name, 20 from the below-floor day pass.
    assert_eq!(other.nb_cash.mtd, 220.0);
    assert_eq!(other.units.mtd, 2);
}

#[test]
fn pt_revenue_stays_out_of_nb_cash() {
    let report = compute();
    let mike = row(&report, "Mike Jones");
    assert_eq!(mike.pt.mtd, 400.0);
    assert_eq!(mike.nb_cash.mtd, 0.0);
    assert_eq!(mike.units.mtd, 0);
}

#[test]
fn guest_visits_attribute_through_last_first_names() {
    let report = compute();
    let john = row(&report, "John Smith");
    assert_eq!(john.guests.today, 1);
    assert_eq!(john.guests.mtd, 2);
}

#[test]
fn workout_tallies_split_by_kind() {
    let report = compute();
    let mike = row(&report, "Mike Jones");
    assert_eq!(mike.first_workouts.today, 1);
    assert_eq!(mike.first_workouts.mtd, 1);
    assert_eq!(mike.thirty_day_reprograms.mtd, 1);
    assert_eq!(mike.thirty_day_reprograms.today, 0);
}

#[test]
fn projection_tracks_quota_against_production_mtd() {
    let report = compute();
    assert_eq!(report.days_elapsed, 25);
    assert_eq!(report.days_in_month, 31);

    let john = row(&report, "John Smith");
    // (849.99 / 25) * 31 / 10000 * 100 = 10.54, rounded to 11.
    assert_eq!(john.production_mtd(), 849.99);
    assert_eq!(john.projected_percent, Some(11));

    // No quota, no projection.
    assert_eq!(row(&report, "Jane Doe").projected_percent, None);
    assert_eq!(row(&report, "Web").projected_percent, None);
}

#[test]
fn totals_sum_every_bucket() {
    let report = compute();
    assert_eq!(report.totals.nb_cash.mtd, 1170.0);
    assert_eq!(report.totals.eft.mtd, 59.99);
    assert_eq!(report.totals.pt.mtd, 400.0);
    assert_eq!(report.totals.units.mtd, 6);
    assert_eq!(report.totals.guests.mtd, 2);
}

#[test]
fn row_order_is_staff_then_trainers_then_web_then_other() {
    let report = compute();
    let labels: Vec<_> = report.rows.iter().map(|r| r.bucket.label().to_string()).collect();
    assert_eq!(labels, vec!["John Smith", "Jane Doe", "Mike Jones", "Web", "Other"]);
}

#[test]
fn empty_data_still_renders_web_and_other() {
    let data = ReportData::default();
    let engine = data.attribution_engine(&NameOverrides::default());
    let report = ProductionReport::compute(&data, &engine, as_of());
    let labels: Vec<_> = report.rows.iter().map(|r| r.bucket.label().to_string()).collect();
    assert_eq!(labels, vec!["Web", "Other"]);
    assert_eq!(report.totals.nb_cash.mtd, 0.0);
}
