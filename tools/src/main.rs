//! report-runner: headless production-report runner for club sales data.
//!
//! Usage:
//!   report-runner --data-dir ./data --as-of 2026-08-25
//!   report-runner --data-dir ./data --dump-map

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clubreport_core::{
    attribution::AttributionBucket,
    records::{EftEntry, EmployeeRecord, GuestVisit, SaleRecord, TrainerRecord, WorkoutEvent},
    report::{ProductionReport, ReportData},
    ReportConfig,
};
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");
    let dump_map = args.iter().any(|a| a == "--dump-map");
    let as_of = match args.windows(2).find(|w| w[0] == "--as-of") {
        Some(w) => NaiveDate::parse_from_str(&w[1], "%Y-%m-%d")
            .with_context(|| format!("bad --as-of date '{}'", w[1]))?,
        None => Local::now().date_naive(),
    };

    println!("Club Production Report — report-runner");
    println!("  data_dir: {data_dir}");
    println!("  as_of:    {as_of}");
    println!();

    let config = ReportConfig::load(data_dir)?;

    let data = ReportData {
        employees: load_json::<EmployeeRecord>(data_dir, "employees.json")?,
        trainers: load_json::<TrainerRecord>(data_dir, "trainers.json")?,
        sales: load_json::<SaleRecord>(data_dir, "sales.json")?,
        efts: load_json::<EftEntry>(data_dir, "efts.json")?,
        guest_visits: load_json::<GuestVisit>(data_dir, "guest_visits.json")?,
        workouts: load_json::<WorkoutEvent>(data_dir, "workouts.json")?,
    };

    let engine = data.attribution_engine(&config.overrides);

    if dump_map {
        println!("=== CONSOLIDATION MAP ({} names) ===", engine.map().len());
        for (raw, canonical) in engine.map().iter() {
            println!("  {raw:<30} -> {canonical}");
        }
        println!();
    }

    let report = ProductionReport::compute(&data, &engine, as_of);
    print_report(&report);
    Ok(())
}

fn load_json<T: DeserializeOwned>(data_dir: &str, name: &str) -> Result<Vec<T>> {
    let path = Path::new(data_dir).join(name);
    if !path.exists() {
        log::info!("{name} not found under {data_dir}; treating as empty");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!("loaded {} records from {name}", records.len());
    Ok(records)
}

fn print_report(report: &ProductionReport) {
    println!(
        "=== PRODUCTION RESULTS (day {} of {}) ===",
        report.days_elapsed, report.days_in_month
    );
    println!(
        "  {:<20} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>6} {:>7} {:>5} {:>5}",
        "STAFF", "QUOTA", "CASH TDY", "CASH MTD", "EFT TDY", "EFT MTD", "PT MTD", "UNITS",
        "GUESTS", "1stWO", "30DAY"
    );
    // Trailing column: projected percent of quota, blank without a quota.
    for row in &report.rows {
        let projected = match row.projected_percent {
            Some(pct) => format!("{pct}%"),
            None => String::new(),
        };
        println!(
            "  {:<20} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>6} {:>7} {:>5} {:>5}  {}",
            row.bucket.label(),
            if row.quota > 0.0 {
                format!("{:.0}", row.quota)
            } else {
                String::new()
            },
            row.nb_cash.today,
            row.nb_cash.mtd,
            row.eft.today,
            row.eft.mtd,
            row.pt.mtd,
            row.units.mtd,
            row.guests.mtd,
            row.first_workouts.mtd,
            row.thirty_day_reprograms.mtd,
            projected,
        );
    }
    let t = &report.totals;
    println!(
        "  {:<20} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>6} {:>7} {:>5} {:>5}",
        "TOTALS",
        "",
        t.nb_cash.today,
        t.nb_cash.mtd,
        t.eft.today,
        t.eft.mtd,
        t.pt.mtd,
        t.units.mtd,
        t.guests.mtd,
        t.first_workouts.mtd,
        t.thirty_day_reprograms.mtd,
    );

    let other_row = report.rows.iter().find(|r| r.bucket == AttributionBucket::Other);
    if let Some(other) = other_row {
        if other.units.mtd > 0 || other.guests.mtd > 0 {
            log::warn!(
                "Other bucket holds {} units and {} guest visits; check the override table",
                other.units.mtd,
                other.guests.mtd
            );
        }
    }
}
