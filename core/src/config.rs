//! Externally-editable report configuration.
//!
//! The name-override table exists to patch known-bad fuzzy matches (legal
//! name vs. nickname, stray middle initials) without touching the scoring
//! algorithm. It lives in a data file, not in code, so a front-desk data fix
//! never needs a redeploy.

use crate::error::ReportResult;
use crate::normalize::normalize_name;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk shape of `name_overrides.json`:
/// `{ "overrides": { "Sean G Swet": "Sean Swet" } }`
#[derive(Debug, Clone, Deserialize)]
struct OverridesFile {
    overrides: BTreeMap<String, String>,
}

/// Manually curated name corrections, consulted before automatic
/// canonicalization and winning even when scoring would disagree.
///
/// Keys are normalized on insert, so the file may spell a variant as
/// `"Swet, Sean G"` or `"Sean  G Swet"` and still hit. Targets are trusted
/// verbatim; validating them against the roster would defeat their purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameOverrides {
    entries: BTreeMap<String, String>,
}

impl NameOverrides {
    pub fn insert(&mut self, variant: &str, target: &str) {
        self.entries.insert(normalize_name(variant), target.to_string());
    }

    /// Look up an already-normalized name.
    pub fn lookup(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>, T: AsRef<str>> FromIterator<(S, T)> for NameOverrides {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut overrides = NameOverrides::default();
        for (variant, target) in iter {
            overrides.insert(variant.as_ref(), target.as_ref());
        }
        overrides
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub overrides: NameOverrides,
}

impl ReportConfig {
    /// Load configuration from `data_dir`.
    ///
    /// A missing override file is not an error: a partial data directory is
    /// a valid operating mode and yields an empty table.
    pub fn load(data_dir: &str) -> ReportResult<Self> {
        let path = Path::new(data_dir).join("name_overrides.json");
        if !path.exists() {
            log::info!("no name_overrides.json under {data_dir}; override table is empty");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: OverridesFile = serde_json::from_str(&content)?;

        let overrides: NameOverrides = file.overrides.iter().collect();
        log::info!(
            "loaded {} name overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(Self { overrides })
    }
}
