use std::collections::BTreeSet;
use std::fmt;

use anyhow::{bail, Result};

use super::filter::ALL_SITES;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome class. The source column stores `1` for success, `0` for failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the numeric `class` flag.
    pub fn from_class(class: i64) -> Result<Self> {
        match class {
            1 => Ok(Outcome::Success),
            0 => Ok(Outcome::Failure),
            other => bail!("class must be 0 or 1, got {other}"),
        }
    }

    /// Numeric value used as the scatter y coordinate.
    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Booster category used when the source row leaves it blank.
pub const UNKNOWN_BOOSTER: &str = "Unknown";

/// A single launch (one row of the source table). Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    /// Carried for hover text only.
    pub flight_number: Option<u32>,
    /// Carried for hover text only.
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    /// Build a record, enforcing the non-null / non-negative invariants.
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Result<Self> {
        let site = site.into();
        if site.trim().is_empty() {
            bail!("launch site is empty");
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            bail!("payload mass must be a non-negative number, got {payload_mass_kg}");
        }
        let booster_category = booster_category.into();
        let booster_category = if booster_category.trim().is_empty() {
            UNKNOWN_BOOSTER.to_string()
        } else {
            booster_category
        };
        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            outcome,
            booster_category,
            flight_number: None,
            booster_version: None,
        })
    }

    pub fn with_flight_number(mut self, flight_number: Option<u32>) -> Self {
        self.flight_number = flight_number;
        self
    }

    pub fn with_booster_version(mut self, booster_version: Option<String>) -> Self {
        self.booster_version = booster_version.filter(|v| !v.trim().is_empty());
        self
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Observed payload bounds of a dataset, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
    /// Distinct booster categories in first-appearance order.
    booster_categories: Vec<String>,
    payload_range: PayloadRange,
}

impl LaunchDataset {
    /// Build indices from the loaded records. Fails on an empty table since
    /// the payload range is undefined, and on a site named like the
    /// all-sites selector value.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        if records.is_empty() {
            bail!("dataset contains no launch records");
        }

        let mut sites = Vec::new();
        let mut seen_sites = BTreeSet::new();
        let mut booster_categories = Vec::new();
        let mut seen_boosters = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for rec in &records {
            if rec.site == ALL_SITES {
                bail!("launch site name '{ALL_SITES}' is reserved for the all-sites selection");
            }
            if seen_sites.insert(rec.site.as_str()) {
                sites.push(rec.site.clone());
            }
            if seen_boosters.insert(rec.booster_category.as_str()) {
                booster_categories.push(rec.booster_category.clone());
            }
            min = min.min(rec.payload_mass_kg);
            max = max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_range: PayloadRange { min, max },
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord::new(site, payload, outcome, booster).unwrap()
    }

    #[test]
    fn class_flag_parses_both_outcomes() {
        assert_eq!(Outcome::from_class(1).unwrap(), Outcome::Success);
        assert_eq!(Outcome::from_class(0).unwrap(), Outcome::Failure);
        assert!(Outcome::from_class(2).is_err());
    }

    #[test]
    fn record_rejects_negative_or_nan_payload() {
        assert!(LaunchRecord::new("A", -1.0, Outcome::Success, "FT").is_err());
        assert!(LaunchRecord::new("A", f64::NAN, Outcome::Success, "FT").is_err());
        assert!(LaunchRecord::new(" ", 10.0, Outcome::Success, "FT").is_err());
    }

    #[test]
    fn blank_booster_becomes_unknown() {
        let r = rec("A", 1.0, Outcome::Failure, "");
        assert_eq!(r.booster_category, UNKNOWN_BOOSTER);
    }

    #[test]
    fn dataset_indexes_sites_in_first_appearance_order() {
        let ds = LaunchDataset::from_records(vec![
            rec("KSC", 500.0, Outcome::Success, "FT"),
            rec("CCAFS", 2500.0, Outcome::Failure, "v1.1"),
            rec("KSC", 9600.0, Outcome::Success, "B5"),
        ])
        .unwrap();

        assert_eq!(ds.sites(), ["KSC", "CCAFS"]);
        assert_eq!(ds.booster_categories(), ["FT", "v1.1", "B5"]);
        assert_eq!(ds.payload_range(), PayloadRange { min: 500.0, max: 9600.0 });
        assert!(ds.has_site("CCAFS"));
        assert!(!ds.has_site("VAFB"));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(LaunchDataset::from_records(Vec::new()).is_err());
    }

    #[test]
    fn site_named_like_all_selector_is_rejected() {
        let err = LaunchDataset::from_records(vec![
            rec("A", 100.0, Outcome::Success, "FT"),
            rec("ALL", 200.0, Outcome::Failure, "FT"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("reserved"), "{err}");

        // Only the exact selector value is reserved.
        assert!(LaunchDataset::from_records(vec![rec("All", 1.0, Outcome::Success, "FT")]).is_ok());
    }
}
