use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no launch records")]
    Empty,
    #[error("outcome class must be 0 or 1, got {0}")]
    InvalidOutcome(i64),
    #[error("payload mass must be a non-negative number, got {0}")]
    InvalidPayload(f64),
}

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome: class 1 is a success, class 0 a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DatasetError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DatasetError::InvalidOutcome(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single historical launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Result<Self, DatasetError> {
        if !payload_kg.is_finite() || payload_kg < 0.0 {
            return Err(DatasetError::InvalidPayload(payload_kg));
        }
        Ok(Self {
            site: site.into(),
            payload_kg,
            booster_category: booster_category.into(),
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Dropdown value of the synthetic "All Sites" option.
pub const ALL_SITES_VALUE: &str = "ALL";
pub const ALL_SITES_LABEL: &str = "All Sites";

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// The currently chosen dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value. Anything other than `"ALL"` names a site,
    /// known to the dataset or not.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_VALUE,
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether a record launched from a site passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All launch records plus the statistics derived from them at load time.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_kg);
            max_payload = max_payload.max(rec.payload_kg);
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        Ok(Self {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Dropdown options: "All Sites" first, then one per distinct site.
    pub fn site_options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES_VALUE.to_string(),
        })
        .chain(self.sites.iter().map(|s| SiteOption {
            label: s.clone(),
            value: s.clone(),
        }))
        .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn rec(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord::new(site, payload, booster, Outcome::try_from(class).unwrap()).unwrap()
    }

    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 0.0, "v1.0", 0),
            rec("CCAFS LC-40", 525.0, "v1.0", 0),
            rec("VAFB SLC-4E", 500.0, "v1.1", 0),
            rec("KSC LC-39A", 2490.0, "FT", 1),
            rec("CCAFS LC-40", 3136.0, "FT", 1),
            rec("KSC LC-39A", 5300.0, "FT", 1),
            rec("VAFB SLC-4E", 9600.0, "FT", 1),
            rec("CCAFS SLC-40", 3681.0, "B4", 1),
            rec("CCAFS SLC-40", 6460.0, "B4", 0),
            rec("KSC LC-39A", 9600.0, "B5", 1),
        ])
        .unwrap()
    }

    #[test]
    fn derives_payload_bounds_and_sites() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 10);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(
            ds.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(ds.booster_categories().len(), 5);
    }

    #[test]
    fn site_options_start_with_all_sites() {
        let options = sample_dataset().site_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(options[0].value, "ALL");
        assert_eq!(options[1].label, "CCAFS LC-40");
        assert_eq!(options[1].value, "CCAFS LC-40");
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(
            LaunchDataset::from_records(Vec::new()).unwrap_err(),
            DatasetError::Empty
        );
    }

    #[test]
    fn outcome_class_must_be_binary() {
        assert_eq!(Outcome::try_from(1).unwrap(), Outcome::Success);
        assert_eq!(Outcome::try_from(0).unwrap(), Outcome::Failure);
        assert_eq!(
            Outcome::try_from(2).unwrap_err(),
            DatasetError::InvalidOutcome(2)
        );
    }

    #[test]
    fn negative_or_nan_payload_is_rejected() {
        assert!(LaunchRecord::new("A", -1.0, "FT", Outcome::Success).is_err());
        assert!(LaunchRecord::new("A", f64::NAN, "FT", Outcome::Success).is_err());
    }

    #[test]
    fn selection_round_trips_dropdown_values() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        let site = SiteSelection::from_value("KSC LC-39A");
        assert_eq!(site.value(), "KSC LC-39A");
        assert!(site.matches("KSC LC-39A"));
        assert!(!site.matches("VAFB SLC-4E"));
        assert!(SiteSelection::All.matches("anything"));
    }
}
