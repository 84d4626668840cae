use std::collections::BTreeMap;

use super::model::{LaunchDataset, LaunchRecord, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Payload range: closed interval in kilograms
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]`; `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The full payload span of a dataset.
    pub fn full(dataset: &LaunchDataset) -> Self {
        Self::new(dataset.min_payload(), dataset.max_payload())
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        payload_kg >= self.low && payload_kg <= self.high
    }

    /// Keep both bounds within `[min, max]`.
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        Self::new(self.low.clamp(min, max), self.high.clamp(min, max))
    }
}

// ---------------------------------------------------------------------------
// Row selection and aggregation
// ---------------------------------------------------------------------------

/// Records launched from the selected site(s).
pub fn records_for_site<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |r| site.matches(&r.site))
}

/// Records matching the site selection whose payload lies inside `range`.
pub fn filtered_records<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    records_for_site(dataset, site).filter(move |r| range.contains(r.payload_kg))
}

/// Number of successful launches per site, keyed (and so sorted) by site name.
/// Sites without any success are present with a count of zero.
pub fn successes_by_site(dataset: &LaunchDataset) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in dataset.records() {
        *counts.entry(rec.site.clone()).or_default() += rec.outcome.class() as usize;
    }
    counts
}

/// How often each outcome occurs among the records of one selection.
/// Outcomes that never occur are absent.
pub fn outcome_counts(dataset: &LaunchDataset, site: &SiteSelection) -> BTreeMap<Outcome, usize> {
    let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
    for rec in records_for_site(dataset, site) {
        *counts.entry(rec.outcome).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn range_orders_bounds_and_is_inclusive() {
        let r = PayloadRange::new(5000.0, 1000.0);
        assert_eq!(r.low(), 1000.0);
        assert_eq!(r.high(), 5000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(5000.0));
        assert!(!r.contains(999.9));
        assert!(!r.contains(5000.1));
    }

    #[test]
    fn clamp_keeps_bounds_inside_dataset_span() {
        let r = PayloadRange::new(-100.0, 20_000.0).clamp_to(0.0, 9600.0);
        assert_eq!(r, PayloadRange::new(0.0, 9600.0));

        let above = PayloadRange::new(12_000.0, 15_000.0).clamp_to(0.0, 9600.0);
        assert_eq!(above.low(), 9600.0);
        assert_eq!(above.high(), 9600.0);
    }

    #[test]
    fn filtered_records_respect_site_and_range() {
        let ds = sample_dataset();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let range = PayloadRange::new(2490.0, 5300.0);
        let hits: Vec<_> = filtered_records(&ds, &site, range).collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.site == "KSC LC-39A"));

        let all: Vec<_> = filtered_records(&ds, &SiteSelection::All, range).collect();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn successes_are_summed_per_site() {
        let counts = successes_by_site(&sample_dataset());
        assert_eq!(counts["KSC LC-39A"], 3);
        assert_eq!(counts["CCAFS LC-40"], 1);
        assert_eq!(counts["CCAFS SLC-40"], 1);
        assert_eq!(counts["VAFB SLC-4E"], 1);
        assert_eq!(
            counts.keys().map(String::as_str).collect::<Vec<_>>(),
            ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
    }

    #[test]
    fn outcome_counts_omit_absent_outcomes() {
        let ds = sample_dataset();
        let counts = outcome_counts(&ds, &SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(counts.get(&Outcome::Success), Some(&3));
        assert_eq!(counts.get(&Outcome::Failure), None);
    }
}
