/// Data layer: launch records, CSV loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  spacex_launch_dash.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV rows → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, payload bounds, sites
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates, per-site aggregation
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
