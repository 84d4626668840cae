use std::path::PathBuf;

use clap::Parser;

/// Dataset read when no path is given on the command line.
pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

/// Command line of the dashboard.
#[derive(Debug, Parser)]
#[command(name = "launch-dash", version, about = "Launch records dashboard")]
pub struct Args {
    /// CSV with `Launch Site`, `Payload Mass (kg)`, `Booster Version Category` and `class` columns
    #[arg(default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub dataset_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Payload slider increment in kg; `None` lets the slider move freely.
    pub slider_step: Option<f64>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_size: [1000.0, 900.0],
            min_window_size: [600.0, 500.0],
            slider_step: Some(100.0),
        }
    }
}

impl From<Args> for DashConfig {
    fn from(args: Args) -> Self {
        Self {
            dataset_path: args.dataset,
            ..Self::default()
        }
    }
}
