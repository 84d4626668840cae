mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod figure;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use callbacks::CallbackRegistry;
use clap::Parser;
use config::DashConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::from(config::Args::parse());

    let dataset = data::loader::load_csv(&config.dataset_path)?;
    log::info!(
        "Loaded {} launches from {} sites, payload {}–{} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    let registry = CallbackRegistry::dashboard().context("wiring chart callbacks")?;
    log::info!("Registered {} chart callbacks", registry.len());
    let dataset = Arc::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset, registry, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
