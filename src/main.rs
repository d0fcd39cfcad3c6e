//! Harvest Dashboard - Agent Performance Dashboard
//!
//! Loads the seed distribution / harvest spreadsheet once, then shows two
//! filterable chart pages: per FBA at `/` and per DAC at `/dac-performance`.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod pages;

use anyhow::{anyhow, Context};
use clap::Parser;
use config::Args;
use data::{DataCleaner, DataLoader};
use eframe::egui;
use gui::DashboardApp;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("harvest_dashboard={},warn", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(2);
    }

    // Load failures are fatal: there is nothing to show without the table
    let raw = DataLoader::new(args.load_options())
        .load(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    let (dataset, report) = DataCleaner::new(args.cleaning_policy())
        .clean(&raw)
        .with_context(|| format!("cleaning {}", args.path.display()))?;

    debug!(
        rows_read = report.rows_read,
        rows_dropped = report.rows_dropped,
        numeric_coerced = report.numeric_coerced,
        statuses_not_done = report.statuses_not_done,
        "cleaning absorbed data-quality issues"
    );
    if dataset.is_empty() {
        warn!(path = %args.path.display(), "no complete rows; charts will be empty");
    }
    info!(
        path = %args.path.display(),
        records = dataset.len(),
        "dataset ready"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Agent Performance Dashboard"),
        ..Default::default()
    };

    let default_selection = args.default_selection;
    let start_path = args.start_path.clone();

    eframe::run_native(
        "Agent Performance Dashboard",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DashboardApp::new(
                dataset,
                default_selection,
                &start_path,
            )))
        }),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
