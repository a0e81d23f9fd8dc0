//! CLI glue for fdc-harvest: argument parsing and the async `run` entrypoint.
//!
//! The binary needs no arguments. `--config` only overrides where the optional YAML file lives;
//! the API key always comes from `FDC_API_KEY`.
//!
//! [`run`] returns a typed `Result`; turning a failure into an exit code is left to `main`.
use crate::config::HarvestConfig;
use crate::contract::TokioPause;
use crate::harvest::{run_pipeline, HarvestReport};
use crate::load_config::{load_config, load_config_or_default};
use crate::lookup::FdcClient;
use crate::report::print_summary;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "fdc-harvest.yaml";

/// Fetch FoodData Central nutrient data for a list of foods and append new ones to a CSV store.
#[derive(Parser, Debug)]
#[clap(
    name = "fdc-harvest",
    version,
    about = "Fetch FoodData Central nutrient data for a list of foods and append new records to a CSV store"
)]
pub struct Cli {
    /// Path to the YAML config file (default: fdc-harvest.yaml, optional)
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<HarvestReport> {
    tracing::info!("trace_initialised");

    let config = match cli.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(DEFAULT_CONFIG_PATH)?,
    };
    run_with_config(&config).await
}

/// Runs the pipeline against the real FDC API and prints the summary of new records.
pub async fn run_with_config(config: &HarvestConfig) -> Result<HarvestReport> {
    let client = FdcClient::new(config)?;
    match run_pipeline(config, &client, &TokioPause).await {
        Ok(report) => {
            tracing::info!(
                fetched = report.records.len(),
                rows_written = report.rows_written,
                "Harvest complete"
            );
            print_summary(&report.records);
            Ok(report)
        }
        Err(e) => {
            tracing::error!(error = ?e, "Harvest failed");
            Err(e.into())
        }
    }
}
