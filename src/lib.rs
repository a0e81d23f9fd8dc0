//! fdc-harvest: fetch nutrient data for a list of foods from USDA FoodData Central, skip the
//! ones already recorded, and append the rest to a CSV store.
//!
//! Pipeline entrypoint: [`harvest::run_pipeline`]. CLI entrypoint: [`cli::run`].

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod format;
pub mod harvest;
pub mod input;
pub mod load_config;
pub mod lookup;
pub mod payload;
pub mod report;
pub mod store;

pub use cli::{run, Cli};
