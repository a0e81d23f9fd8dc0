//! `load_config`: builds a [`HarvestConfig`] from an optional YAML file plus the environment.
//!
//! The YAML file holds no secrets; every key is optional and falls back to the built-in default:
//!
//! ```yaml
//! input_path: food.txt
//! store_path: food_nutrients.csv
//! base_url: https://api.nal.usda.gov/fdc/v1
//! max_retries: 5
//! retry_delay_secs: 5
//! ```
//!
//! The API key is always injected from the `FDC_API_KEY` environment variable.
//!
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::HarvestConfig;

pub const API_KEY_VAR: &str = "FDC_API_KEY";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    input_path: Option<PathBuf>,
    #[serde(default)]
    store_path: Option<PathBuf>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    max_retries: Option<u32>,
    #[serde(default)]
    retry_delay_secs: Option<f64>,
}

/// Loads the YAML config at `path` (which must exist) and injects the API key from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HarvestConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let file_conf: FileConfig = if config_content.trim().is_empty() {
        FileConfig::default()
    } else {
        match serde_yaml::from_str(&config_content) {
            Ok(conf) => {
                info!(config_path = ?path_ref, "Parsed config YAML successfully");
                conf
            }
            Err(e) => {
                error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
                return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
            }
        }
    };

    build(file_conf)
}

/// Like [`load_config`], but a missing file means "use the defaults".
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<HarvestConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!(config_path = ?path_ref, "No config file found, using defaults");
        build(FileConfig::default())
    }
}

fn build(file_conf: FileConfig) -> Result<HarvestConfig> {
    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => {
            info!("{API_KEY_VAR} found in env");
            key
        }
        Ok(_) => {
            error!("{API_KEY_VAR} environment variable is empty");
            anyhow::bail!("{API_KEY_VAR} environment variable is empty");
        }
        Err(e) => {
            error!(error = ?e, "{API_KEY_VAR} environment variable not set");
            return Err(anyhow::anyhow!("{API_KEY_VAR} environment variable not set: {e}"));
        }
    };

    let mut config = HarvestConfig::with_api_key(api_key);
    if let Some(input_path) = file_conf.input_path {
        config.input_path = input_path;
    }
    if let Some(store_path) = file_conf.store_path {
        config.store_path = store_path;
    }
    if let Some(base_url) = file_conf.base_url {
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }
    if let Some(max_retries) = file_conf.max_retries {
        if max_retries == 0 {
            error!("max_retries must be at least 1");
            anyhow::bail!("Invalid config: max_retries must be at least 1");
        }
        config.max_retries = max_retries;
    }
    if let Some(secs) = file_conf.retry_delay_secs {
        config.retry_delay = Duration::try_from_secs_f64(secs).map_err(|e| {
            error!(error = ?e, retry_delay_secs = secs, "Invalid retry_delay_secs");
            anyhow::anyhow!("Invalid config: retry_delay_secs {secs}: {e}")
        })?;
    }

    config.trace_loaded();
    Ok(config)
}
