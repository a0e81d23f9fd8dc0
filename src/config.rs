use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_INPUT_PATH: &str = "food.txt";
pub const DEFAULT_STORE_PATH: &str = "food_nutrients.csv";
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Everything a harvest run needs, built once at startup and passed down explicitly.
#[derive(Clone)]
pub struct HarvestConfig {
    pub api_key: String,
    pub base_url: String,
    pub input_path: PathBuf,
    pub store_path: PathBuf,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl HarvestConfig {
    /// Config with all defaults and the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            input_path = %self.input_path.display(),
            store_path = %self.store_path.display(),
            base_url = %self.base_url,
            max_retries = self.max_retries,
            retry_delay_ms = self.retry_delay.as_millis() as u64,
            "Loaded HarvestConfig"
        );
        debug!(?self, "HarvestConfig loaded (full debug)");
    }
}

// Hand-written so the API key never reaches a log line.
impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("input_path", &self.input_path)
            .field("store_path", &self.store_path)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}
