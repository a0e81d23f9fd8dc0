//! High-level pipeline: read query list → index store → fetch with retry → append.
//!
//! Each query term ends in exactly one of three states:
//!   - `Skipped`: already in the store (case-insensitive); no network calls are made
//!   - `Fetched`: a search + details pair returned a payload with a description
//!   - `GivenUp`: `max_retries` attempts failed; the item is left out of the output
//!
//! Items are processed strictly one after another. After every failed attempt the orchestrator
//! waits `retry_delay` through the [`Pause`] seam; it never waits after the successful attempt.
//!
//! Lookup misses are retried. Lookup *errors* (transport, undecodable JSON) abort the run, as do
//! input and store failures; the store is only written once, at the very end.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::HarvestConfig;
use crate::contract::{FoodLookup, Pause};
use crate::error::{HarvestError, LookupError};
use crate::format::{format_details, FormattedRecord};
use crate::input::read_query_terms;
use crate::store::{append_records, read_existing_items, ExistingIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl From<&HarvestConfig> for RetryPolicy {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.retry_delay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Fetched { attempts: u32 },
    Skipped,
    GivenUp { attempts: u32 },
}

/// What one run did.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Newly fetched records in processing order.
    pub records: Vec<(String, FormattedRecord)>,
    /// One entry per input term, in input order.
    pub outcomes: Vec<(String, ItemOutcome)>,
    /// Data rows appended to the store (set by [`run_pipeline`]).
    pub rows_written: usize,
}

impl HarvestReport {
    pub fn skipped(&self) -> Vec<&str> {
        self.items_where(|o| matches!(o, ItemOutcome::Skipped))
    }

    pub fn given_up(&self) -> Vec<&str> {
        self.items_where(|o| matches!(o, ItemOutcome::GivenUp { .. }))
    }

    fn items_where(&self, pred: impl Fn(&ItemOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| pred(outcome))
            .map(|(item, _)| item.as_str())
            .collect()
    }

    fn insert_record(&mut self, item: &str, record: FormattedRecord) {
        match self.records.iter().position(|(existing, _)| existing == item) {
            Some(index) => self.records[index].1 = record,
            None => self.records.push((item.to_owned(), record)),
        }
    }
}

/// Runs the retry loop for a single item.
///
/// Returns the record (`None` once the budget is exhausted) and the number of attempts used.
pub async fn fetch_item<L, P>(
    lookup: &L,
    pause: &P,
    policy: RetryPolicy,
    item: &str,
) -> Result<(Option<FormattedRecord>, u32), LookupError>
where
    L: FoodLookup,
    P: Pause,
{
    for attempt in 1..=policy.max_retries {
        match lookup.search(item).await? {
            Some(fdc_id) => match lookup.fetch_details(fdc_id).await? {
                Some(details) if details.description.is_some() => {
                    info!(item = item, fdc_id = %fdc_id, attempt, "Retrieved food details");
                    return Ok((Some(format_details(Some(&details))), attempt));
                }
                _ => {
                    warn!(
                        item = item,
                        fdc_id = %fdc_id,
                        attempt,
                        "Attempt {attempt}: Failed to retrieve valid data for '{item}'. Retrying..."
                    );
                }
            },
            None => {
                warn!(item = item, attempt, "Attempt {attempt}: No search match for '{item}'");
            }
        }
        pause.pause(policy.delay).await;
    }
    error!(
        item = item,
        attempts = policy.max_retries,
        "Failed to retrieve data for '{item}' after {} attempts.",
        policy.max_retries
    );
    Ok((None, policy.max_retries))
}

/// Processes every term against the index. Does not touch the store.
pub async fn harvest<L, P>(
    lookup: &L,
    pause: &P,
    policy: RetryPolicy,
    terms: &[String],
    index: &ExistingIndex,
) -> Result<HarvestReport, LookupError>
where
    L: FoodLookup,
    P: Pause,
{
    info!(items = terms.len(), indexed = index.len(), "[HARVEST] Starting");
    let mut report = HarvestReport::default();

    for item in terms {
        let outcome = if index.contains(item) {
            info!(item = %item, "'{item}' is already in the store. Skipping.");
            ItemOutcome::Skipped
        } else {
            match fetch_item(lookup, pause, policy, item).await? {
                (Some(record), attempts) => {
                    report.insert_record(item, record);
                    ItemOutcome::Fetched { attempts }
                }
                (None, attempts) => ItemOutcome::GivenUp { attempts },
            }
        };
        debug!(item = %item, ?outcome, "[HARVEST] Item finished");
        report.outcomes.push((item.clone(), outcome));
    }

    info!(
        fetched = report.records.len(),
        skipped = report.skipped().len(),
        given_up = report.given_up().len(),
        "[HARVEST] Complete"
    );
    Ok(report)
}

/// The whole run: input → index → harvest → append. Returns the report for printing.
pub async fn run_pipeline<L, P>(
    config: &HarvestConfig,
    lookup: &L,
    pause: &P,
) -> Result<HarvestReport, HarvestError>
where
    L: FoodLookup,
    P: Pause,
{
    let terms = read_query_terms(&config.input_path)?;
    let index = read_existing_items(&config.store_path)?;

    let mut report = harvest(lookup, pause, RetryPolicy::from(config), &terms, &index).await?;

    report.rows_written = append_records(&config.store_path, &report.records)?;
    Ok(report)
}
