//! Error types for the harvest pipeline.
//!
//! Transient lookup misses (no FDC id, no usable payload) are not errors: they are retried by
//! [`crate::harvest`] and end as a `GivenUp` outcome. Everything here aborts the run.

use std::path::PathBuf;

/// Failure talking to the FoodData Central API.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Failure reading the query list.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read input file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reading or appending to the CSV store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("store {path} has no 'Item' column")]
    MissingItemColumn { path: PathBuf },
}

/// Aggregate error returned by [`crate::harvest::run_pipeline`].
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
