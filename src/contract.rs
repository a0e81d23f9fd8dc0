//! # contract: seams between the harvest pipeline and the outside world
//!
//! The orchestrator in [`crate::harvest`] only talks to the network and the clock through the
//! traits below, so tests can substitute deterministic mocks.
//!
//! - [`FoodLookup`]: the two FoodData Central calls (search, details). Implemented by
//!   [`crate::lookup::FdcClient`].
//! - [`Pause`]: the fixed delay between retry attempts. Implemented by [`TokioPause`].
//!
//! Both traits are annotated for `mockall`; the generated `MockFoodLookup` and `MockPause` are
//! exported under the default `test-export-mocks` feature for integration tests.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::LookupError;
use crate::payload::{FdcId, FoodDetails};

/// Remote lookup of food items.
///
/// `Ok(None)` means the service answered but had nothing usable (non-success status, no hits).
/// `Err` is reserved for failures that should abort the run.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait FoodLookup: Send + Sync {
    /// Free-text search; returns the first hit's identifier.
    async fn search(&self, term: &str) -> Result<Option<FdcId>, LookupError>;

    /// Full details for one identifier.
    async fn fetch_details(&self, id: FdcId) -> Result<Option<FoodDetails>, LookupError>;
}

/// Delay applied after a failed attempt.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer. The current item waits; nothing else runs meanwhile.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
