use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::HarvestConfig;
use crate::contract::FoodLookup;
use crate::error::LookupError;
use crate::payload::{FdcId, FoodDetails, SearchResponse};

/// FoodData Central REST client.
///
/// Holds only the HTTP client, base URL and API key; no state is kept between calls.
pub struct FdcClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FdcClient {
    pub fn new(config: &HarvestConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent(concat!("fdc-harvest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, LookupError> {
        self.client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Transport {
                url: url.to_owned(),
                source: e.without_url(),
            })
    }

    /// Decodes a success response; any other status yields `Ok(None)`.
    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<Option<T>, LookupError> {
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "FDC API returned non-success status");
            return Ok(None);
        }
        response.json::<T>().await.map(Some).map_err(|e| LookupError::Decode {
            url: url.to_owned(),
            source: e.without_url(),
        })
    }
}

#[async_trait]
impl FoodLookup for FdcClient {
    async fn search(&self, term: &str) -> Result<Option<FdcId>, LookupError> {
        let url = format!("{}/foods/search", self.base_url);
        debug!(url = %url, term = term, "Searching FDC");
        let response = self.get(&url, &[("query", term)]).await?;
        let Some(body) = Self::decode::<SearchResponse>(&url, response).await? else {
            return Ok(None);
        };
        let id = body.first_id();
        match (id, body.first_hit()) {
            (Some(id), Some(hit)) => info!(
                term = term,
                fdc_id = %id,
                description = hit.description.as_deref().unwrap_or_default(),
                "Search matched"
            ),
            (None, Some(_)) => warn!(term = term, "First search hit has no fdcId"),
            _ => info!(term = term, "Search returned no foods"),
        }
        Ok(id)
    }

    async fn fetch_details(&self, id: FdcId) -> Result<Option<FoodDetails>, LookupError> {
        let url = format!("{}/food/{}", self.base_url, id);
        debug!(url = %url, "Fetching FDC food details");
        let response = self.get(&url, &[]).await?;
        Self::decode::<FoodDetails>(&url, response).await
    }
}
