//! Search backend capability and its Elasticsearch HTTP implementation.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Result, SearchError};

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResult<T> {
    pub hits: RawSearchResultHits<T>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub took: u64,
    pub aggregations: Option<BTreeMap<String, RawSearchResultAggregation>>,
}

impl<T> RawSearchResult<T> {
    pub fn total_hits(&self) -> u64 {
        self.hits.total.count()
    }

    pub fn aggregation(&self, name: &str) -> Option<&RawSearchResultAggregation> {
        self.aggregations.as_ref()?.get(name)
    }
}

impl RawSearchResult<serde_json::Value> {
    /// Decodes every hit's `_source` into `U`.
    pub fn decode_sources<U: DeserializeOwned>(self) -> Result<Vec<U>> {
        let mut sources = Vec::with_capacity(self.hits.hits.len());
        for hit in self.hits.hits {
            sources.push(serde_json::from_value(hit._source)?);
        }
        Ok(sources)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHits<T> {
    pub hits: Vec<RawSearchResultHit<T>>,
    pub total: RawTotalHits,
}

/// Older engines report a bare number, newer ones `{value, relation}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTotalHits {
    Count(u64),
    Object { value: u64 },
}

impl RawTotalHits {
    pub fn count(&self) -> u64 {
        match self {
            RawTotalHits::Count(count) => *count,
            RawTotalHits::Object { value } => *value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawSearchResultAggregation {
    pub doc_count: Option<u64>,
    pub value: Option<f64>,
    pub value_as_string: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHit<T> {
    #[serde(default)]
    pub _id: Option<String>,
    pub _source: T,
    pub _score: Option<f64>,
}

/// Executes a query body against a named index.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, index: &str, body: serde_json::Value) -> Result<RawSearchResult<serde_json::Value>>;
}

/// Pooled HTTP connection to an Elasticsearch cluster. Construct once and
/// share it; dropping the last handle closes the pool.
#[derive(Debug, Clone)]
pub struct ElasticSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl ElasticSearchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(SearchError::ClientConfig)?;
        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl SearchBackend for ElasticSearchClient {
    async fn search(&self, index: &str, body: serde_json::Value) -> Result<RawSearchResult<serde_json::Value>> {
        let t0 = std::time::Instant::now();
        let url = format!("{}/{}/_search", self.base_url, index);
        tracing::debug!(%index, body = %body, "search request");

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(%index, %status, "search backend rejected request");
            return Err(SearchError::Backend { status: status.as_u16(), body: response_txt });
        }
        let dt_ms = t0.elapsed().as_millis() as u64;
        let response: RawSearchResult<serde_json::Value> = serde_json::from_str(&response_txt)?;
        tracing::info!(%index, total = response.total_hits(), took_ms = dt_ms, "search response");
        Ok(response)
    }
}
