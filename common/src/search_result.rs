//! Search responses returned to API callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search_query::SearchQuery;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: SearchQuery,
    pub hit_count: u64,
    /// Raw dataset documents with the engine's `score` added.
    pub datasets: Vec<serde_json::Value>,
    pub facets: Vec<FacetSearchResult>,
    pub strategy: SearchStrategy,
    pub temporal: Temporal,
}

/// How strictly the free text terms were matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SearchStrategy {
    /// Every term must be found.
    #[default]
    #[serde(rename = "match-all")]
    MatchAll,
    /// A relaxed match used when the strict one finds nothing.
    #[serde(rename = "match-part")]
    MatchPart,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::MatchAll => "match-all",
            SearchStrategy::MatchPart => "match-part",
        }
    }
}

/// Time span covered by the matching datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Temporal {
    pub start: Option<PeriodEndPoint>,
    pub end: Option<PeriodEndPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEndPoint {
    pub date: DateTime<Utc>,
    pub text: String,
}

impl PeriodEndPoint {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self { date, text: date.format("%Y-%m-%d").to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchResult {
    pub hit_count: u64,
    pub options: Vec<FacetOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub hit_count: u64,
    pub matched: bool,
    /// Counts are exact, so this is always 0.
    pub count_error_upper_bound: u64,
}
