//! Per-facet query strategies.

use common::{facet::FacetType, region::Region, search_query::SearchQuery};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::search::search_es_query::region_geo_shape_query;
use crate::config::IndexNames;
use crate::error::{Result, SearchError};

/// A row of a facet index offered as a facet option.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacetCandidate {
    pub value: String,
    #[serde(default)]
    pub identifier: Option<String>,
}

pub trait FacetDefinition: Send + Sync {
    fn facet_type(&self) -> FacetType;

    /// Index holding this facet's candidate values.
    fn candidate_index<'a>(&self, indices: &'a IndexNames) -> &'a str;

    /// Fields the typed facet text is prefix-matched against.
    fn candidate_fields(&self) -> &'static [&'static str];

    fn candidate_from_source(&self, source: Value) -> Result<FacetCandidate> {
        Ok(serde_json::from_value(source)?)
    }

    /// Matches datasets that would be kept if `value` were selected.
    fn exact_match_query(&self, value: &str, indices: &IndexNames) -> Value;

    /// Copy of `query` without this facet's own filter.
    fn remove_from_query(&self, query: &SearchQuery) -> SearchQuery;

    /// Best of a phrase-prefix match per candidate field; blank text matches every row.
    fn candidate_query(&self, facet_query: &str) -> Value {
        if facet_query.trim().is_empty() {
            return json!({ "match_all": {} });
        }
        let queries = self
            .candidate_fields()
            .iter()
            .map(|field| json!({ "match_phrase_prefix": { *field: facet_query } }))
            .collect::<Vec<_>>();
        json!({ "dis_max": { "tie_breaker": 0, "queries": queries } })
    }
}

pub struct PublisherFacet;

impl FacetDefinition for PublisherFacet {
    fn facet_type(&self) -> FacetType {
        FacetType::Publisher
    }

    fn candidate_index<'a>(&self, indices: &'a IndexNames) -> &'a str {
        &indices.publishers
    }

    fn candidate_fields(&self) -> &'static [&'static str] {
        &["value", "acronym"]
    }

    fn exact_match_query(&self, value: &str, _indices: &IndexNames) -> Value {
        json!({ "term": { "publisher.name.keyword": value } })
    }

    fn remove_from_query(&self, query: &SearchQuery) -> SearchQuery {
        SearchQuery { publishers: Default::default(), ..query.clone() }
    }
}

pub struct FormatFacet;

impl FacetDefinition for FormatFacet {
    fn facet_type(&self) -> FacetType {
        FacetType::Format
    }

    fn candidate_index<'a>(&self, indices: &'a IndexNames) -> &'a str {
        &indices.formats
    }

    fn candidate_fields(&self) -> &'static [&'static str] {
        &["value", "acronym"]
    }

    fn exact_match_query(&self, value: &str, _indices: &IndexNames) -> Value {
        json!({
            "nested": {
                "path": "distributions",
                "query": { "term": { "distributions.format.keyword": value } },
            }
        })
    }

    fn remove_from_query(&self, query: &SearchQuery) -> SearchQuery {
        SearchQuery { formats: Default::default(), ..query.clone() }
    }
}

/// Region options are keyed by region document id (`"{type}/{id}"`).
pub struct RegionFacet;

impl FacetDefinition for RegionFacet {
    fn facet_type(&self) -> FacetType {
        FacetType::Region
    }

    fn candidate_index<'a>(&self, indices: &'a IndexNames) -> &'a str {
        &indices.regions
    }

    fn candidate_fields(&self) -> &'static [&'static str] {
        &["regionName", "regionShortName"]
    }

    fn candidate_from_source(&self, source: Value) -> Result<FacetCandidate> {
        let region: Region = serde_json::from_value(source)?;
        Ok(FacetCandidate { value: region.document_id(), identifier: region.region_name })
    }

    fn exact_match_query(&self, value: &str, indices: &IndexNames) -> Value {
        region_geo_shape_query(value, indices)
    }

    fn remove_from_query(&self, query: &SearchQuery) -> SearchQuery {
        SearchQuery { regions: Vec::new(), ..query.clone() }
    }
}

static PUBLISHER_FACET: PublisherFacet = PublisherFacet;
static FORMAT_FACET: FormatFacet = FormatFacet;
static REGION_FACET: RegionFacet = RegionFacet;

pub fn facet_definition(facet_type: FacetType) -> &'static dyn FacetDefinition {
    match facet_type {
        FacetType::Publisher => &PUBLISHER_FACET,
        FacetType::Format => &FORMAT_FACET,
        FacetType::Region => &REGION_FACET,
    }
}

/// Resolves a facet type by its API name.
pub fn parse_facet_type(name: &str) -> Result<FacetType> {
    FacetType::parse(name).ok_or_else(|| SearchError::UnknownFacetType(name.to_string()))
}
