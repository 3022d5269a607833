//! Facet option search and count merging.

use std::collections::HashSet;

use common::{
    facet::FacetType,
    search_query::SearchQuery,
    search_result::{FacetOption, FacetSearchResult, SearchStrategy},
};
use serde_json::{Map, Value, json};

use crate::api::search::facet_definition::{FacetCandidate, facet_definition};
use crate::api::search::queryer::SearchQueryer;
use crate::db_utils::elastic_utils::{RawSearchResult, SearchBackend};
use crate::error::Result;

impl<B: SearchBackend + ?Sized> SearchQueryer<B> {
    /// Finds facet values matching `facet_query` and counts the datasets each
    /// would select, holding every other active filter fixed.
    pub async fn search_facets(
        &self,
        facet_type: FacetType,
        general_query: SearchQuery,
        start: usize,
        limit: usize,
        facet_query: Option<&str>,
    ) -> Result<FacetSearchResult> {
        let facet_def = facet_definition(facet_type);
        let facet_query = facet_query.unwrap_or("");

        // counts reorder candidates, so fetch the whole requested window from the top
        let candidates_body = json!({
            "query": facet_def.candidate_query(facet_query),
            "from": 0,
            "size": start.saturating_add(limit),
        });
        let candidates_response = self.backend.search(facet_def.candidate_index(&self.indices), candidates_body).await?;
        if candidates_response.total_hits() == 0 {
            tracing::info!(%facet_type, facet_query, "no facet candidates");
            return Ok(FacetSearchResult::default());
        }

        let candidates = candidates_response
            .hits
            .hits
            .into_iter()
            .map(|hit| facet_def.candidate_from_source(hit._source))
            .collect::<Result<Vec<_>>>()?;

        let aggregations = build_count_aggregations(&candidates, |value| facet_def.exact_match_query(value, &self.indices));

        // remove all filters on the current facet, as we don't want to count as-if already narrowed
        let query_without_facet = facet_def.remove_from_query(&general_query);
        let datasets_query = self.build_datasets_query(&query_without_facet, SearchStrategy::MatchAll).await?;
        let counts_body = facet_counts_body(datasets_query, aggregations.body);
        let counts_response = self.backend.search(&self.indices.datasets, counts_body).await?;

        let options = rank_facet_options(&candidates, &aggregations.names, &counts_response, facet_query);
        let options = options.into_iter().skip(start).take(limit).collect::<Vec<_>>();
        tracing::info!(%facet_type, facet_query, options = options.len(), "facet search");

        Ok(FacetSearchResult { hit_count: counts_response.total_hits(), options })
    }
}

/// Size-0 dataset search carrying the count aggregations. Totals are tracked
/// exactly so the reported hit count is never capped by the engine.
fn facet_counts_body(datasets_query: Value, aggregations: Map<String, Value>) -> Value {
    json!({
        "query": datasets_query,
        "from": 0,
        "size": 0,
        "track_total_hits": true,
        "aggs": Value::Object(aggregations),
    })
}

struct CountAggregations {
    body: Map<String, Value>,
    /// Aggregation name per distinct candidate value.
    names: Vec<(String, String)>,
}

/// One filter aggregation per distinct candidate value. Values are not used
/// as names since the engine restricts the characters names may contain.
fn build_count_aggregations(candidates: &[FacetCandidate], exact_match_query: impl Fn(&str) -> Value) -> CountAggregations {
    let mut body = Map::new();
    let mut names = Vec::new();
    let mut present_values = HashSet::new();
    for candidate in candidates {
        if !present_values.insert(candidate.value.as_str()) {
            continue;
        }
        let name = format!("facet_{}", names.len());
        body.insert(name.clone(), json!({ "filter": exact_match_query(&candidate.value) }));
        names.push((candidate.value.clone(), name));
    }
    CountAggregations { body, names }
}

/// Candidates with their counts, most hits first; ties keep candidate order.
fn rank_facet_options(
    candidates: &[FacetCandidate],
    names: &[(String, String)],
    counts: &RawSearchResult<Value>,
    facet_query: &str,
) -> Vec<FacetOption> {
    let hit_count_of = |value: &str| {
        names
            .iter()
            .find(|(candidate_value, _)| candidate_value == value)
            .and_then(|(_, name)| counts.aggregation(name))
            .and_then(|aggregation| aggregation.doc_count)
            .unwrap_or(0)
    };

    let mut options = candidates
        .iter()
        .map(|candidate| FacetOption {
            value: candidate.value.clone(),
            identifier: candidate.identifier.clone(),
            hit_count: hit_count_of(&candidate.value),
            matched: !facet_query.is_empty() && candidate.value.eq_ignore_ascii_case(facet_query.trim()),
            count_error_upper_bound: 0,
        })
        .collect::<Vec<_>>();
    options.sort_by_key(|option| u64::MAX - option.hit_count);
    options
}
