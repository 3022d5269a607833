//! Dataset search with strategy fallback.

use chrono::{DateTime, Utc};
use common::{
    region::Region,
    search_query::SearchQuery,
    search_result::{PeriodEndPoint, SearchResult, SearchStrategy, Temporal},
};
use serde_json::{Value, json};

use crate::api::search::queryer::SearchQueryer;
use crate::api::search::search_es_query::{TEMPORAL_END_FIELD, TEMPORAL_START_FIELD, compose_datasets_query};
use crate::db_utils::elastic_utils::{RawSearchResult, RawSearchResultAggregation, SearchBackend};
use crate::error::Result;

const EARLIEST_START_AGG: &str = "earliest_start";
const LATEST_END_AGG: &str = "latest_end";

impl<B: SearchBackend + ?Sized> SearchQueryer<B> {
    /// Runs the primary dataset search. A strict match that finds nothing
    /// for multi-word text is retried once with the relaxed strategy.
    pub async fn search(&self, query: SearchQuery, start: usize, limit: usize, facet_size: usize) -> Result<SearchResult> {
        tracing::info!(free_text = ?query.free_text, start, limit, facet_size, "dataset search");
        let boost_regions = self.get_boost_regions(query.free_text.as_deref()).await?;

        let mut strategy = SearchStrategy::MatchAll;
        let mut response = self.run_datasets_search(&query, &boost_regions, strategy, start, limit).await?;

        if response.total_hits() == 0 && has_multiple_terms(&query) {
            tracing::info!("no strict matches, retrying with {}", SearchStrategy::MatchPart.as_str());
            strategy = SearchStrategy::MatchPart;
            response = self.run_datasets_search(&query, &boost_regions, strategy, start, limit).await?;
        }

        let temporal = Temporal {
            start: response.aggregation(EARLIEST_START_AGG).and_then(aggregation_date).map(PeriodEndPoint::new),
            end: response.aggregation(LATEST_END_AGG).and_then(aggregation_date).map(PeriodEndPoint::new),
        };
        let hit_count = response.total_hits();
        let datasets = response
            .hits
            .hits
            .into_iter()
            .map(|hit| with_score(hit._source, hit._score))
            .collect::<Vec<_>>();

        Ok(SearchResult {
            query,
            hit_count,
            datasets,
            facets: Vec::new(),
            strategy,
            temporal,
        })
    }

    async fn run_datasets_search(
        &self,
        query: &SearchQuery,
        boost_regions: &[Region],
        strategy: SearchStrategy,
        start: usize,
        limit: usize,
    ) -> Result<RawSearchResult<Value>> {
        let body = datasets_search_body(compose_datasets_query(query, boost_regions, strategy, &self.indices), start, limit);
        self.backend.search(&self.indices.datasets, body).await
    }
}

fn datasets_search_body(datasets_query: Value, start: usize, limit: usize) -> Value {
    json!({
        "query": datasets_query,
        "from": start,
        "size": limit,
        "track_total_hits": true,
        "aggs": {
            EARLIEST_START_AGG: { "min": { "field": TEMPORAL_START_FIELD } },
            LATEST_END_AGG: { "max": { "field": TEMPORAL_END_FIELD } },
        },
    })
}

fn has_multiple_terms(query: &SearchQuery) -> bool {
    query.trimmed_free_text().is_some_and(|text| text.split_whitespace().nth(1).is_some())
}

fn with_score(mut source: Value, score: Option<f64>) -> Value {
    if let Value::Object(fields) = &mut source {
        fields.insert("score".to_string(), json!(score));
    }
    source
}

/// Date aggregations report epoch milliseconds, `None` when nothing matched.
fn aggregation_date(aggregation: &RawSearchResultAggregation) -> Option<DateTime<Utc>> {
    if let Some(millis) = aggregation.value {
        return DateTime::from_timestamp_millis(millis as i64);
    }
    let text = aggregation.value_as_string.as_deref()?;
    DateTime::parse_from_rfc3339(text).ok().map(|date| date.with_timezone(&Utc))
}
