//! Entry point of the query compiler.

use std::sync::Arc;

use common::{region::Region, search_query::SearchQuery, search_result::SearchStrategy};
use serde_json::Value;

use crate::api::search::{boost_regions::get_boost_regions, search_es_query::compose_datasets_query};
use crate::config::IndexNames;
use crate::db_utils::elastic_utils::SearchBackend;
use crate::error::Result;

/// Compiles catalog queries and runs them on a shared search backend.
/// Holds no per-call state, so one instance serves concurrent callers.
pub struct SearchQueryer<B: ?Sized> {
    pub(crate) backend: Arc<B>,
    pub(crate) indices: IndexNames,
}

impl<B: SearchBackend + ?Sized> SearchQueryer<B> {
    pub fn new(backend: Arc<B>, indices: IndexNames) -> Self {
        Self { backend, indices }
    }

    pub async fn get_boost_regions(&self, free_text: Option<&str>) -> Result<Vec<Region>> {
        get_boost_regions(self.backend.as_ref(), &self.indices.regions, free_text).await
    }

    /// Resolves boost regions for `query`, then composes the dataset query.
    pub async fn build_datasets_query(&self, query: &SearchQuery, strategy: SearchStrategy) -> Result<Value> {
        let boost_regions = self.get_boost_regions(query.free_text.as_deref()).await?;
        Ok(compose_datasets_query(query, &boost_regions, strategy, &self.indices))
    }
}
