//! HTTP routes of the search service.

use std::sync::Arc;

use axum::{Router, routing::{get, post}};

use crate::api::search::SearchQueryer;
use crate::db_utils::elastic_utils::SearchBackend;

pub mod search_routes;

pub fn router<B: SearchBackend + ?Sized + 'static>(queryer: Arc<SearchQueryer<B>>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/datasets", post(search_routes::search_datasets::<B>))
        .route("/facets/{facet_type}/options", post(search_routes::search_facet_options::<B>))
        .with_state(queryer)
}
