use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use common::{
    search_const::{DEFAULT_FACET_SIZE, DEFAULT_LIMIT, DEFAULT_START},
    search_query::SearchQuery,
    search_result::{FacetSearchResult, SearchResult},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::search::{SearchQueryer, facet_definition::parse_facet_type};
use crate::db_utils::elastic_utils::SearchBackend;
use crate::error::SearchError;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetSearchRequest {
    pub query: SearchQuery,
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub facet_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetOptionsRequest {
    pub query: SearchQuery,
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub facet_query: Option<String>,
}

async fn _search_datasets<B: SearchBackend + ?Sized>(queryer: &SearchQueryer<B>, request: DatasetSearchRequest) -> Result<SearchResult, SearchError> {
    queryer
        .search(
            request.query,
            request.start.unwrap_or(DEFAULT_START),
            request.limit.unwrap_or(DEFAULT_LIMIT),
            request.facet_size.unwrap_or(DEFAULT_FACET_SIZE),
        )
        .await
}

pub async fn search_datasets<B: SearchBackend + ?Sized + 'static>(
    State(queryer): State<Arc<SearchQueryer<B>>>,
    Json(request): Json<DatasetSearchRequest>,
) -> Response {
    match _search_datasets(&queryer, request).await {
        Ok(result) => {
            info!("search_datasets: {} hits ({})", result.hit_count, result.strategy.as_str());
            Json(result).into_response()
        }
        Err(e) => error_response("search_datasets", e),
    }
}

async fn _search_facet_options<B: SearchBackend + ?Sized>(
    queryer: &SearchQueryer<B>,
    facet_type: &str,
    request: FacetOptionsRequest,
) -> Result<FacetSearchResult, SearchError> {
    let facet_type = parse_facet_type(facet_type)?;
    queryer
        .search_facets(
            facet_type,
            request.query,
            request.start.unwrap_or(DEFAULT_START),
            request.limit.unwrap_or(DEFAULT_LIMIT),
            request.facet_query.as_deref(),
        )
        .await
}

pub async fn search_facet_options<B: SearchBackend + ?Sized + 'static>(
    State(queryer): State<Arc<SearchQueryer<B>>>,
    Path(facet_type): Path<String>,
    Json(request): Json<FacetOptionsRequest>,
) -> Response {
    match _search_facet_options(&queryer, &facet_type, request).await {
        Ok(result) => {
            info!("search_facet_options: {} options for {}", result.options.len(), facet_type);
            Json(result).into_response()
        }
        Err(e) => error_response("search_facet_options", e),
    }
}

fn error_response(route: &str, e: SearchError) -> Response {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::error!("{route}: request failed: {:#?}", e);
    } else {
        tracing::warn!("{route}: rejected request: {e}");
    }
    (status, Json(json!({ "error": e.public_message() }))).into_response()
}
