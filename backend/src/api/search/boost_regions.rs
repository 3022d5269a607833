//! Finds the regions named in free text.

use common::{region::Region, search_const::BOOST_REGION_CANDIDATES};
use serde_json::json;

use crate::db_utils::elastic_utils::SearchBackend;
use crate::error::Result;

/// Regions whose searchable id matches any word of `free_text`, in the
/// engine's relevance order. Empty text never reaches the backend.
pub async fn get_boost_regions<B: SearchBackend + ?Sized>(backend: &B, regions_index: &str, free_text: Option<&str>) -> Result<Vec<Region>> {
    let Some(free_text) = free_text.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(Vec::new());
    };

    let body = json!({
        "query": {
            "match": {
                "regionSearchId": {
                    "query": free_text,
                    "operator": "or",
                }
            }
        },
        "size": BOOST_REGION_CANDIDATES,
    });
    let response = backend.search(regions_index, body).await?;
    let regions = response.decode_sources::<Region>()?;
    tracing::debug!(count = regions.len(), "resolved boost regions");
    Ok(regions)
}
