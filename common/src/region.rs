//! Geographic regions as stored in the region index.

use serde::{Deserialize, Serialize};

/// A region document. The geometry is never materialized here; queries
/// reference it through the document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Region {
    pub region_type: String,
    pub region_id: String,
    pub region_search_id: String,
    pub region_name: Option<String>,
    pub region_short_name: Option<String>,
}

impl Region {
    pub fn document_id(&self) -> String {
        format!("{}/{}", self.region_type, self.region_id)
    }

    /// Display name and short name, skipping empty ones.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [self.region_name.as_deref(), self.region_short_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|name| !name.trim().is_empty())
    }
}
