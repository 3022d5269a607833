//! Shared search query models and helpers.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    pub free_text: Option<String>,
    pub regions: Vec<QueryRegion>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub publishers: BTreeSet<String>,
    pub formats: BTreeSet<String>,
}

impl SearchQuery {
    pub fn with_free_text(text: impl Into<String>) -> Self {
        Self { free_text: Some(text.into()), ..Default::default() }
    }

    /// Free text with surrounding whitespace removed, `None` when nothing is left.
    pub fn trimmed_free_text(&self) -> Option<&str> {
        self.free_text.as_deref().map(str::trim).filter(|text| !text.is_empty())
    }
}

/// A region the caller explicitly filters by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Hash, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct QueryRegion {
    pub region_type: String,
    pub region_id: String,
}

impl QueryRegion {
    pub fn new(region_type: impl Into<String>, region_id: impl Into<String>) -> Self {
        Self { region_type: region_type.into(), region_id: region_id.into() }
    }

    /// Id of the region document holding the geometry.
    pub fn document_id(&self) -> String {
        format!("{}/{}", self.region_type, self.region_id)
    }
}
