//! Facet kinds exposed by the search API.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetType {
    Publisher,
    Format,
    Region,
}

impl FacetType {
    pub const ALL: [FacetType; 3] = [FacetType::Publisher, FacetType::Format, FacetType::Region];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetType::Publisher => "publisher",
            FacetType::Format => "format",
            FacetType::Region => "region",
        }
    }

    pub fn parse(name: &str) -> Option<FacetType> {
        Self::ALL.into_iter().find(|facet_type| facet_type.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FacetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
