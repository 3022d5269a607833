//! Defaults shared by callers of the search API.

pub const DEFAULT_START: usize = 0;
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_FACET_SIZE: usize = 10;

/// Maximum number of regions considered for boosting a single query.
pub const BOOST_REGION_CANDIDATES: usize = 50;

/// Free text that matches every document.
pub const MATCH_ALL_TEXT: &str = "*";
