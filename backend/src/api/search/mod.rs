//! Dataset and facet search: query compilation and execution.

mod boost_regions;
pub use boost_regions::get_boost_regions;

mod queryer;
pub use queryer::SearchQueryer;

mod search_for_results;

mod search_facets;

pub mod facet_definition;
pub mod search_es_query;
