//! Query compiler and HTTP layer of the catalog search service.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod error;
pub mod server_extra;

pub use api::search::SearchQueryer;
pub use config::{IndexNames, SearchConfig};
pub use db_utils::elastic_utils::{ElasticSearchClient, SearchBackend};
pub use error::{Result, SearchError};
