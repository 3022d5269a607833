//! Service configuration read from the environment.

use std::time::Duration;

/// Names of the indices the query compiler reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNames {
    pub datasets: String,
    pub regions: String,
    pub publishers: String,
    pub formats: String,
}

impl Default for IndexNames {
    fn default() -> Self {
        Self {
            datasets: "datasets".to_string(),
            regions: "regions".to_string(),
            publishers: "publishers".to_string(),
            formats: "formats".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub elasticsearch_url: String,
    pub indices: IndexNames,
    pub request_timeout: Duration,
    pub listen_addr: String,
    pub json_logs: bool,
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = IndexNames::default();
        let timeout_secs = lookup("SEARCH_TIMEOUT_SECS")
            .and_then(|secs| secs.parse::<u64>().ok())
            .unwrap_or(30);
        Self {
            elasticsearch_url: lookup("ELASTICSEARCH_URL").unwrap_or("http://localhost:9200".to_string()),
            indices: IndexNames {
                datasets: lookup("DATASETS_INDEX").unwrap_or(defaults.datasets),
                regions: lookup("REGIONS_INDEX").unwrap_or(defaults.regions),
                publishers: lookup("PUBLISHERS_INDEX").unwrap_or(defaults.publishers),
                formats: lookup("FORMATS_INDEX").unwrap_or(defaults.formats),
            },
            request_timeout: Duration::from_secs(timeout_secs),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or("0.0.0.0:6102".to_string()),
            json_logs: lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
        }
    }
}
