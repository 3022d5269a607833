//! Error taxonomy of the search service.

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("failed to build search backend client: {0}")]
    ClientConfig(#[source] reqwest::Error),

    #[error("search backend unavailable: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    #[error("malformed search backend response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("unknown facet type: {0}")]
    UnknownFacetType(String),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::UnknownFacetType(_) => StatusCode::BAD_REQUEST,
            SearchError::Backend { .. } | SearchError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SearchError::MalformedResponse(_) | SearchError::ClientConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API callers.
    pub fn public_message(&self) -> String {
        match self {
            SearchError::UnknownFacetType(_) => self.to_string(),
            _ => "search unavailable".to_string(),
        }
    }
}
