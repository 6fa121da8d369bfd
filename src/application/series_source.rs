// Source trait for series responses
use crate::domain::series::SeriesNode;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("series query error: {0}")]
    Query(String),
}

#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetch the raw series response
    async fn fetch_series(&self) -> Result<Vec<SeriesNode>, FetchError>;
}
