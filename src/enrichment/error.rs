use thiserror::Error;

/// Failure of an auxiliary fetch. Never surfaced past the orchestrator:
/// every enrichment error is absorbed into an absent report field.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON data")]
    JsonParse(#[from] serde_json::Error),

    #[error("unexpected response body from {url}: {detail}")]
    UnexpectedBody { url: String, detail: String },
}
