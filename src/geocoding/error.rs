use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("no geocoding match for '{query}'")]
    NotFound { query: String },

    #[error("geocoding returned an out-of-range coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

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
}
