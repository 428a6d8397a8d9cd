//! Auxiliary, fail-soft data sources: elevation and current weather.
//!
//! Enrichments are decorative. Every fetch follows one contract: a failure
//! degrades the corresponding report field to absent via [`fail_soft`],
//! logged but never propagated to the user.

pub mod elevation;
pub mod error;
pub mod weather;

pub use elevation::{ElevationSource, OpenElevationClient};
pub use weather::{OpenWeatherClient, WeatherSource};

use error::EnrichmentError;
use log::warn;
use reqwest::Client;

/// Absorbs an enrichment failure into an absent value, logging it once.
pub(crate) fn fail_soft<T>(label: &str, result: Result<T, EnrichmentError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} lookup degraded: {}", label, e);
            None
        }
    }
}

/// Shared GET-and-decode used by both fetchers.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    http: &Client,
    url: &'static str,
    params: &[(&str, &str)],
) -> Result<T, EnrichmentError> {
    let response = http
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| EnrichmentError::NetworkRequest(url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if let Some(status) = e.status() {
                EnrichmentError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                EnrichmentError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let body = response
        .bytes()
        .await
        .map_err(|e| EnrichmentError::NetworkRequest(url.to_string(), e))?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_soft_passes_values_through() {
        let ok: Result<u8, EnrichmentError> = Ok(7);
        assert_eq!(fail_soft("elevation", ok), Some(7));
    }

    #[test]
    fn fail_soft_absorbs_errors() {
        let err: Result<u8, EnrichmentError> = Err(EnrichmentError::UnexpectedBody {
            url: "http://example.invalid".to_string(),
            detail: "empty".to_string(),
        });
        assert_eq!(fail_soft("elevation", err), None);
    }
}
