//! Elevation lookup against the Open-Elevation API.

use crate::enrichment::error::EnrichmentError;
use crate::enrichment::get_json;
use crate::types::coordinate::Coordinate;
use crate::types::report::ElevationReading;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

const LOOKUP_URL: &str = "https://api.open-elevation.com/api/v1/lookup";

/// Source of terrain elevation readings. Generic seam for the orchestrator;
/// [`OpenElevationClient`] is the live implementation.
#[allow(async_fn_in_trait)]
pub trait ElevationSource {
    async fn fetch_elevation(
        &self,
        coordinate: Coordinate,
    ) -> Result<ElevationReading, EnrichmentError>;
}

/// Elevation source backed by the public Open-Elevation API.
#[derive(Debug, Clone)]
pub struct OpenElevationClient {
    http: Client,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupPoint>,
}

#[derive(Debug, Deserialize)]
struct LookupPoint {
    elevation: f64,
}

impl OpenElevationClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl ElevationSource for OpenElevationClient {
    async fn fetch_elevation(
        &self,
        coordinate: Coordinate,
    ) -> Result<ElevationReading, EnrichmentError> {
        debug!("fetching elevation for {}", coordinate);
        let locations = format!("{},{}", coordinate.lat, coordinate.lon);
        let response: LookupResponse = get_json(
            &self.http,
            LOOKUP_URL,
            &[("locations", locations.as_str())],
        )
        .await?;
        reading_from_response(response)
    }
}

/// Takes the first (and only requested) result point, rounded to whole
/// meters. An empty results array is a shape mismatch and degrades like any
/// other enrichment failure.
fn reading_from_response(response: LookupResponse) -> Result<ElevationReading, EnrichmentError> {
    let point = response
        .results
        .first()
        .ok_or_else(|| EnrichmentError::UnexpectedBody {
            url: LOOKUP_URL.to_string(),
            detail: "empty results array".to_string(),
        })?;
    Ok(ElevationReading(point.elevation.round() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_result() {
        let response: LookupResponse =
            serde_json::from_str(r#"{"results": [{"elevation": 19.0}]}"#).unwrap();
        assert_eq!(reading_from_response(response).unwrap(), ElevationReading(19));
    }

    #[test]
    fn rounds_fractional_meters() {
        let response: LookupResponse =
            serde_json::from_str(r#"{"results": [{"elevation": 1507.6}]}"#).unwrap();
        assert_eq!(
            reading_from_response(response).unwrap(),
            ElevationReading(1508)
        );
    }

    #[test]
    fn empty_results_is_an_error() {
        let response: LookupResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(matches!(
            reading_from_response(response),
            Err(EnrichmentError::UnexpectedBody { .. })
        ));
    }
}
