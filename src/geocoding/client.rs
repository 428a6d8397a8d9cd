//! Forward and reverse geocoding against the OpenWeatherMap `geo/1.0` API.
//!
//! Each resolution is exactly one live network round trip; there is no retry
//! and no caching.

use crate::geocoding::error::GeocodingError;
use crate::types::coordinate::Coordinate;
use crate::types::report::{LocationIdentity, UNKNOWN_PLACE};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

const DIRECT_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const REVERSE_URL: &str = "https://api.openweathermap.org/geo/1.0/reverse";

/// Resolves place identities from names and coordinates.
///
/// The orchestrator is generic over this trait so tests can substitute a
/// stub resolver; [`OpenWeatherGeocoder`] is the live implementation.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// Forward geocoding: place name to identity. Fails with
    /// [`GeocodingError::NotFound`] when the service has no match.
    async fn by_name(&self, query: &str) -> Result<LocationIdentity, GeocodingError>;

    /// Reverse geocoding: coordinate to identity. A coordinate with no
    /// known place resolves to the [`UNKNOWN_PLACE`] sentinel, not an error.
    async fn by_coordinate(&self, coordinate: Coordinate)
        -> Result<LocationIdentity, GeocodingError>;
}

/// Geocoder backed by the OpenWeatherMap geocoding API.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    http: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectEntry {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    local_names: HashMap<String, String>,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ReverseEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

impl OpenWeatherGeocoder {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, GeocodingError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| GeocodingError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error from geocoding endpoint {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    GeocodingError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    GeocodingError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| GeocodingError::NetworkRequest(url.to_string(), e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Geocoder for OpenWeatherGeocoder {
    async fn by_name(&self, query: &str) -> Result<LocationIdentity, GeocodingError> {
        debug!("forward geocoding {:?}", query);
        let entries: Vec<DirectEntry> = self
            .get_json(DIRECT_URL, &[("q", query), ("limit", "1")])
            .await?;
        identity_from_direct(entries, query)
    }

    async fn by_coordinate(
        &self,
        coordinate: Coordinate,
    ) -> Result<LocationIdentity, GeocodingError> {
        debug!("reverse geocoding {}", coordinate);
        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let entries: Vec<ReverseEntry> = self
            .get_json(
                REVERSE_URL,
                &[("lat", lat.as_str()), ("lon", lon.as_str()), ("limit", "1")],
            )
            .await?;
        Ok(identity_from_reverse(entries, coordinate))
    }
}

/// Picks the first match of a forward geocoding response. Prefers the
/// English localized name, falling back to the plain name.
fn identity_from_direct(
    entries: Vec<DirectEntry>,
    query: &str,
) -> Result<LocationIdentity, GeocodingError> {
    let Some(entry) = entries.into_iter().next() else {
        return Err(GeocodingError::NotFound {
            query: query.to_string(),
        });
    };
    let coordinate = Coordinate::new(entry.lat, entry.lon).ok_or(
        GeocodingError::InvalidCoordinates {
            lat: entry.lat,
            lon: entry.lon,
        },
    )?;
    let localized_name = entry
        .local_names
        .get("en")
        .cloned()
        .unwrap_or(entry.name);
    Ok(LocationIdentity {
        coordinate,
        localized_name,
        country_code: entry.country,
    })
}

/// Builds an identity from a reverse geocoding response. An empty response
/// is not an error: the place name falls back to [`UNKNOWN_PLACE`].
fn identity_from_reverse(entries: Vec<ReverseEntry>, coordinate: Coordinate) -> LocationIdentity {
    match entries.into_iter().next() {
        Some(entry) => LocationIdentity {
            coordinate,
            localized_name: entry.name,
            country_code: entry.country,
        },
        None => LocationIdentity {
            coordinate,
            localized_name: UNKNOWN_PLACE.to_string(),
            country_code: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_prefers_english_local_name() {
        let entries: Vec<DirectEntry> = serde_json::from_str(
            r#"[{
                "name": "Thành phố Hồ Chí Minh",
                "local_names": {"en": "Ho Chi Minh City", "vi": "Thành phố Hồ Chí Minh"},
                "lat": 10.7758,
                "lon": 106.7018,
                "country": "VN"
            }]"#,
        )
        .unwrap();
        let identity = identity_from_direct(entries, "ho chi minh").unwrap();
        assert_eq!(identity.localized_name, "Ho Chi Minh City");
        assert_eq!(identity.country_code, "VN");
        assert_eq!(identity.coordinate, Coordinate::new(10.7758, 106.7018).unwrap());
    }

    #[test]
    fn direct_falls_back_to_plain_name() {
        let entries: Vec<DirectEntry> = serde_json::from_str(
            r#"[{"name": "Hanoi", "lat": 21.0278, "lon": 105.8342, "country": "VN"}]"#,
        )
        .unwrap();
        let identity = identity_from_direct(entries, "hanoi").unwrap();
        assert_eq!(identity.localized_name, "Hanoi");
    }

    #[test]
    fn direct_empty_response_is_not_found() {
        let err = identity_from_direct(Vec::new(), "Nonexistent_City_xyz").unwrap_err();
        match err {
            GeocodingError::NotFound { query } => assert_eq!(query, "Nonexistent_City_xyz"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn direct_rejects_out_of_range_coordinate() {
        let entries: Vec<DirectEntry> =
            serde_json::from_str(r#"[{"name": "x", "lat": 123.0, "lon": 0.0}]"#).unwrap();
        assert!(matches!(
            identity_from_direct(entries, "x"),
            Err(GeocodingError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn reverse_empty_response_defaults_to_placeholder() {
        let coordinate = Coordinate::new(0.0, 160.0).unwrap();
        let identity = identity_from_reverse(Vec::new(), coordinate);
        assert_eq!(identity.localized_name, UNKNOWN_PLACE);
        assert_eq!(identity.country_code, "");
        assert_eq!(identity.coordinate, coordinate);
    }

    #[test]
    fn reverse_keeps_the_queried_coordinate() {
        let coordinate = Coordinate::new(52.52, 13.405).unwrap();
        let entries: Vec<ReverseEntry> =
            serde_json::from_str(r#"[{"name": "Berlin", "country": "DE"}]"#).unwrap();
        let identity = identity_from_reverse(entries, coordinate);
        assert_eq!(identity.localized_name, "Berlin");
        assert_eq!(identity.coordinate, coordinate);
    }
}
