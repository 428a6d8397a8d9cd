//! Current-weather lookup against the OpenWeatherMap API.
//!
//! The upstream reports temperatures in Kelvin only; conversion to Celsius
//! happens here, at the boundary, together with the derivation of the coarse
//! condition category.

use crate::enrichment::error::EnrichmentError;
use crate::enrichment::get_json;
use crate::types::coordinate::Coordinate;
use crate::types::weather::{Celsius, Condition, WeatherSnapshot};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Source of current-weather snapshots. Generic seam for the orchestrator;
/// [`OpenWeatherClient`] is the live implementation.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    async fn fetch_current_weather(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherSnapshot, EnrichmentError>;
}

/// Weather source backed by the OpenWeatherMap current-weather API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    main: MainReadings,
    #[serde(default)]
    wind: Wind,
    rain: Option<PrecipitationBucket>,
    snow: Option<PrecipitationBucket>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct PrecipitationBucket {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl OpenWeatherClient {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

impl WeatherSource for OpenWeatherClient {
    async fn fetch_current_weather(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherSnapshot, EnrichmentError> {
        debug!("fetching current weather for {}", coordinate);
        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let response: CurrentResponse = get_json(
            &self.http,
            CURRENT_URL,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ],
        )
        .await?;
        Ok(snapshot_from_response(response))
    }
}

/// Converts the raw payload into a [`WeatherSnapshot`]: Kelvin to Celsius,
/// condition category from the condition group text, and the last-hour
/// precipitation bucket (snow overriding rain when both are present).
fn snapshot_from_response(response: CurrentResponse) -> WeatherSnapshot {
    let condition_entry = response.weather.first();
    let description = condition_entry
        .map(|e| e.description.clone())
        .unwrap_or_default();
    let icon = condition_entry.map(|e| e.icon.clone()).unwrap_or_default();
    let condition = Condition::from_text(condition_entry.map(|e| e.main.as_str()).unwrap_or(""));

    let mut precipitation = 0.0;
    if let Some(mm) = response.rain.as_ref().and_then(|b| b.one_hour) {
        precipitation = mm;
    }
    if let Some(mm) = response.snow.as_ref().and_then(|b| b.one_hour) {
        precipitation = mm;
    }

    WeatherSnapshot {
        temperature: Celsius::from_kelvin(response.main.temp),
        feels_like: Celsius::from_kelvin(response.main.feels_like),
        description,
        icon,
        condition,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
        precipitation,
        temp_min: Celsius::from_kelvin(response.main.temp_min),
        temp_max: Celsius::from_kelvin(response.main.temp_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "weather": [{"main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {
            "temp": 303.15,
            "feels_like": 308.65,
            "temp_min": 301.15,
            "temp_max": 305.15,
            "humidity": 74
        },
        "wind": {"speed": 3.5},
        "rain": {"1h": 0.8}
    }"#;

    #[test]
    fn converts_kelvin_at_the_boundary() {
        let response: CurrentResponse = serde_json::from_str(FIXTURE).unwrap();
        let snapshot = snapshot_from_response(response);
        assert_eq!(snapshot.temperature.to_string(), "30.0°C");
        assert_eq!(snapshot.feels_like.to_string(), "35.5°C");
        assert_eq!(snapshot.temp_min.to_string(), "28.0°C");
        assert_eq!(snapshot.temp_max.to_string(), "32.0°C");
    }

    #[test]
    fn carries_condition_fields_through() {
        let response: CurrentResponse = serde_json::from_str(FIXTURE).unwrap();
        let snapshot = snapshot_from_response(response);
        assert_eq!(snapshot.condition, Condition::Cloud);
        assert_eq!(snapshot.description, "scattered clouds");
        assert_eq!(snapshot.icon, "03d");
        assert_eq!(snapshot.humidity, 74);
        assert!((snapshot.wind_speed - 3.5).abs() < 1e-9);
    }

    #[test]
    fn rain_bucket_sets_precipitation() {
        let response: CurrentResponse = serde_json::from_str(FIXTURE).unwrap();
        let snapshot = snapshot_from_response(response);
        assert!((snapshot.precipitation - 0.8).abs() < 1e-9);
    }

    #[test]
    fn snow_bucket_overrides_rain() {
        let response: CurrentResponse = serde_json::from_str(
            r#"{
                "weather": [{"main": "Snow", "description": "light snow", "icon": "13d"}],
                "main": {"temp": 271.15, "feels_like": 268.15, "temp_min": 270.15,
                         "temp_max": 272.15, "humidity": 90},
                "wind": {"speed": 1.0},
                "rain": {"1h": 0.2},
                "snow": {"1h": 1.4}
            }"#,
        )
        .unwrap();
        let snapshot = snapshot_from_response(response);
        assert!((snapshot.precipitation - 1.4).abs() < 1e-9);
        assert_eq!(snapshot.condition, Condition::Snow);
    }

    #[test]
    fn missing_optional_sections_default() {
        let response: CurrentResponse = serde_json::from_str(
            r#"{"main": {"temp": 300.0, "feels_like": 300.0, "temp_min": 300.0,
                         "temp_max": 300.0, "humidity": 50}}"#,
        )
        .unwrap();
        let snapshot = snapshot_from_response(response);
        assert_eq!(snapshot.condition, Condition::Sunny);
        assert_eq!(snapshot.description, "");
        assert!((snapshot.wind_speed - 0.0).abs() < 1e-9);
        assert!((snapshot.precipitation - 0.0).abs() < 1e-9);
    }
}
