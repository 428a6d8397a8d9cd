//! Current-weather value types: temperatures, coarse condition categories
//! and the snapshot delivered as part of an aggregated report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A temperature in degrees Celsius.
///
/// The upstream weather service reports Kelvin only; conversion happens once
/// at the boundary via [`Celsius::from_kelvin`]. Displays with one decimal,
/// e.g. `30.0°C`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Celsius(pub f64);

impl Celsius {
    /// Converts an absolute temperature in Kelvin.
    pub fn from_kelvin(kelvin: f64) -> Self {
        Self(kelvin - 273.15)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// Coarse weather condition category, derived from the condition text of a
/// current-weather payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Cloud,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
    Sunny,
}

impl Condition {
    /// Derives a category from free condition text.
    ///
    /// Case-insensitive substring match, first match wins, in this order:
    /// clear, cloud, rain or drizzle, snow, thunder, mist/fog/haze. Anything
    /// else falls back to [`Condition::Sunny`].
    ///
    /// # Examples
    ///
    /// ```
    /// use climascope::Condition;
    ///
    /// assert_eq!(Condition::from_text("Clouds"), Condition::Cloud);
    /// assert_eq!(Condition::from_text("light drizzle"), Condition::Rain);
    /// assert_eq!(Condition::from_text("Haze"), Condition::Mist);
    /// ```
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("clear") {
            Condition::Clear
        } else if text.contains("cloud") {
            Condition::Cloud
        } else if text.contains("rain") || text.contains("drizzle") {
            Condition::Rain
        } else if text.contains("snow") {
            Condition::Snow
        } else if text.contains("thunder") {
            Condition::Thunderstorm
        } else if text.contains("mist") || text.contains("fog") || text.contains("haze") {
            Condition::Mist
        } else {
            Condition::Sunny
        }
    }
}

/// Current weather at a coordinate, as reported by the weather service.
///
/// A pass-through of the upstream payload with temperatures converted to
/// Celsius. The whole snapshot is optional in an [`crate::AggregatedReport`]:
/// when the fetch fails the report simply carries no weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current air temperature.
    pub temperature: Celsius,
    /// Perceived temperature.
    pub feels_like: Celsius,
    /// Detailed condition text, e.g. "scattered clouds".
    pub description: String,
    /// Upstream icon identifier, e.g. "04d".
    pub icon: String,
    /// Coarse category derived from the condition group text.
    pub condition: Condition,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in meters per second.
    pub wind_speed: f64,
    /// Precipitation over the last hour in millimeters (rain or snow).
    pub precipitation: f64,
    /// Daily minimum temperature.
    pub temp_min: Celsius,
    /// Daily maximum temperature.
    pub temp_max: Celsius,
}

impl WeatherSnapshot {
    /// Wind speed converted to kilometers per hour.
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed * 3.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_and_display() {
        let t = Celsius::from_kelvin(303.15);
        assert!((t.0 - 30.0).abs() < 1e-9);
        assert_eq!(t.to_string(), "30.0°C");
        assert_eq!(Celsius::from_kelvin(273.15).to_string(), "0.0°C");
        assert_eq!(Celsius(-5.25).to_string(), "-5.2°C");
    }

    #[test]
    fn condition_priority_order() {
        // "clear" wins over anything that follows it.
        assert_eq!(Condition::from_text("clear sky"), Condition::Clear);
        assert_eq!(Condition::from_text("Clouds"), Condition::Cloud);
        assert_eq!(Condition::from_text("moderate rain"), Condition::Rain);
        assert_eq!(Condition::from_text("Drizzle"), Condition::Rain);
        assert_eq!(Condition::from_text("light snow"), Condition::Snow);
        assert_eq!(Condition::from_text("Thunderstorm"), Condition::Thunderstorm);
        assert_eq!(Condition::from_text("mist"), Condition::Mist);
        assert_eq!(Condition::from_text("fog"), Condition::Mist);
        assert_eq!(Condition::from_text("Haze"), Condition::Mist);
    }

    #[test]
    fn condition_defaults_to_sunny() {
        assert_eq!(Condition::from_text("sand"), Condition::Sunny);
        assert_eq!(Condition::from_text(""), Condition::Sunny);
    }

    #[test]
    fn condition_is_case_insensitive() {
        assert_eq!(Condition::from_text("CLEAR"), Condition::Clear);
        assert_eq!(Condition::from_text("ThUnDeR"), Condition::Thunderstorm);
    }

    #[test]
    fn wind_speed_converts_to_kmh() {
        let snapshot = WeatherSnapshot {
            temperature: Celsius(30.0),
            feels_like: Celsius(33.0),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            condition: Condition::Clear,
            humidity: 70,
            wind_speed: 5.0,
            precipitation: 0.0,
            temp_min: Celsius(28.0),
            temp_max: Celsius(32.0),
        };
        assert!((snapshot.wind_speed_kmh() - 18.0).abs() < 1e-9);
    }
}
