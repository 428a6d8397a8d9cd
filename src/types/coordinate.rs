//! Geographic coordinates in decimal degrees (WGS84).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate: latitude and longitude in decimal degrees.
///
/// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`;
/// [`Coordinate::new`] rejects anything else (including NaN).
///
/// # Examples
///
/// ```
/// use climascope::Coordinate;
///
/// let ho_chi_minh = Coordinate::new(10.7758, 106.7018).unwrap();
/// assert_eq!(ho_chi_minh.lat, 10.7758);
/// assert!(Coordinate::new(91.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, positive north.
    pub lat: f64,
    /// Longitude in decimal degrees, positive east.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate, returning `None` when either component is out
    /// of range or not a finite number.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self { lat, lon })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}
