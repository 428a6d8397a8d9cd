//! The data structures a completed query delivers: resolved place identity,
//! optional enrichments and the aggregated report itself.

use crate::types::climate::ClimateClass;
use crate::types::coordinate::Coordinate;
use crate::types::weather::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sentinel place name used when reverse geocoding yields no result.
pub const UNKNOWN_PLACE: &str = "Unknown place";

/// A resolved place identity, produced by forward or reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationIdentity {
    /// The coordinate the identity refers to. For forward geocoding this is
    /// the service's match; for reverse geocoding it is the queried point.
    pub coordinate: Coordinate,
    /// Localized place name, or [`UNKNOWN_PLACE`] when reverse geocoding
    /// found nothing.
    pub localized_name: String,
    /// ISO country code, empty when unknown.
    pub country_code: String,
}

/// Terrain elevation above sea level, rounded to whole meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevationReading(pub i32);

impl fmt::Display for ElevationReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

/// The aggregated environmental snapshot for one completed query.
///
/// Identity is always present; every enrichment is independently optional
/// because its fetch may have degraded. At most one report is active at a
/// time; see [`crate::Climascope::active_report`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReport {
    /// The queried coordinate.
    pub coordinate: Coordinate,
    /// Resolved place identity.
    pub identity: LocationIdentity,
    /// Elevation, absent when the elevation service failed.
    pub elevation: Option<ElevationReading>,
    /// Köppen-Geiger class, absent when the raster is not loaded, the
    /// coordinate lies outside its extent or the pixel holds nodata.
    pub climate: Option<&'static ClimateClass>,
    /// Current weather, absent when the weather service failed.
    pub weather: Option<WeatherSnapshot>,
}

/// How a query ended, short of an identity-resolution error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// All enrichments settled and the report was published as the active one.
    Complete(AggregatedReport),
    /// A newer query was started while this one was in flight; its report
    /// was discarded.
    Superseded,
    /// The input was empty after trimming; nothing was done.
    Skipped,
}
