mod climascope;
mod enrichment;
mod error;
mod geocoding;
mod raster;
mod types;

pub use climascope::Climascope;
pub use error::ClimascopeError;

pub use enrichment::error::EnrichmentError;
pub use enrichment::{ElevationSource, OpenElevationClient, OpenWeatherClient, WeatherSource};

pub use geocoding::error::GeocodingError;
pub use geocoding::{Geocoder, OpenWeatherGeocoder};

pub use raster::error::RasterError;
pub use raster::{RasterGrid, RasterHandle, NODATA};

pub use types::climate::{ClimateClass, Rgb};
pub use types::coordinate::Coordinate;
pub use types::report::{
    AggregatedReport, ElevationReading, LocationIdentity, QueryOutcome, UNKNOWN_PLACE,
};
pub use types::weather::{Celsius, Condition, WeatherSnapshot};
