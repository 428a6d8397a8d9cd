use crate::geocoding::error::GeocodingError;
use crate::raster::error::RasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimascopeError {
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}
