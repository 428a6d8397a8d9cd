//! A shared, once-initialized handle to the climate raster.

use crate::raster::error::RasterError;
use crate::raster::grid::RasterGrid;
use crate::types::climate::ClimateClass;
use crate::types::coordinate::Coordinate;
use log::{info, warn};
use reqwest::Client;
use std::sync::{Arc, OnceLock};

/// Cloneable handle to the session's climate raster.
///
/// The grid is loaded once, asynchronously, and is immutable afterwards.
/// Readers observe either "not loaded yet" or the complete grid, never a
/// partial one; classifying through an unloaded handle yields `None`
/// without blocking.
#[derive(Debug, Clone, Default)]
pub struct RasterHandle {
    inner: Arc<OnceLock<RasterGrid>>,
}

impl RasterHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a decoded grid. Returns `false` when a grid was already
    /// installed; the existing grid is kept.
    pub fn install(&self, grid: RasterGrid) -> bool {
        self.inner.set(grid).is_ok()
    }

    /// The loaded grid, if any.
    pub fn get(&self) -> Option<&RasterGrid> {
        self.inner.get()
    }

    /// Whether the grid has finished loading.
    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Classifies a coordinate, yielding `None` while the raster is not
    /// loaded. See [`RasterGrid::classify`].
    pub fn classify(&self, coordinate: Coordinate) -> Option<&'static ClimateClass> {
        self.get()?.classify(coordinate)
    }

    /// Downloads and decodes a GeoTIFF, installing it into this handle.
    ///
    /// A failure leaves the handle unset: classification stays degraded for
    /// the session while every other feature keeps working.
    pub async fn load_from_url(&self, http: &Client, url: &str) -> Result<(), RasterError> {
        info!("Downloading climate raster from {}", url);
        let response = http
            .get(url)
            .send()
            .await
            .map_err(|e| RasterError::NetworkRequest(url.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    RasterError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    RasterError::NetworkRequest(url.to_string(), e)
                });
            }
        };
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RasterError::NetworkRequest(url.to_string(), e))?;

        let grid = RasterGrid::from_geotiff_bytes(&bytes)?;
        info!(
            "Loaded climate raster: {}x{} pixels",
            grid.width(),
            grid.height()
        );
        if !self.install(grid) {
            warn!("climate raster already loaded; keeping the existing grid");
        }
        Ok(())
    }
}
