//! The georeferenced climate raster and the coordinate-to-class lookup.

use crate::raster::error::RasterError;
use crate::types::climate::ClimateClass;
use crate::types::coordinate::Coordinate;
use std::io::Cursor;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

/// Raster value meaning "no classification available" at that pixel.
pub const NODATA: i32 = -9999;

// GeoTIFF georeferencing tags, not part of the baseline TIFF tag set.
const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;

/// A single-band, top-left-origin climate raster in geographic coordinates.
///
/// Pixel (0, 0) is the north-west corner; rows grow southward as latitude
/// decreases. Loaded once per session and read-only thereafter.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    xmin: f64,
    ymax: f64,
    pixel_width: f64,
    pixel_height: f64,
    width: usize,
    height: usize,
    band0: Vec<i32>,
}

impl RasterGrid {
    /// Builds a grid from its georeferencing and row-major band data.
    ///
    /// # Errors
    ///
    /// [`RasterError::InvalidGeoreference`] when a pixel size is not a
    /// positive finite number or a dimension is zero;
    /// [`RasterError::BandSize`] when `band0` does not hold exactly
    /// `width * height` samples.
    pub fn new(
        xmin: f64,
        ymax: f64,
        pixel_width: f64,
        pixel_height: f64,
        width: usize,
        height: usize,
        band0: Vec<i32>,
    ) -> Result<Self, RasterError> {
        let sizes_valid = pixel_width.is_finite()
            && pixel_height.is_finite()
            && pixel_width > 0.0
            && pixel_height > 0.0;
        if !sizes_valid || width == 0 || height == 0 {
            return Err(RasterError::InvalidGeoreference);
        }
        let expected = width * height;
        if band0.len() != expected {
            return Err(RasterError::BandSize {
                expected,
                found: band0.len(),
            });
        }
        Ok(Self {
            xmin,
            ymax,
            pixel_width,
            pixel_height,
            width,
            height,
            band0,
        })
    }

    /// Decodes a GeoTIFF byte buffer into a grid.
    ///
    /// Georeferencing comes from the ModelPixelScale and ModelTiepoint tags.
    /// Any integer band layout up to 32 bits is accepted and widened to
    /// `i32`; floating-point bands are rejected.
    pub fn from_geotiff_bytes(bytes: &[u8]) -> Result<Self, RasterError> {
        let mut decoder = Decoder::new(Cursor::new(bytes))?;
        let (width, height) = decoder.dimensions()?;

        let scale = decoder
            .get_tag_f64_vec(Tag::Unknown(MODEL_PIXEL_SCALE))
            .map_err(|_| RasterError::MissingGeoreference)?;
        let tiepoint = decoder
            .get_tag_f64_vec(Tag::Unknown(MODEL_TIEPOINT))
            .map_err(|_| RasterError::MissingGeoreference)?;
        if scale.len() < 2 || tiepoint.len() < 6 {
            return Err(RasterError::MissingGeoreference);
        }
        let pixel_width = scale[0];
        let pixel_height = scale[1];
        // Tiepoint maps raster position (i, j) to model position (x, y);
        // for these products it is the top-left corner, but the general
        // form costs nothing.
        let xmin = tiepoint[3] - tiepoint[0] * pixel_width;
        let ymax = tiepoint[4] + tiepoint[1] * pixel_height;

        let band0: Vec<i32> = match decoder.read_image()? {
            DecodingResult::U8(v) => v.into_iter().map(i32::from).collect(),
            DecodingResult::I8(v) => v.into_iter().map(i32::from).collect(),
            DecodingResult::U16(v) => v.into_iter().map(i32::from).collect(),
            DecodingResult::I16(v) => v.into_iter().map(i32::from).collect(),
            DecodingResult::I32(v) => v,
            _ => return Err(RasterError::UnsupportedSampleFormat),
        };

        Self::new(
            xmin,
            ymax,
            pixel_width,
            pixel_height,
            width as usize,
            height as usize,
            band0,
        )
    }

    /// Classifies a coordinate against the raster.
    ///
    /// Pixel indices use floor semantics, so a coordinate exactly on a
    /// pixel boundary maps to the lower/left pixel. Out-of-extent
    /// coordinates, nodata pixels and unknown class ids all yield `None`;
    /// this lookup never fails.
    pub fn classify(&self, coordinate: Coordinate) -> Option<&'static ClimateClass> {
        let col = ((coordinate.lon - self.xmin) / self.pixel_width).floor();
        let row = ((self.ymax - coordinate.lat) / self.pixel_height).floor();
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None;
        }
        let index = row as usize * self.width + col as usize;
        let value = *self.band0.get(index)?;
        if value == NODATA {
            return None;
        }
        ClimateClass::lookup(value)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 4x3 grid over lon [100, 102), lat (20, 18.5], 0.5° pixels.
    // Values are row-major class ids with some sentinels mixed in.
    fn grid() -> RasterGrid {
        #[rustfmt::skip]
        let band0 = vec![
            1,      2,  3,  4,
            5, NODATA,  8, 99,
            9,     10, 11, 12,
        ];
        RasterGrid::new(100.0, 20.0, 0.5, 0.5, 4, 3, band0).unwrap()
    }

    fn at(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn classifies_interior_pixels() {
        // Center of pixel (row 1, col 2): value 8 -> Csa.
        let class = grid().classify(at(19.25, 101.25)).unwrap();
        assert_eq!(class.id, 8);
        assert_eq!(class.code, "Csa");
        // Pixel (row 0, col 0): value 1 -> Af.
        assert_eq!(grid().classify(at(19.9, 100.1)).unwrap().code, "Af");
    }

    #[test]
    fn classification_is_deterministic() {
        let g = grid();
        let c = at(19.25, 101.25);
        assert_eq!(g.classify(c), g.classify(c));
    }

    #[test]
    fn boundary_coordinates_use_floor_semantics() {
        let g = grid();
        // lon exactly at xmin + 1 * pixel_width maps to column 1, not 0.
        assert_eq!(g.classify(at(19.9, 100.5)).unwrap().id, 2);
        // lat exactly at ymax - 1 * pixel_height maps to row 1.
        assert_eq!(g.classify(at(19.5, 100.1)).unwrap().id, 5);
        // The exact origin maps to pixel (0, 0).
        assert_eq!(g.classify(at(20.0, 100.0)).unwrap().id, 1);
    }

    #[test]
    fn outside_extent_is_none() {
        let g = grid();
        assert!(g.classify(at(19.0, 99.9)).is_none()); // west of xmin
        assert!(g.classify(at(19.0, 102.0)).is_none()); // right edge, col == width
        assert!(g.classify(at(20.1, 101.0)).is_none()); // north of ymax
        assert!(g.classify(at(18.5, 101.0)).is_none()); // bottom edge, row == height
        assert!(g.classify(at(-40.0, -100.0)).is_none());
    }

    #[test]
    fn nodata_and_unknown_ids_are_none() {
        let g = grid();
        assert!(g.classify(at(19.25, 100.75)).is_none()); // NODATA pixel
        assert!(g.classify(at(19.25, 101.75)).is_none()); // value 99, not in the table
    }

    #[test]
    fn new_rejects_band_size_mismatch() {
        let err = RasterGrid::new(0.0, 0.0, 1.0, 1.0, 2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::BandSize {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn new_rejects_degenerate_georeferencing() {
        assert!(matches!(
            RasterGrid::new(0.0, 0.0, 0.0, 1.0, 1, 1, vec![1]),
            Err(RasterError::InvalidGeoreference)
        ));
        assert!(matches!(
            RasterGrid::new(0.0, 0.0, 1.0, f64::NAN, 1, 1, vec![1]),
            Err(RasterError::InvalidGeoreference)
        ));
        assert!(matches!(
            RasterGrid::new(0.0, 0.0, 1.0, 1.0, 0, 1, vec![]),
            Err(RasterError::InvalidGeoreference)
        ));
    }
}
