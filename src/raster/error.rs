use thiserror::Error;

/// Failure to fetch or decode the climate raster. Only the loader sees
/// these; classification itself never errors, it degrades to absent.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode climate raster")]
    Decode(#[from] tiff::TiffError),

    #[error("climate raster is missing its georeferencing tags")]
    MissingGeoreference,

    #[error("climate raster georeferencing is degenerate")]
    InvalidGeoreference,

    #[error("unsupported raster sample format, expected an integer band")]
    UnsupportedSampleFormat,

    #[error("raster band holds {found} samples, expected {expected}")]
    BandSize { expected: usize, found: usize },
}
