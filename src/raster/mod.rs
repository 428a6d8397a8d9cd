pub mod error;
pub mod grid;
pub mod handle;

pub use grid::{RasterGrid, NODATA};
pub use handle::RasterHandle;
