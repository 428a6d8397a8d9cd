//! The Köppen-Geiger climate classification table (Beck et al. 2023).
//!
//! The climate raster stores one class id per pixel; this module maps those
//! ids to their code, descriptive name and conventional map color.

use serde::Serialize;
use std::fmt;

/// An RGB color as used in the conventional Köppen-Geiger map legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One class of the Köppen-Geiger climate classification.
///
/// The table is fixed: ids run from 1 (`Af`) to 30 (`EF`). Instances are
/// `'static` and obtained through [`ClimateClass::lookup`].
///
/// # Examples
///
/// ```
/// use climascope::ClimateClass;
///
/// let class = ClimateClass::lookup(8).unwrap();
/// assert_eq!(class.code, "Csa");
/// assert_eq!(class.name, "Temperate, dry summer, hot summer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClimateClass {
    /// Raster class id, 1 through 30.
    pub id: i32,
    /// Short Köppen code, e.g. "Af" or "Csa".
    pub code: &'static str,
    /// Human-readable description of the class.
    pub name: &'static str,
    /// Legend color for this class.
    pub color: Rgb,
}

impl fmt::Display for ClimateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// The 30 Köppen-Geiger classes, indexed by `id - 1`.
static CLASSES: [ClimateClass; 30] = [
    class(1, "Af", "Tropical, rainforest", Rgb(0, 0, 255)),
    class(2, "Am", "Tropical, monsoon", Rgb(0, 120, 255)),
    class(3, "Aw", "Tropical, savannah", Rgb(70, 170, 250)),
    class(4, "BWh", "Arid, desert, hot", Rgb(255, 0, 0)),
    class(5, "BWk", "Arid, desert, cold", Rgb(255, 150, 150)),
    class(6, "BSh", "Arid, steppe, hot", Rgb(245, 165, 0)),
    class(7, "BSk", "Arid, steppe, cold", Rgb(255, 220, 100)),
    class(8, "Csa", "Temperate, dry summer, hot summer", Rgb(255, 255, 0)),
    class(9, "Csb", "Temperate, dry summer, warm summer", Rgb(200, 200, 0)),
    class(10, "Csc", "Temperate, dry summer, cold summer", Rgb(150, 150, 0)),
    class(11, "Cwa", "Temperate, dry winter, hot summer", Rgb(150, 255, 150)),
    class(12, "Cwb", "Temperate, dry winter, warm summer", Rgb(100, 200, 100)),
    class(13, "Cwc", "Temperate, dry winter, cold summer", Rgb(50, 150, 50)),
    class(14, "Cfa", "Temperate, no dry season, hot summer", Rgb(200, 255, 80)),
    class(15, "Cfb", "Temperate, no dry season, warm summer", Rgb(100, 255, 80)),
    class(16, "Cfc", "Temperate, no dry season, cold summer", Rgb(50, 200, 0)),
    class(17, "Dsa", "Cold, dry summer, hot summer", Rgb(255, 0, 255)),
    class(18, "Dsb", "Cold, dry summer, warm summer", Rgb(200, 0, 200)),
    class(19, "Dsc", "Cold, dry summer, cold summer", Rgb(150, 50, 150)),
    class(20, "Dsd", "Cold, dry summer, very cold winter", Rgb(150, 100, 150)),
    class(21, "Dwa", "Cold, dry winter, hot summer", Rgb(170, 175, 255)),
    class(22, "Dwb", "Cold, dry winter, warm summer", Rgb(90, 120, 220)),
    class(23, "Dwc", "Cold, dry winter, cold summer", Rgb(75, 80, 180)),
    class(24, "Dwd", "Cold, dry winter, very cold winter", Rgb(50, 0, 135)),
    class(25, "Dfa", "Cold, no dry season, hot summer", Rgb(0, 255, 255)),
    class(26, "Dfb", "Cold, no dry season, warm summer", Rgb(55, 200, 255)),
    class(27, "Dfc", "Cold, no dry season, cold summer", Rgb(0, 125, 125)),
    class(28, "Dfd", "Cold, no dry season, very cold winter", Rgb(0, 70, 95)),
    class(29, "ET", "Polar, tundra", Rgb(178, 178, 178)),
    class(30, "EF", "Polar, frost", Rgb(102, 102, 102)),
];

const fn class(id: i32, code: &'static str, name: &'static str, color: Rgb) -> ClimateClass {
    ClimateClass {
        id,
        code,
        name,
        color,
    }
}

impl ClimateClass {
    /// Looks up a climate class by its raster id.
    ///
    /// Total over all of `i32`: any id outside 1..=30, including the raster
    /// nodata sentinel, yields `None`.
    pub fn lookup(id: i32) -> Option<&'static ClimateClass> {
        if !(1..=30).contains(&id) {
            return None;
        }
        CLASSES.get((id - 1) as usize)
    }
}
