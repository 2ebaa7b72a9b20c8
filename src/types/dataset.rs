//! Describes which remote image collection is reduced, and how.

use std::fmt;

/// MODIS land/water mask, one image per year, 250 m native resolution.
pub const MODIS_WATER_COLLECTION: &str = "MODIS/006/MOD44W";
/// Band of [`MODIS_WATER_COLLECTION`] holding the water flag (1 = water, 0 = land).
pub const MODIS_WATER_BAND: &str = "water_mask";
/// Nominal scale in metres at which the region is reduced.
pub const DEFAULT_SCALE_M: f64 = 30.0;
/// Upper bound on the number of pixels a single reduction may touch.
pub const DEFAULT_MAX_PIXELS: f64 = 1e9;

/// The image collection and reduction parameters of a water extent query.
///
/// The `Default` matches the MODIS MOD44W water mask, reduced at 30 m with a
/// pixel budget of 1e9.
///
/// # Examples
///
/// ```
/// use water_extent::Dataset;
///
/// let dataset = Dataset::default();
/// assert_eq!(dataset.collection, "MODIS/006/MOD44W");
/// assert_eq!(dataset.band, "water_mask");
///
/// let coarse = Dataset { scale: 250.0, ..Dataset::default() };
/// assert_eq!(coarse.max_pixels, 1e9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Asset id of the image collection.
    pub collection: String,
    /// Band whose value `1` marks water.
    pub band: String,
    /// Reduction scale in metres.
    pub scale: f64,
    pub max_pixels: f64,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            collection: MODIS_WATER_COLLECTION.to_string(),
            band: MODIS_WATER_BAND.to_string(),
            scale: DEFAULT_SCALE_M,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] @ {} m", self.collection, self.band, self.scale)
    }
}
