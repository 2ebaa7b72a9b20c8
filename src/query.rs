//! Composes the server-side computation behind a water extent time series.

use crate::earth_engine::algorithms::*;
use crate::earth_engine::value::Value;
use crate::region::load_region::Region;
use crate::types::dataset::Dataset;
use crate::types::date_range::DateRange;

/// Feature property holding the image date, `YYYY-MM-dd`.
pub const DATE_PROPERTY: &str = "date";
/// Feature property holding the summed water area in square metres.
pub const AREA_PROPERTY: &str = "water_area";
/// Server-side date pattern producing `YYYY-MM-DD` strings.
pub(crate) const SERVER_DATE_PATTERN: &str = "YYYY-MM-dd";

/// Builds the computation that yields one feature per image in `period`:
/// `{date, water_area}`, where `water_area` is the area of all pixels inside
/// `region` whose `dataset.band` equals 1. Images whose reduction is null are dropped.
pub fn water_extent_expression(dataset: &Dataset, region: &Region, period: &DateRange) -> Value {
    let geometry = polygon(region.rings());
    let band = dataset.band.as_str();

    let images = collection_map(
        collection_filter(
            image_collection_load(&dataset.collection),
            filter_date(&period.start_string(), &period.end_string()),
        ),
        0,
        |image| image_select(image, &[band]),
    );

    let per_image = collection_map(images, 0, |image| {
        let water = image_eq(image.clone(), image_constant(1.0));
        let area = reduce_region(
            image_multiply(water, image_pixel_area()),
            reducer_sum(),
            geometry,
            dataset.scale,
            dataset.max_pixels,
        );
        let date = date_format(
            date_from(element_get(image, TIME_START_PROPERTY)),
            SERVER_DATE_PATTERN,
        );
        feature_without_geometry([
            (DATE_PROPERTY, date),
            (AREA_PROPERTY, dictionary_get(area, band)),
        ])
    });

    collection_filter(per_image, filter_not_null(&[AREA_PROPERTY]))
}
