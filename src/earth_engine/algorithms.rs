//! Typed constructors for the server algorithms used by the water extent query.
//!
//! Each function only builds a [`Value`]; argument names follow the remote
//! algorithm signatures.

use crate::earth_engine::value::Value;

/// Image property holding the acquisition start time in milliseconds since epoch.
pub const TIME_START_PROPERTY: &str = "system:time_start";

/// Name of the single argument of a mapping function nested `depth` levels deep.
pub fn mapping_var(depth: usize) -> String {
    format!("_MAPPING_VAR_{}_0", depth)
}

pub fn image_collection_load(id: &str) -> Value {
    Value::invoke("ImageCollection.load", [("id", Value::from(id))])
}

pub fn collection_filter(collection: Value, filter: Value) -> Value {
    Value::invoke(
        "Collection.filter",
        [("collection", collection), ("filter", filter)],
    )
}

/// Applies `algorithm` to every element, where `algorithm` receives the element
/// bound to [`mapping_var`]`(depth)`.
pub fn collection_map(collection: Value, depth: usize, algorithm: impl FnOnce(Value) -> Value) -> Value {
    let var = mapping_var(depth);
    let body = algorithm(Value::argument(&var));
    Value::invoke(
        "Collection.map",
        [
            ("collection", collection),
            ("baseAlgorithm", Value::function(&[var.as_str()], body)),
        ],
    )
}

pub fn date(value: &str) -> Value {
    Value::invoke("Date", [("value", Value::from(value))])
}

pub fn date_from(value: Value) -> Value {
    Value::invoke("Date", [("value", value)])
}

pub fn date_format(date: Value, format: &str) -> Value {
    Value::invoke("Date.format", [("date", date), ("format", Value::from(format))])
}

pub fn date_range(start: &str, end: &str) -> Value {
    Value::invoke("DateRange", [("start", date(start)), ("end", date(end))])
}

/// Keeps elements whose start time falls in `[start, end)`.
pub fn filter_date(start: &str, end: &str) -> Value {
    Value::invoke(
        "Filter.dateRangeContains",
        [
            ("leftValue", date_range(start, end)),
            ("rightField", Value::from(TIME_START_PROPERTY)),
        ],
    )
}

pub fn filter_not_null(properties: &[&str]) -> Value {
    Value::invoke(
        "Filter.notNull",
        [(
            "properties",
            Value::array(properties.iter().map(|p| Value::from(*p))),
        )],
    )
}

pub fn image_select(image: Value, bands: &[&str]) -> Value {
    Value::invoke(
        "Image.select",
        [
            ("input", image),
            ("bandSelectors", Value::array(bands.iter().map(|b| Value::from(*b)))),
        ],
    )
}

pub fn image_constant(value: f64) -> Value {
    Value::invoke("Image.constant", [("value", Value::from(value))])
}

pub fn image_eq(image1: Value, image2: Value) -> Value {
    Value::invoke("Image.eq", [("image1", image1), ("image2", image2)])
}

pub fn image_multiply(image1: Value, image2: Value) -> Value {
    Value::invoke("Image.multiply", [("image1", image1), ("image2", image2)])
}

/// Image whose single band `area` holds each pixel's area in square metres.
pub fn image_pixel_area() -> Value {
    Value::call("Image.pixelArea")
}

pub fn reducer_sum() -> Value {
    Value::call("Reducer.sum")
}

pub fn reduce_region(image: Value, reducer: Value, geometry: Value, scale: f64, max_pixels: f64) -> Value {
    Value::invoke(
        "Image.reduceRegion",
        [
            ("image", image),
            ("reducer", reducer),
            ("geometry", geometry),
            ("scale", Value::from(scale)),
            ("maxPixels", Value::from(max_pixels)),
        ],
    )
}

pub fn element_get(object: Value, property: &str) -> Value {
    Value::invoke(
        "Element.get",
        [("object", object), ("property", Value::from(property))],
    )
}

pub fn dictionary_get(dictionary: Value, key: &str) -> Value {
    Value::invoke(
        "Dictionary.get",
        [("dictionary", dictionary), ("key", Value::from(key))],
    )
}

/// A feature with the given properties and no geometry.
pub fn feature_without_geometry<'a>(properties: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::invoke(
        "Feature",
        [
            ("geometry", Value::null()),
            ("metadata", Value::dictionary(properties)),
        ],
    )
}

/// Polygon from `[lon, lat]` rings, exterior first.
///
/// `geodesic` is left unset, so edges follow the server default for EPSG:4326
/// (geodesic).
pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Value {
    let coordinates = Value::array(rings.iter().map(|ring| {
        Value::array(ring.iter().map(|[lon, lat]| {
            Value::array([Value::from(*lon), Value::from(*lat)])
        }))
    }));
    Value::invoke(
        "GeometryConstructors.Polygon",
        [("coordinates", coordinates), ("evenOdd", Value::constant(true))],
    )
}
