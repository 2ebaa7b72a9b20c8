use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Failed to read GeoJSON file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse GeoJSON")]
    GeoJsonParse(#[from] Box<geojson::Error>),

    #[error("GeoJSON feature collection contains no features")]
    NoFeatures,

    #[error("GeoJSON feature has no geometry")]
    MissingGeometry,

    #[error("Unsupported geometry type '{0}', only Polygon is supported")]
    UnsupportedGeometry(&'static str),

    #[error("Polygon has no rings")]
    EmptyPolygon,

    #[error("Ring {ring} of the polygon has {found} positions, at least 4 are required")]
    RingTooShort { ring: usize, found: usize },

    #[error("Ring {ring} of the polygon is not closed (first and last positions differ)")]
    RingNotClosed { ring: usize },

    #[error("Position {position} of ring {ring} needs at least longitude and latitude")]
    InvalidPosition { ring: usize, position: usize },
}
