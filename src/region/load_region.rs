//! Loads the polygon outlining the water body from a GeoJSON document.

use crate::region::error::RegionError;
use geojson::{GeoJson, Geometry, Value as GeometryValue};
use log::{debug, info};
use std::path::Path;

/// A polygon in WGS84 longitude/latitude, exterior ring first, holes after.
///
/// # Examples
///
/// ```
/// use water_extent::Region;
///
/// let text = r#"{
///   "type": "FeatureCollection",
///   "features": [{
///     "type": "Feature",
///     "properties": {"name": "pond"},
///     "geometry": {
///       "type": "Polygon",
///       "coordinates": [[[5.0, 52.0], [5.1, 52.0], [5.1, 52.1], [5.0, 52.0]]]
///     }
///   }]
/// }"#;
///
/// let region = Region::from_geojson_str(text).unwrap();
/// assert_eq!(region.rings().len(), 1);
/// assert_eq!(region.rings()[0][1], [5.1, 52.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    rings: Vec<Vec<[f64; 2]>>,
}

impl Region {
    /// Reads and parses a GeoJSON file.
    ///
    /// A FeatureCollection contributes the geometry of its first feature; a single
    /// Feature or a bare Geometry are accepted as well. The geometry must be a
    /// Polygon.
    pub async fn from_path(path: &Path) -> Result<Self, RegionError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RegionError::FileRead(path.to_path_buf(), e))?;
        let region = Self::from_geojson_str(&text)?;
        info!(
            "Loaded polygon with {} ring(s) from {}",
            region.rings.len(),
            path.display()
        );
        Ok(region)
    }

    pub fn from_geojson_str(text: &str) -> Result<Self, RegionError> {
        let geojson = text.parse::<GeoJson>().map_err(Box::new)?;
        let geometry = match geojson {
            GeoJson::FeatureCollection(collection) => {
                let total = collection.features.len();
                let first = collection
                    .features
                    .into_iter()
                    .next()
                    .ok_or(RegionError::NoFeatures)?;
                if total > 1 {
                    debug!("Using the first of {} features", total);
                }
                first.geometry.ok_or(RegionError::MissingGeometry)?
            }
            GeoJson::Feature(feature) => feature.geometry.ok_or(RegionError::MissingGeometry)?,
            GeoJson::Geometry(geometry) => geometry,
        };
        Self::from_geometry(geometry)
    }

    fn from_geometry(geometry: Geometry) -> Result<Self, RegionError> {
        let polygon = match geometry.value {
            GeometryValue::Polygon(polygon) => polygon,
            other => return Err(RegionError::UnsupportedGeometry(geometry_name(&other))),
        };
        if polygon.is_empty() {
            return Err(RegionError::EmptyPolygon);
        }

        let mut rings = Vec::with_capacity(polygon.len());
        for (ring_idx, ring) in polygon.iter().enumerate() {
            if ring.len() < 4 {
                return Err(RegionError::RingTooShort {
                    ring: ring_idx,
                    found: ring.len(),
                });
            }
            let lon_lat = ring
                .iter()
                .enumerate()
                .map(|(pos_idx, position)| match position.as_slice() {
                    [lon, lat, ..] => Ok([*lon, *lat]),
                    _ => Err(RegionError::InvalidPosition {
                        ring: ring_idx,
                        position: pos_idx,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if lon_lat.first() != lon_lat.last() {
                return Err(RegionError::RingNotClosed { ring: ring_idx });
            }
            rings.push(lon_lat);
        }
        Ok(Self { rings })
    }

    /// The rings as `[longitude, latitude]` pairs; altitude, if any, is dropped.
    pub fn rings(&self) -> &[Vec<[f64; 2]>] {
        &self.rings
    }

    pub fn exterior(&self) -> &[[f64; 2]] {
        &self.rings[0]
    }
}

fn geometry_name(value: &GeometryValue) -> &'static str {
    match value {
        GeometryValue::Point(_) => "Point",
        GeometryValue::MultiPoint(_) => "MultiPoint",
        GeometryValue::LineString(_) => "LineString",
        GeometryValue::MultiLineString(_) => "MultiLineString",
        GeometryValue::Polygon(_) => "Polygon",
        GeometryValue::MultiPolygon(_) => "MultiPolygon",
        GeometryValue::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SQUARE: &str = "[[[10.0, 45.0], [10.5, 45.0], [10.5, 45.5], [10.0, 45.5], [10.0, 45.0]]]";

    fn feature_collection(geometry: &str) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{{"type": "Feature", "properties": {{}}, "geometry": {}}}]}}"#,
            geometry
        )
    }

    fn polygon(coordinates: &str) -> String {
        format!(r#"{{"type": "Polygon", "coordinates": {}}}"#, coordinates)
    }

    #[test]
    fn test_feature_collection_uses_first_feature() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
              "coordinates": [[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
        ]}"#;
        let region = Region::from_geojson_str(text).unwrap();
        assert_eq!(region.exterior()[0], [1.0, 1.0]);
        assert_eq!(region.exterior().len(), 4);
    }

    #[test]
    fn test_bare_geometry_and_feature_are_accepted() {
        let bare = Region::from_geojson_str(&polygon(SQUARE)).unwrap();
        let feature = format!(
            r#"{{"type": "Feature", "properties": null, "geometry": {}}}"#,
            polygon(SQUARE)
        );
        let from_feature = Region::from_geojson_str(&feature).unwrap();
        assert_eq!(bare, from_feature);
    }

    #[test]
    fn test_polygon_with_hole_keeps_all_rings() {
        let coords = "[[[0,0],[4,0],[4,4],[0,4],[0,0]], [[1,1],[2,1],[2,2],[1,1]]]";
        let region = Region::from_geojson_str(&polygon(coords)).unwrap();
        assert_eq!(region.rings().len(), 2);
        assert_eq!(region.rings()[1][2], [2.0, 2.0]);
    }

    #[test]
    fn test_altitude_is_dropped() {
        let coords = "[[[0,0,12.5],[1,0,3],[1,1,3],[0,0,12.5]]]";
        let region = Region::from_geojson_str(&polygon(coords)).unwrap();
        assert_eq!(region.exterior()[0], [0.0, 0.0]);
    }

    #[test]
    fn test_non_polygon_is_rejected() {
        let text = feature_collection(
            r#"{"type": "MultiPolygon", "coordinates": [[[[0,0],[1,0],[1,1],[0,0]]]]}"#,
        );
        let err = Region::from_geojson_str(&text).unwrap_err();
        assert!(matches!(err, RegionError::UnsupportedGeometry("MultiPolygon")));
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let err = Region::from_geojson_str(r#"{"type": "FeatureCollection", "features": []}"#)
            .unwrap_err();
        assert!(matches!(err, RegionError::NoFeatures));
    }

    #[test]
    fn test_feature_without_geometry_is_rejected() {
        let text = r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "properties": {}, "geometry": null}]}"#;
        let err = Region::from_geojson_str(text).unwrap_err();
        assert!(matches!(err, RegionError::MissingGeometry));
    }

    #[test]
    fn test_open_and_short_rings_are_rejected() {
        let open = polygon("[[[0,0],[1,0],[1,1],[0,1]]]");
        assert!(matches!(
            Region::from_geojson_str(&open).unwrap_err(),
            RegionError::RingNotClosed { ring: 0 }
        ));

        let short = polygon("[[[0,0],[1,0],[0,0]]]");
        assert!(matches!(
            Region::from_geojson_str(&short).unwrap_err(),
            RegionError::RingTooShort { ring: 0, found: 3 }
        ));

        let empty = polygon("[]");
        assert!(matches!(
            Region::from_geojson_str(&empty).unwrap_err(),
            RegionError::EmptyPolygon
        ));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = Region::from_geojson_str("{ not json").unwrap_err();
        assert!(matches!(err, RegionError::GeoJsonParse(_)));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(feature_collection(&polygon(SQUARE)).as_bytes())
            .unwrap();
        file.flush().unwrap();

        let region = Region::from_path(file.path()).await.unwrap();
        assert_eq!(region.exterior().len(), 5);
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let path = Path::new("/definitely/not/here.geojson");
        let err = Region::from_path(path).await.unwrap_err();
        match err {
            RegionError::FileRead(p, _) => assert_eq!(p, path),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
