//! Local form of the computed time series: two parallel sequences, dates and areas.

use crate::query::{AREA_PROPERTY, DATE_PROPERTY};
use crate::series::error::SeriesError;
use crate::types::date_range::{parse_date, DATE_FORMAT};
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::path::Path;
use tokio::task;

#[derive(Deserialize)]
struct FeatureCollectionResult {
    features: Vec<FeatureRecord>,
}

#[derive(Deserialize)]
struct FeatureRecord {
    #[serde(default)]
    properties: Option<Map<String, Json>>,
}

/// One point of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterAreaPoint {
    pub date: NaiveDate,
    /// Square metres.
    pub area: f64,
}

/// Surface water area per image date, ordered by date.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use water_extent::WaterExtentSeries;
///
/// let result = json!({
///     "type": "FeatureCollection",
///     "features": [
///         {"type": "Feature", "geometry": null, "properties": {"date": "2002-01-01", "water_area": 812.5}},
///         {"type": "Feature", "geometry": null, "properties": {"date": "2001-01-01", "water_area": 900.0}}
///     ]
/// });
///
/// let series = WaterExtentSeries::from_feature_collection(result).unwrap();
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.areas(), &[900.0, 812.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterExtentSeries {
    dates: Vec<NaiveDate>,
    areas: Vec<f64>,
}

impl WaterExtentSeries {
    /// Converts the FeatureCollection returned by the remote computation.
    ///
    /// Features whose area is null, missing or not a number are skipped with a
    /// warning. A missing or malformed date is an error.
    pub fn from_feature_collection(result: Json) -> Result<Self, SeriesError> {
        let collection: FeatureCollectionResult =
            serde_json::from_value(result).map_err(SeriesError::NotAFeatureCollection)?;

        let mut points = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            let properties = feature.properties.unwrap_or_default();

            let date = match properties.get(DATE_PROPERTY) {
                Some(Json::String(text)) => {
                    parse_date(text).map_err(|_| SeriesError::InvalidDate {
                        index,
                        property: DATE_PROPERTY,
                        value: text.clone(),
                    })?
                }
                Some(other) => {
                    return Err(SeriesError::InvalidDate {
                        index,
                        property: DATE_PROPERTY,
                        value: other.to_string(),
                    })
                }
                None => {
                    return Err(SeriesError::MissingDate {
                        index,
                        property: DATE_PROPERTY,
                    })
                }
            };

            match properties.get(AREA_PROPERTY).and_then(Json::as_f64) {
                Some(area) => points.push(WaterAreaPoint { date, area }),
                None => warn!("Skipping {}: no numeric '{}'", date, AREA_PROPERTY),
            }
        }

        points.sort_by_key(|point| point.date);
        debug!("Converted {} features into series points", points.len());
        Ok(points.into_iter().collect())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = WaterAreaPoint> + '_ {
        self.dates
            .iter()
            .zip(&self.areas)
            .map(|(&date, &area)| WaterAreaPoint { date, area })
    }

    /// Columns `date` (ISO string) and `water_area` (f64).
    pub fn to_dataframe(&self) -> Result<DataFrame, SeriesError> {
        let dates: Vec<String> = self
            .dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();
        let df = df!(
            DATE_PROPERTY => dates,
            AREA_PROPERTY => self.areas.clone()
        )?;
        Ok(df)
    }

    /// Writes the series as CSV with a header row.
    pub async fn write_csv(&self, path: &Path) -> Result<(), SeriesError> {
        let mut df = self.to_dataframe()?;
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let mut file = std::fs::File::create(&path_buf)
                .map_err(|e| SeriesError::CsvCreate(path_buf.clone(), e))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| SeriesError::CsvWrite(path_buf, e))?;
            Ok::<(), SeriesError>(())
        })
        .await??;
        Ok(())
    }
}

impl FromIterator<WaterAreaPoint> for WaterExtentSeries {
    fn from_iter<I: IntoIterator<Item = WaterAreaPoint>>(iter: I) -> Self {
        let (dates, areas) = iter.into_iter().map(|p| (p.date, p.area)).unzip();
        Self { dates, areas }
    }
}
