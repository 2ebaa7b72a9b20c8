use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Expected a FeatureCollection result")]
    NotAFeatureCollection(#[source] serde_json::Error),

    #[error("Feature {index} has an invalid '{property}' value '{value}'")]
    InvalidDate {
        index: usize,
        property: &'static str,
        value: String,
    },

    #[error("Feature {index} has no '{property}' property")]
    MissingDate { index: usize, property: &'static str },

    #[error("Failed to build DataFrame from the series")]
    DataFrame(#[from] PolarsError),

    #[error("Failed to create CSV file '{0}'")]
    CsvCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
