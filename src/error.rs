use crate::chart::error::ChartError;
use crate::earth_engine::error::EarthEngineError;
use crate::region::error::RegionError;
use crate::series::error::SeriesError;
use crate::types::date_range::DateRangeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaterExtentError {
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    EarthEngine(#[from] EarthEngineError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
