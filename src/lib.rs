//! Surface water extent time series from Earth Engine water masks.
//!
//! The heavy lifting (image selection, pixel areas, the reduction over the
//! polygon) runs on Earth Engine. This crate builds that computation, sends it in a
//! single `value:compute` request, turns the answer into parallel date/area
//! sequences and draws them as a line chart.

pub mod earth_engine;

mod chart;
mod error;
mod query;
mod region;
mod series;
mod types;
mod utils;
mod water_extent;

pub use error::WaterExtentError;
pub use water_extent::*;

pub use chart::error::ChartError;
pub use chart::render::{render_chart, show_chart, ChartOptions};

pub use earth_engine::client::ComputeClient;
pub use earth_engine::config::ClientConfig;
pub use earth_engine::error::EarthEngineError;

pub use query::{water_extent_expression, AREA_PROPERTY, DATE_PROPERTY};

pub use region::error::RegionError;
pub use region::load_region::Region;

pub use series::error::SeriesError;
pub use series::time_series::{WaterAreaPoint, WaterExtentSeries};

pub use types::dataset::*;
pub use types::date_range::{DateRange, DateRangeError, DATE_FORMAT};

pub use utils::{chart_path, DEFAULT_OUTPUT_DIR};
