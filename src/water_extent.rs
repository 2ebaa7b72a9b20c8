//! Entry point for fetching surface water extent time series.
//!
//! [`WaterExtent`] ties the pieces together: it composes the remote computation
//! for a region and date range, sends it to Earth Engine, and converts the
//! returned feature collection into a [`WaterExtentSeries`].

use crate::earth_engine::client::ComputeClient;
use crate::earth_engine::config::ClientConfig;
use crate::error::WaterExtentError;
use crate::query::water_extent_expression;
use crate::region::load_region::Region;
use crate::series::time_series::WaterExtentSeries;
use crate::types::dataset::Dataset;
use crate::types::date_range::DateRange;
use bon::bon;
use log::info;

/// Client for water extent queries.
///
/// # Examples
///
/// ```no_run
/// # use water_extent::{ClientConfig, DateRange, Region, WaterExtent, WaterExtentError};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), WaterExtentError> {
/// let config = ClientConfig::builder()
///     .project("my-cloud-project")
///     .access_token(std::env::var("EARTHENGINE_TOKEN").unwrap_or_default())
///     .build();
/// let client = WaterExtent::new(config)?;
///
/// let region = Region::from_path(Path::new("lake.geojson")).await?;
/// let period = DateRange::parse("2001-01-01", "2016-01-01")?;
///
/// let series = client
///     .time_series()
///     .region(&region)
///     .period(period)
///     .call()
///     .await?;
///
/// for point in series.points() {
///     println!("{}: {:.0} m²", point.date, point.area);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WaterExtent {
    client: ComputeClient,
}

#[bon]
impl WaterExtent {
    /// Creates a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`WaterExtentError::EarthEngine`] if the project or token is empty,
    /// the API url is not http(s), or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, WaterExtentError> {
        Ok(Self {
            client: ComputeClient::new(config)?,
        })
    }

    /// Fetches the water area of `region` for every image acquired in `period`.
    ///
    /// `dataset` defaults to [`Dataset::default`] (MODIS MOD44W water mask).
    ///
    /// # Errors
    ///
    /// Returns [`WaterExtentError::EarthEngine`] for network, HTTP or API failures and
    /// [`WaterExtentError::Series`] if the result cannot be converted.
    #[builder]
    pub async fn time_series(
        &self,
        region: &Region,
        period: DateRange,
        dataset: Option<Dataset>,
    ) -> Result<WaterExtentSeries, WaterExtentError> {
        let dataset = dataset.unwrap_or_default();
        info!("Fetching water extent of {} for {}", dataset, period);

        let value = water_extent_expression(&dataset, region, &period);
        let result = self.client.compute(&value).await?;
        let series = WaterExtentSeries::from_feature_collection(result)?;

        info!("Received {} water extent observation(s)", series.len());
        Ok(series)
    }
}
