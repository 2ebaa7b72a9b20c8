//! Draws the water extent time series as a line chart.

use crate::chart::error::ChartError;
use crate::query::{AREA_PROPERTY, DATE_PROPERTY};
use crate::series::time_series::WaterExtentSeries;
use crate::utils::ensure_output_dir_exists;
use bon::Builder;
use log::{info, warn};
use plotlars::{Axis, Line, Plot, Rgb, Shape, Text, TimeSeriesPlot};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tokio::task;

/// Titles and styling of the chart. Defaults give a blue line with circle
/// markers and grid lines on both axes.
#[derive(Debug, Clone, Builder)]
pub struct ChartOptions {
    #[builder(into, default = "Surface Water Extent Time Series".to_string())]
    pub title: String,
    #[builder(into, default = "Date".to_string())]
    pub x_title: String,
    #[builder(into, default = "Surface Water Extent (square meters)".to_string())]
    pub y_title: String,
    /// Line and marker colour as RGB.
    #[builder(default = (0, 0, 255))]
    pub color: (u8, u8, u8),
    #[builder(default = 8)]
    pub marker_size: usize,
    #[builder(default = true)]
    pub grid: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn build_plot(data: &DataFrame, options: &ChartOptions) -> TimeSeriesPlot {
    TimeSeriesPlot::builder()
        .data(data)
        .x(DATE_PROPERTY)
        .y(AREA_PROPERTY)
        .size(options.marker_size)
        .colors(vec![Rgb(options.color.0, options.color.1, options.color.2)])
        .lines(vec![Line::Solid])
        .with_shape(true)
        .shapes(vec![Shape::Circle])
        .plot_title(Text::from(options.title.as_str()).size(18))
        .x_title(Text::from(options.x_title.as_str()))
        .y_title(Text::from(options.y_title.as_str()))
        .x_axis(&Axis::new().show_grid(options.grid))
        .y_axis(
            &Axis::new()
                .show_grid(options.grid)
                .value_color(Rgb(0, 0, 0))
                .zero_line_color(Rgb(0, 0, 0)),
        )
        .build()
}

/// Writes the chart to `path` as a self-contained HTML document, creating the
/// parent directory if needed. Returns the path written.
pub async fn render_chart(
    series: &WaterExtentSeries,
    options: &ChartOptions,
    path: &Path,
) -> Result<PathBuf, ChartError> {
    if series.is_empty() {
        warn!("No water extent observations, the chart will be empty");
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_output_dir_exists(parent).await?;
    }

    let df = series.to_dataframe()?;
    let options = options.clone();
    let target = path.to_path_buf();
    let written = target.clone();
    task::spawn_blocking(move || {
        build_plot(&df, &options).write_html(target.to_string_lossy().into_owned());
    })
    .await?;

    info!("Wrote chart with {} point(s) to {}", series.len(), written.display());
    Ok(written)
}

/// Opens the chart in the default browser.
pub async fn show_chart(series: &WaterExtentSeries, options: &ChartOptions) -> Result<(), ChartError> {
    let df = series.to_dataframe()?;
    let options = options.clone();
    task::spawn_blocking(move || build_plot(&df, &options).plot()).await?;
    Ok(())
}
