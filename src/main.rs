use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use water_extent::earth_engine::config::DEFAULT_API_URL;
use water_extent::earth_engine::encoder::encode;
use water_extent::{
    chart_path, render_chart, show_chart, water_extent_expression, ChartOptions, ClientConfig,
    Dataset, DateRange, Region, WaterExtent, DEFAULT_MAX_PIXELS, DEFAULT_OUTPUT_DIR,
    DEFAULT_SCALE_M, MODIS_WATER_BAND, MODIS_WATER_COLLECTION,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Plot the surface water extent of a water body over time",
    long_about = "Sums the area of water pixels inside a GeoJSON polygon for every image of an \
                  Earth Engine water mask collection in a date range, and draws the result as a \
                  time series chart."
)]
pub struct Args {
    /// Input GeoJSON holding the polygon of the water body
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start Date in YYYY-MM-DD
    #[arg(long = "start-date", visible_alias = "sd", alias = "start_date")]
    pub start_date: String,

    /// End Date in YYYY-MM-DD (exclusive)
    #[arg(long = "end-date", visible_alias = "ed", alias = "end_date")]
    pub end_date: String,

    /// Output chart file name, written as HTML inside --output-dir
    #[arg(short, long)]
    pub output: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Also export the series as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Open the chart in a browser after writing it
    #[arg(long)]
    pub show: bool,

    /// Print the request expression as JSON and exit without contacting the API
    #[arg(long)]
    pub dry_run: bool,

    /// Google Cloud project registered for Earth Engine (required unless --dry-run)
    #[arg(long, env = "EARTHENGINE_PROJECT")]
    pub project: Option<String>,

    /// OAuth2 access token, e.g. from `gcloud auth print-access-token` (required unless --dry-run)
    #[arg(long, env = "EARTHENGINE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "EARTHENGINE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    #[arg(long, default_value = MODIS_WATER_COLLECTION)]
    pub collection: String,

    /// Band in which 1 marks water
    #[arg(long, default_value = MODIS_WATER_BAND)]
    pub band: String,

    /// Reduction scale in metres
    #[arg(long, default_value_t = DEFAULT_SCALE_M)]
    pub scale: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_PIXELS)]
    pub max_pixels: f64,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn dataset(&self) -> Dataset {
        Dataset {
            collection: self.collection.clone(),
            band: self.band.clone(),
            scale: self.scale,
            max_pixels: self.max_pixels,
        }
    }

    fn client_config(&self) -> Result<ClientConfig> {
        let project = self
            .project
            .as_deref()
            .context("--project (or EARTHENGINE_PROJECT) is required unless --dry-run")?;
        let token = self
            .token
            .as_deref()
            .context("--token (or EARTHENGINE_TOKEN) is required unless --dry-run")?;
        Ok(ClientConfig::builder()
            .project(project)
            .access_token(token)
            .api_url(self.api_url.as_str())
            .timeout(Duration::from_secs(self.timeout_secs))
            .build())
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let period = DateRange::parse(&args.start_date, &args.end_date)?;
    let target = chart_path(&args.output_dir, &args.output)?;
    let region = Region::from_path(&args.input)
        .await
        .with_context(|| format!("Failed to load region from {}", args.input.display()))?;

    if args.dry_run {
        let expression = encode(&water_extent_expression(&args.dataset(), &region, &period));
        println!("{}", serde_json::to_string_pretty(&expression)?);
        return Ok(());
    }

    let client = WaterExtent::new(args.client_config()?)?;

    let series = client
        .time_series()
        .region(&region)
        .period(period)
        .dataset(args.dataset())
        .call()
        .await
        .context("Failed to fetch the water extent time series")?;

    let options = ChartOptions::default();
    let written = render_chart(&series, &options, &target).await?;
    println!("Chart written to {}", written.display());

    if let Some(csv) = &args.csv {
        series
            .write_csv(csv)
            .await
            .with_context(|| format!("Failed to export CSV to {}", csv.display()))?;
        info!("Series exported to {}", csv.display());
    }

    if args.show {
        show_chart(&series, &options).await?;
    }
    Ok(())
}
