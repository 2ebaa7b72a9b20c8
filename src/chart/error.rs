use std::path::PathBuf;
use thiserror::Error;

use crate::series::error::SeriesError;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Output path exists but is not a directory: '{0}'")]
    OutputDirNotADirectory(PathBuf),

    #[error("Chart file name is empty")]
    EmptyFileName,

    #[error("Failed to prepare chart data")]
    Data(#[from] SeriesError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
