use crate::chart::error::ChartError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Directory charts are written to unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const CHART_EXTENSION: &str = "html";

/// Resolves the chart file inside `output_dir`. Charts are HTML documents, so any
/// other extension on `file_name` is replaced.
pub fn chart_path(output_dir: &Path, file_name: &str) -> Result<PathBuf, ChartError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ChartError::EmptyFileName);
    }
    let mut path = output_dir.join(file_name);
    let has_html_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CHART_EXTENSION));
    if !has_html_extension {
        path.set_extension(CHART_EXTENSION);
    }
    Ok(path)
}

pub async fn ensure_output_dir_exists(path: &Path) -> Result<(), ChartError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ChartError::OutputDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| ChartError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ChartError::OutputDirCreation(path.to_path_buf(), e)),
    }
}
