//! Read/write chart JSON files.
//!
//! Chart JSON is the "portable" representation of a trend:
//! - kind + scope
//! - colours from the palette table
//! - the `{x, y}` points and the axis/tooltip options
//!
//! The schema is defined by `chart::ChartSpec`.

use std::fs::File;
use std::path::Path;

use crate::chart::ChartSpec;
use crate::error::AppError;

/// Write a chart JSON file.
pub fn write_chart_json(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, spec)
        .map_err(|e| AppError::usage(format!("Failed to write chart JSON: {e}")))?;

    log::info!("wrote chart ({} points) to {}", spec.dataset.data.len(), path.display());
    Ok(())
}

/// Read a chart JSON file.
pub fn read_chart_json(path: &Path) -> Result<ChartSpec, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open chart JSON '{}': {e}", path.display())))?;
    let spec: ChartSpec =
        serde_json::from_reader(file).map_err(|e| AppError::usage(format!("Invalid chart JSON: {e}")))?;
    Ok(spec)
}
