//! Export daily changes to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! One row per delta point: `date,label,delta,cumulative`.

use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::TrendOutput;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct DeltaRow<'a> {
    date: String,
    label: &'a str,
    delta: i64,
    cumulative: i64,
}

/// Write the delta series of one trend to a CSV file.
pub fn write_deltas_csv(path: &Path, output: &TrendOutput) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Deltas start at the second cumulative entry.
    let cumulative = output.cumulative.entries().iter().skip(1);
    for ((point, delta), (_, total)) in output.points.iter().zip(&output.deltas).zip(cumulative) {
        writer
            .serialize(DeltaRow {
                date: point.x.to_string(),
                label: &delta.date,
                delta: delta.delta,
                cumulative: *total,
            })
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))?;

    log::info!("wrote {} rows to {}", output.deltas.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_trend;
    use crate::data::Historical;
    use crate::domain::{CumulativeSeries, TrendRequest};

    #[test]
    fn csv_rows_pair_deltas_with_totals() {
        let cases: CumulativeSeries = vec![
            ("1/1/21".to_string(), 10),
            ("1/2/21".to_string(), 15),
            ("1/3/21".to_string(), 12),
        ]
        .into_iter()
        .collect();
        let h = Historical { cases, ..Historical::default() };
        let out = build_trend(&h, &TrendRequest::default()).unwrap();

        let path = std::env::temp_dir().join(format!("trend_export_{}.csv", std::process::id()));
        write_deltas_csv(&path, &out).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            text,
            "date,label,delta,cumulative\n2021-01-02,1/2/21,5,15\n2021-01-03,1/3/21,-3,12\n"
        );
    }
}
