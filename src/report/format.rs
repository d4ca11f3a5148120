//! Formatted terminal output.
//!
//! Formatting lives in one place so the pipeline stays clean and output changes
//! are localized.

use crate::app::pipeline::TrendOutput;
use crate::domain::ChartPoint;
use crate::report::labels::{fmt_signed_thousands, fmt_tooltip_date};

/// Header + headline numbers for one trend.
pub fn format_summary(output: &TrendOutput) -> String {
    let req = &output.request;
    let stats = &output.stats;
    let mut out = String::new();

    out.push_str("=== trend - daily changes (disease.sh) ===\n");
    out.push_str(&format!("Kind: {}\n", req.kind.display_name()));
    out.push_str(&format!("Scope: {}\n", output.scope_label()));
    out.push_str(&format!("Window: last {} days\n", req.last_days));

    match (stats.first, stats.last) {
        (Some(first), Some(last)) => {
            out.push_str(&format!(
                "Range: {} .. {} | n={}\n",
                fmt_tooltip_date(first),
                fmt_tooltip_date(last),
                stats.n_points
            ));
        }
        _ => {
            out.push_str("Range: - | n=0 (need at least two days of data)\n");
            return out;
        }
    }

    out.push_str(&format!(
        "Net change: {} | mean/day: {:.1}\n",
        fmt_signed_thousands(stats.total),
        stats.mean
    ));
    if let Some(p) = stats.peak {
        out.push_str(&format!("Peak day: {}\n", fmt_point(&p)));
    }
    if let Some(p) = stats.trough.filter(|p| p.y < 0) {
        out.push_str(&format!("Largest correction: {}\n", fmt_point(&p)));
    }
    if let Some(p) = stats.latest {
        out.push_str(&format!("Latest: {}\n", fmt_point(&p)));
    }

    out
}

/// Table of the given rows (date, daily change).
pub fn format_table(rows: &[ChartPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<14} {:>14}\n", "date", "change"));
    out.push_str(&format!("{:-<14} {:-<14}\n", "", ""));
    for p in rows {
        out.push_str(&format!(
            "{:<14} {:>14}\n",
            fmt_tooltip_date(p.x),
            fmt_signed_thousands(p.y)
        ));
    }
    out
}

fn fmt_point(p: &ChartPoint) -> String {
    format!("{} on {}", fmt_signed_thousands(p.y), fmt_tooltip_date(p.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_trend;
    use crate::data::Historical;
    use crate::domain::{CumulativeSeries, TrendRequest};

    fn historical(vals: &[(&str, i64)]) -> Historical {
        let cases: CumulativeSeries = vals.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Historical { cases, ..Historical::default() }
    }

    #[test]
    fn summary_lists_headline_numbers() {
        let h = historical(&[("1/1/21", 1000), ("1/2/21", 2500), ("1/3/21", 2400), ("1/4/21", 3400)]);
        let out = build_trend(&h, &TrendRequest::default()).unwrap();
        let txt = format_summary(&out);

        assert!(txt.contains("Kind: Cases\n"));
        assert!(txt.contains("Scope: global\n"));
        assert!(txt.contains("Window: last 120 days\n"));
        assert!(txt.contains("Range: Jan 2, 2021 .. Jan 4, 2021 | n=3\n"));
        assert!(txt.contains("Net change: +2,400 | mean/day: 800.0\n"));
        assert!(txt.contains("Peak day: +1,500 on Jan 2, 2021\n"));
        assert!(txt.contains("Largest correction: -100 on Jan 3, 2021\n"));
        assert!(txt.contains("Latest: +1,000 on Jan 4, 2021\n"));
    }

    #[test]
    fn summary_without_points() {
        let h = historical(&[("1/1/21", 1000)]);
        let out = build_trend(&h, &TrendRequest::default()).unwrap();
        let txt = format_summary(&out);
        assert!(txt.contains("n=0"));
        assert!(!txt.contains("Peak day"));
    }

    #[test]
    fn table_golden() {
        let rows = vec![ChartPoint {
            x: chrono::NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
            y: 1234,
        }];
        let expected = concat!(
            "date                   change\n",
            "-------------- --------------\n",
            "Jan 2, 2021            +1,234\n",
        );
        assert_eq!(format_table(&rows), expected);
    }
}
