//! Cumulative -> daily delta derivation.
//!
//! Assumptions (not validated here):
//! - the input is already in ascending chronological order
//! - the first date has no predecessor and is dropped, even if the series starts at zero
//! - gaps in the calendar are not filled, so a delta may span several days
//!
//! Decreasing cumulative values (upstream data corrections) produce negative deltas,
//! which are passed through unchanged.

use chrono::NaiveDate;

use crate::domain::{ChartPoint, CumulativeSeries, DeltaPoint};
use crate::error::AppError;

/// Date label formats accepted by [`to_chart_points`], tried in order.
///
/// disease.sh emits `M/D/YY` (e.g. `1/22/20`).
const DATE_FORMATS: [&str; 2] = ["%m/%d/%y", "%Y-%m-%d"];

/// Pair each entry with its predecessor and emit the difference.
///
/// Output length is `max(len - 1, 0)`.
pub fn build_delta_series<K: Clone>(series: &CumulativeSeries<K>) -> Vec<DeltaPoint<K>> {
    let mut out = Vec::with_capacity(series.len().saturating_sub(1));
    let mut prev: Option<i64> = None;

    for (date, value) in series.iter() {
        if let Some(p) = prev {
            out.push(DeltaPoint {
                date: date.clone(),
                delta: value - p,
            });
        }
        prev = Some(value);
    }

    out
}

/// Parse a date label from the upstream payload.
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    let trimmed = label.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Turn string-dated deltas into `{x, y}` chart points, keeping order.
pub fn to_chart_points(deltas: &[DeltaPoint<String>]) -> Result<Vec<ChartPoint>, AppError> {
    deltas
        .iter()
        .map(|p| {
            let x = parse_date_label(&p.date)
                .ok_or_else(|| AppError::data(format!("Unrecognized date label '{}'.", p.date)))?;
            Ok(ChartPoint { x, y: p.delta })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, i64)]) -> CumulativeSeries {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn pairs(deltas: &[DeltaPoint]) -> Vec<(&str, i64)> {
        deltas.iter().map(|p| (p.date.as_str(), p.delta)).collect()
    }

    #[test]
    fn empty_and_single_entry_yield_nothing() {
        assert!(build_delta_series(&series(&[])).is_empty());
        assert!(build_delta_series(&series(&[("d0", 42)])).is_empty());
    }

    #[test]
    fn daily_increments_follow_input_order() {
        let input = series(&[
            ("2021-01-01", 10),
            ("2021-01-02", 15),
            ("2021-01-03", 15),
            ("2021-01-04", 30),
        ]);
        let out = build_delta_series(&input);
        assert_eq!(
            pairs(&out),
            vec![("2021-01-02", 5), ("2021-01-03", 0), ("2021-01-04", 15)]
        );
    }

    #[test]
    fn corrections_produce_negative_deltas() {
        let out = build_delta_series(&series(&[("d1", 100), ("d2", 90)]));
        assert_eq!(pairs(&out), vec![("d2", -10)]);
    }

    #[test]
    fn unsorted_input_is_paired_as_given() {
        // Keys out of calendar order: pairing still follows iteration order.
        let out = build_delta_series(&series(&[("c", 5), ("a", 1), ("b", 10)]));
        assert_eq!(pairs(&out), vec![("a", -4), ("b", 9)]);
    }

    #[test]
    fn length_pairing_and_order_hold_for_many_lengths() {
        for n in 0..25usize {
            let input: CumulativeSeries<usize> =
                (0..n).map(|i| (i, (i * i) as i64 - 3 * i as i64)).collect();
            let out = build_delta_series(&input);
            assert_eq!(out.len(), n.saturating_sub(1));

            let entries = input.entries();
            for i in 1..n {
                assert_eq!(out[i - 1].date, entries[i].0);
                assert_eq!(out[i - 1].delta, entries[i].1 - entries[i - 1].1);
            }
        }
    }

    #[test]
    fn repeated_builds_are_identical() {
        let input = series(&[("1/1/21", 3), ("1/2/21", 9), ("1/3/21", 4)]);
        assert_eq!(build_delta_series(&input), build_delta_series(&input));
    }

    #[test]
    fn parses_upstream_and_iso_labels() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        assert_eq!(parse_date_label("1/22/20"), Some(d));
        assert_eq!(parse_date_label("01/22/20"), Some(d));
        assert_eq!(parse_date_label("2020-01-22"), Some(d));
        assert_eq!(parse_date_label("yesterday"), None);
    }

    #[test]
    fn chart_points_keep_order_and_values() {
        let deltas = vec![
            DeltaPoint { date: "1/2/21".to_string(), delta: 7 },
            DeltaPoint { date: "1/3/21".to_string(), delta: -2 },
        ];
        let points = to_chart_points(&deltas).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert_eq!(points[0].y, 7);
        assert_eq!(points[1].y, -2);
    }

    #[test]
    fn chart_points_reject_bad_labels() {
        let deltas = vec![DeltaPoint { date: "d2".to_string(), delta: 1 }];
        let err = to_chart_points(&deltas).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
        assert!(err.message().contains("'d2'"));
    }
}
