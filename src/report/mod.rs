//! Reporting utilities: summary statistics, labels, and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::ChartPoint;

pub mod format;
pub mod labels;

pub use format::*;
pub use labels::*;

/// Summary of a daily-delta series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendStats {
    pub n_points: usize,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    /// Sum of all deltas (net change over the window, first day excluded).
    pub total: i64,
    pub mean: f64,
    /// Largest single-day increase (earliest on ties).
    pub peak: Option<ChartPoint>,
    /// Smallest delta; negative when the upstream corrected its totals.
    pub trough: Option<ChartPoint>,
    pub latest: Option<ChartPoint>,
}

/// Compute summary statistics over chart points.
pub fn compute_stats(points: &[ChartPoint]) -> TrendStats {
    let total: i64 = points.iter().map(|p| p.y).sum();
    let mean = if points.is_empty() {
        0.0
    } else {
        total as f64 / points.len() as f64
    };

    let mut peak: Option<ChartPoint> = None;
    let mut trough: Option<ChartPoint> = None;
    for p in points {
        if peak.is_none_or(|best| p.y > best.y) {
            peak = Some(*p);
        }
        if trough.is_none_or(|worst| p.y < worst.y) {
            trough = Some(*p);
        }
    }

    TrendStats {
        n_points: points.len(),
        first: points.first().map(|p| p.x),
        last: points.last().map(|p| p.x),
        total,
        mean,
        peak,
        trough,
        latest: points.last().copied(),
    }
}

/// The last `n` points (all of them if fewer).
pub fn recent(points: &[ChartPoint], n: usize) -> &[ChartPoint] {
    &points[points.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(day: u32, y: i64) -> ChartPoint {
        ChartPoint {
            x: NaiveDate::from_ymd_opt(2021, 3, day).unwrap(),
            y,
        }
    }

    #[test]
    fn stats_basic() {
        let points = vec![pt(2, 5), pt(3, 40), pt(4, -10), pt(5, 40), pt(6, 25)];
        let stats = compute_stats(&points);

        assert_eq!(stats.n_points, 5);
        assert_eq!(stats.total, 100);
        assert!((stats.mean - 20.0).abs() < 1e-12);
        assert_eq!(stats.peak, Some(pt(3, 40)));
        assert_eq!(stats.trough, Some(pt(4, -10)));
        assert_eq!(stats.latest, Some(pt(6, 25)));
        assert_eq!(stats.first, Some(pt(2, 0).x));
        assert_eq!(stats.last, Some(pt(6, 0).x));
    }

    #[test]
    fn stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.n_points, 0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.peak, None);
        assert_eq!(stats.latest, None);
    }

    #[test]
    fn recent_takes_tail() {
        let points = vec![pt(2, 1), pt(3, 2), pt(4, 3)];
        assert_eq!(recent(&points, 2), &points[1..]);
        assert_eq!(recent(&points, 10), &points[..]);
        assert!(recent(&points, 0).is_empty());
    }
}
