//! Shared "trend pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! disease.sh fetch -> field selection -> daily deltas -> chart points -> palette
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Deciding *when* to recompute also lives here (`TrendState`), not in the builder.

use crate::chart::{ChartSpec, Palette, build_chart_spec, palette_for};
use crate::data::{Historical, HistoricalSource};
use crate::domain::{ChartPoint, CumulativeSeries, DeltaPoint, TrendRequest};
use crate::error::AppError;
use crate::report::{TrendStats, compute_stats};
use crate::series::{build_delta_series, to_chart_points};

/// All computed outputs for one trend view.
#[derive(Debug, Clone)]
pub struct TrendOutput {
    pub request: TrendRequest,
    /// Country name echoed by the upstream, when the scope is a country.
    pub country: Option<String>,
    /// The selected upstream series, as received.
    pub cumulative: CumulativeSeries,
    pub deltas: Vec<DeltaPoint>,
    pub points: Vec<ChartPoint>,
    pub palette: Palette,
    pub stats: TrendStats,
}

impl TrendOutput {
    /// Declarative chart description for external renderers.
    pub fn chart_spec(&self) -> ChartSpec {
        build_chart_spec(self.request.kind, &self.request.scope, &self.points)
    }

    /// Label for headers: the upstream country name if known, else the scope.
    pub fn scope_label(&self) -> String {
        self.country
            .clone()
            .unwrap_or_else(|| self.request.scope.to_string())
    }
}

/// Fetch a document and derive the trend for `request`.
pub fn run_trend(source: &dyn HistoricalSource, request: &TrendRequest) -> Result<TrendOutput, AppError> {
    let historical = source.fetch(&request.scope, request.last_days)?;
    build_trend(&historical, request)
}

/// Derive the trend from an already-fetched document.
pub fn build_trend(historical: &Historical, request: &TrendRequest) -> Result<TrendOutput, AppError> {
    let series = historical.series(request.kind);
    let deltas = build_delta_series(series);
    let points = to_chart_points(&deltas)?;
    let stats = compute_stats(&points);

    log::debug!(
        "{} {}: {} cumulative entries -> {} deltas",
        request.scope,
        request.kind.field_name(),
        series.len(),
        deltas.len()
    );

    Ok(TrendOutput {
        request: request.clone(),
        country: historical.country.clone(),
        cumulative: series.clone(),
        deltas,
        points,
        palette: palette_for(request.kind),
        stats,
    })
}

/// What `TrendState::update` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A new document was fetched.
    Fetched,
    /// The cached document was reused for a different kind.
    Rederived,
    /// Nothing changed.
    Unchanged,
}

/// Last fetched document plus the output derived from it.
///
/// Recompute rule:
/// - `scope` or `last_days` changed -> fetch again
/// - only `kind` changed -> re-derive from the cached document
/// - identical request -> nothing
#[derive(Debug, Default)]
pub struct TrendState {
    historical: Option<Historical>,
    output: Option<TrendOutput>,
}

impl TrendState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Option<&TrendOutput> {
        self.output.as_ref()
    }

    pub fn update(&mut self, source: &dyn HistoricalSource, request: &TrendRequest) -> Result<Refresh, AppError> {
        let current = self.output.as_ref().map(|o| &o.request);
        let refresh = match (current, &self.historical) {
            (Some(cur), Some(_)) if cur == request => Refresh::Unchanged,
            (Some(cur), Some(_)) if !cur.needs_fetch_for(request) => Refresh::Rederived,
            _ => Refresh::Fetched,
        };

        match refresh {
            Refresh::Unchanged => {}
            Refresh::Rederived => {
                if let Some(historical) = &self.historical {
                    self.output = Some(build_trend(historical, request)?);
                }
            }
            Refresh::Fetched => self.refetch(source, request)?,
        }

        log::info!("{refresh:?}: {} {} ({}d)", request.scope, request.kind.field_name(), request.last_days);
        Ok(refresh)
    }

    /// Fetch unconditionally (e.g. a manual refresh).
    pub fn refetch(&mut self, source: &dyn HistoricalSource, request: &TrendRequest) -> Result<(), AppError> {
        let historical = source.fetch(&request.scope, request.last_days)?;
        let output = build_trend(&historical, request)?;
        self.historical = Some(historical);
        self.output = Some(output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::domain::{CaseKind, Scope};

    /// Serves a fixed document and counts fetches.
    struct StubSource {
        historical: Historical,
        fetches: Cell<usize>,
    }

    impl StubSource {
        fn new() -> Self {
            let series = |vals: &[i64]| -> CumulativeSeries {
                vals.iter()
                    .enumerate()
                    .map(|(i, v)| (format!("1/{}/21", i + 1), *v))
                    .collect()
            };
            Self {
                historical: Historical {
                    country: None,
                    cases: series(&[10, 15, 15, 30]),
                    deaths: series(&[1, 2, 4, 4]),
                    recovered: series(&[5, 3]),
                },
                fetches: Cell::new(0),
            }
        }
    }

    impl HistoricalSource for StubSource {
        fn fetch(&self, _scope: &Scope, last_days: u32) -> Result<Historical, AppError> {
            if last_days == 0 {
                return Err(AppError::usage("Number of days must be > 0."));
            }
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.historical.clone())
        }
    }

    #[test]
    fn build_trend_selects_field_and_palette() {
        let source = StubSource::new();
        let request = TrendRequest { kind: CaseKind::Deaths, ..TrendRequest::default() };
        let out = run_trend(&source, &request).unwrap();

        let ys: Vec<i64> = out.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1, 2, 0]);
        assert_eq!(out.deltas[0].date, "1/2/21");
        assert_eq!(out.palette, palette_for(CaseKind::Deaths));
        assert_eq!(out.stats.total, 3);
        assert_eq!(out.scope_label(), "global");
    }

    #[test]
    fn recovered_correction_passes_through() {
        let source = StubSource::new();
        let request = TrendRequest { kind: CaseKind::Recovered, ..TrendRequest::default() };
        let out = run_trend(&source, &request).unwrap();
        assert_eq!(out.points.len(), 1);
        assert_eq!(out.points[0].y, -2);
    }

    #[test]
    fn state_refetches_only_when_query_changes() {
        let source = StubSource::new();
        let mut state = TrendState::new();
        let base = TrendRequest::default();

        assert_eq!(state.update(&source, &base).unwrap(), Refresh::Fetched);
        assert_eq!(source.fetches.get(), 1);

        assert_eq!(state.update(&source, &base).unwrap(), Refresh::Unchanged);
        assert_eq!(source.fetches.get(), 1);

        let deaths = TrendRequest { kind: CaseKind::Deaths, ..base.clone() };
        assert_eq!(state.update(&source, &deaths).unwrap(), Refresh::Rederived);
        assert_eq!(source.fetches.get(), 1);
        assert_eq!(state.output().unwrap().request.kind, CaseKind::Deaths);

        let shorter = TrendRequest { last_days: 30, ..deaths.clone() };
        assert_eq!(state.update(&source, &shorter).unwrap(), Refresh::Fetched);
        assert_eq!(source.fetches.get(), 2);
    }

    #[test]
    fn failed_fetch_keeps_previous_output() {
        let source = StubSource::new();
        let mut state = TrendState::new();
        state.update(&source, &TrendRequest::default()).unwrap();

        let bad = TrendRequest { last_days: 0, ..TrendRequest::default() };
        assert!(state.update(&source, &bad).is_err());
        assert_eq!(state.output().unwrap().request, TrendRequest::default());
    }
}
