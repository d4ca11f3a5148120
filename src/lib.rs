//! `case-trends` library crate.
//!
//! The binary (`trend`) is a thin wrapper around this library so that:
//!
//! - the delta derivation and formatting are testable without spawning processes
//! - the chart description can be reused by other renderers
//!
//! Flow: `data` (disease.sh) -> `series` (daily deltas) -> `chart`/`report`/`plot`/`tui`.

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
