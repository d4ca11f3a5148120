//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the upstream field selector (`CaseKind`) and query scope (`Scope`)
//! - the ordered cumulative input (`CumulativeSeries`)
//! - derived outputs (`DeltaPoint`, `ChartPoint`)

pub mod types;

pub use types::*;
