//! Series derivations.
//!
//! - cumulative -> daily delta pairing (`build_delta_series`)
//! - date label parsing and chart point conversion (`to_chart_points`)

pub mod delta;

pub use delta::*;
