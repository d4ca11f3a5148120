//! Input/output helpers.
//!
//! - delta exports (CSV) (`export`)
//! - chart JSON read/write (`chart`)

pub mod chart;
pub mod export;

pub use chart::*;
pub use export::*;
