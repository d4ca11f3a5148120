//! Upstream data access (disease.sh).

pub mod disease_sh;

pub use disease_sh::*;
