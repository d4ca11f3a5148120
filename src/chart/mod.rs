//! Chart hand-off: colour table and the declarative chart description.

pub mod palette;
pub mod spec;

pub use palette::*;
pub use spec::*;
