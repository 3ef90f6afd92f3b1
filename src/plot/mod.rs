pub mod chart;
pub mod glyphs;

pub use chart::{Chart, Series};
