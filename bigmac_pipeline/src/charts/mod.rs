//! Chart construction for the cleaned price table.
//!
//! Charts are built as Vega-Lite v5 specifications; rendering them is the
//! job of an external display surface.

pub mod scatter;

pub use scatter::{inflation_scatter, ChartError, ChartSpec};
