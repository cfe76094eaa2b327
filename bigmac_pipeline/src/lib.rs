//! Big Mac index price-cleaning pipeline.
//!
//! Takes a raw Big Mac price table, normalizes dtypes and sort order, derives
//! per-country inflation features, removes sparse currency groups and extreme
//! outlier rows, and builds a scatter-chart specification of the result.

pub mod charts;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod transformations;

pub use pipeline::{clean_prices, CleaningConfig, CleaningPipeline, CleaningResult};
