//! Data transformation steps for the price-cleaning pipeline.
//!
//! Each function here is one pipeline step: a pure DataFrame-in,
//! DataFrame-out transformation that never mutates its input.
//!
//! # Modules
//!
//! - [`cleaning`]: Copy the source table, parse dtypes, establish sort order
//! - [`features`]: Derive per-country inflation features
//! - [`filtering`]: Drop sparse currency groups and extreme outlier rows

pub mod cleaning;
pub mod features;
pub mod filtering;

pub use cleaning::{set_dtypes, start_pipeline};
pub use features::add_inflation_features;
pub use filtering::{filter_inflation_floor, filter_sparse_currencies, remove_outliers};
