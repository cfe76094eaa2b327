//! Ingestion of Big Mac index price data.
//!
//! The pipeline is agnostic about where its table comes from; this module
//! covers the one format the dataset ships in (CSV) plus conversions between
//! DataFrames and typed [`PriceRecord`](crate::core::domain::PriceRecord)s.

pub mod csv_parser;

#[cfg(test)]
mod csv_parser_tests;

pub use csv_parser::{dataframe_to_records, parse_prices_csv, records_to_dataframe};
