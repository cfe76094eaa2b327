use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

use crate::pipeline::instrument::log_step;
use crate::transformations::cleaning::{set_dtypes, start_pipeline};
use crate::transformations::features::add_inflation_features;
use crate::transformations::filtering::remove_outliers;

/// Configuration for the cleaning pipeline
#[derive(Debug, Clone)]
pub struct CleaningConfig {
    /// Minimum rows a `currency_code` group needs to survive filtering.
    pub min_row_country: usize,
    /// Rows with `local_inflation` at or below this value are discarded.
    pub inflation_floor: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_row_country: 32,
            inflation_floor: -20.0,
        }
    }
}

/// Result of a full pipeline run
#[derive(Debug)]
pub struct CleaningResult {
    pub dataframe: DataFrame,
    pub input_rows: usize,
    pub output_rows: usize,
    pub currencies_kept: usize,
}

/// The composed price-cleaning pipeline
///
/// Runs copy, dtype normalization, feature derivation and outlier filtering
/// strictly in sequence, each step instrumented with shape and timing.
pub struct CleaningPipeline {
    config: CleaningConfig,
}

impl CleaningPipeline {
    /// Create a pipeline with the default configuration
    pub fn new() -> Self {
        Self {
            config: CleaningConfig::default(),
        }
    }

    /// Create a pipeline with custom thresholds
    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Run every cleaning step over `source`
    ///
    /// The caller's DataFrame is never mutated; the first step copies it and
    /// each later step consumes its predecessor's output.
    pub fn run(&self, source: &DataFrame) -> Result<CleaningResult> {
        let input_rows = source.height();

        let df = log_step("start_pipeline", || start_pipeline(source))
            .context("Failed to copy the source table")?;
        let df = log_step("set_dtypes", || set_dtypes(&df))
            .context("Failed to normalize dtypes and sort order")?;
        let df = log_step("add_inflation_features", || add_inflation_features(&df))
            .context("Failed to derive inflation features")?;
        let df = log_step("remove_outliers", || {
            remove_outliers(&df, self.config.min_row_country, self.config.inflation_floor)
        })
        .context("Failed to filter outliers")?;

        let output_rows = df.height();
        let currencies_kept = count_unique_currencies(&df)?;

        Ok(CleaningResult {
            dataframe: df,
            input_rows,
            output_rows,
            currencies_kept,
        })
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the default pipeline and return just the cleaned DataFrame
pub fn clean_prices(source: &DataFrame) -> Result<DataFrame> {
    Ok(CleaningPipeline::new().run(source)?.dataframe)
}

fn count_unique_currencies(df: &DataFrame) -> Result<usize> {
    let codes = df.column("currency_code")?.str()?;
    let unique: HashSet<&str> = codes.iter().flatten().collect();
    Ok(unique.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "date" => &[
                "2010-07-01", "2011-07-01", "2012-07-01",
                "2010-07-01",
            ],
            "currency_code" => &["ARS", "ARS", "ARS", "BRL"],
            "name" => &["Argentina", "Argentina", "Argentina", "Brazil"],
            "local_price" => &[14.0, 20.0, 19.0, 8.71],
            "dollar_price" => &[3.56, 4.84, 4.16, 4.91],
        )
        .unwrap()
    }

    #[test]
    fn test_run_reports_consistent_statistics() {
        let source = sample_df();
        let pipeline = CleaningPipeline::with_config(CleaningConfig {
            min_row_country: 2,
            inflation_floor: -20.0,
        });

        let result = pipeline.run(&source).unwrap();

        // ARS keeps its two non-first rows; BRL falls to the group-size rule.
        assert_eq!(result.input_rows, 4);
        assert_eq!(result.output_rows, 2);
        assert_eq!(result.currencies_kept, 1);
        assert_eq!(result.dataframe.height(), result.output_rows);
    }

    #[test]
    fn test_run_leaves_source_untouched() {
        let source = sample_df();
        let pipeline = CleaningPipeline::new();

        pipeline.run(&source).unwrap();

        // Source still has its raw string dates and all rows.
        assert_eq!(source.height(), 4);
        assert_eq!(source.column("date").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_default_thresholds_match_domain_constants() {
        let config = CleaningConfig::default();
        assert_eq!(config.min_row_country, 32);
        assert_eq!(config.inflation_floor, -20.0);
    }

    #[test]
    fn test_run_fails_fast_on_bad_dates() {
        let df = df!(
            "date" => &["July 2010"],
            "currency_code" => &["USD"],
            "name" => &["United States"],
            "local_price" => &[3.73],
            "dollar_price" => &[3.73],
        )
        .unwrap();

        let err = clean_prices(&df).unwrap_err();
        assert!(format!("{:#}", err).contains("normalize"));
    }
}
