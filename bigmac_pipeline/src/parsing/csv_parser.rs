use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::PriceRecord;

/// Parse a Big Mac index CSV file into a Polars DataFrame
///
/// `currency_code` and `name` are forced to String and the price columns to
/// Float64, since integer-looking prices are otherwise inferred as i64. The
/// `date` column stays a string; parsing it is the normalization step's job.
pub fn parse_prices_csv(csv_path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .context("Failed to parse CSV into DataFrame")?;

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut lazy_df = df.lazy();

    for col_name in ["currency_code", "name"] {
        if column_names.contains(&col_name.to_string()) {
            lazy_df = lazy_df.with_column(col(col_name).cast(DataType::String));
        }
    }

    for col_name in ["local_price", "dollar_price"] {
        if column_names.contains(&col_name.to_string()) {
            lazy_df = lazy_df.with_column(
                when(col(col_name).is_not_null())
                    .then(col(col_name).cast(DataType::Float64))
                    .otherwise(lit(NULL).cast(DataType::Float64))
                    .alias(col_name),
            );
        }
    }

    lazy_df
        .collect()
        .context("Failed to cast columns to expected types")
}

/// Convert typed price records to a Polars DataFrame
///
/// The `date` column is emitted with the Date dtype, which the normalization
/// step passes through untouched.
pub fn records_to_dataframe(records: &[PriceRecord]) -> Result<DataFrame> {
    let n = records.len();
    let epoch = NaiveDate::default();

    let mut dates = Vec::with_capacity(n);
    let mut codes = Vec::with_capacity(n);
    let mut names = Vec::with_capacity(n);
    let mut local_prices = Vec::with_capacity(n);
    let mut dollar_prices = Vec::with_capacity(n);
    let mut local_inflations = Vec::with_capacity(n);
    let mut dollar_inflations = Vec::with_capacity(n);

    for record in records {
        dates.push((record.date - epoch).num_days() as i32);
        codes.push(record.currency_code.clone());
        names.push(record.name.clone());
        local_prices.push(record.local_price);
        dollar_prices.push(record.dollar_price);
        local_inflations.push(record.local_inflation);
        dollar_inflations.push(record.dollar_inflation);
    }

    let mut df = df!(
        "date" => dates,
        "currency_code" => codes,
        "name" => names,
        "local_price" => local_prices,
        "dollar_price" => dollar_prices,
        "local_inflation" => local_inflations,
        "dollar_inflation" => dollar_inflations,
    )?;

    let date_col = df
        .column("date")?
        .as_materialized_series()
        .cast(&DataType::Date)?;
    df.with_column(date_col)?;

    Ok(df)
}

/// Convert a normalized DataFrame back to typed price records
///
/// Requires the `date` column to carry the Date dtype already; run
/// `set_dtypes` first on raw string-dated tables. The inflation columns are
/// optional and default to missing.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<PriceRecord>> {
    let height = df.height();
    let epoch = NaiveDate::default();

    let dates = df
        .column("date")?
        .as_materialized_series()
        .date()
        .context("date column must be normalized to the Date dtype")?
        .clone();
    let codes = df.column("currency_code")?.str()?;
    let names = df.column("name")?.str()?;
    let local_prices = df.column("local_price")?.f64()?;
    let dollar_prices = df.column("dollar_price")?.f64()?;

    let local_inflations = df
        .column("local_inflation")
        .ok()
        .and_then(|c| c.f64().ok());
    let dollar_inflations = df
        .column("dollar_inflation")
        .ok()
        .and_then(|c| c.f64().ok());

    let mut records = Vec::with_capacity(height);
    for i in 0..height {
        let days = dates
            .phys
            .get(i)
            .with_context(|| format!("Missing date at row {}", i))?;
        let date = epoch
            .checked_add_signed(chrono::Duration::days(days as i64))
            .with_context(|| format!("Date out of range at row {}", i))?;

        let record = PriceRecord {
            date,
            currency_code: codes
                .get(i)
                .with_context(|| format!("Missing currency_code at row {}", i))?
                .to_string(),
            name: names
                .get(i)
                .with_context(|| format!("Missing name at row {}", i))?
                .to_string(),
            local_price: local_prices
                .get(i)
                .with_context(|| format!("Missing local_price at row {}", i))?,
            dollar_price: dollar_prices
                .get(i)
                .with_context(|| format!("Missing dollar_price at row {}", i))?,
            local_inflation: local_inflations.and_then(|col| col.get(i)),
            dollar_inflation: dollar_inflations.and_then(|col| col.get(i)),
        };

        records.push(record);
    }

    Ok(records)
}
