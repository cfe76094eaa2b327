use chrono::NaiveDate;
use polars::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Copy the source DataFrame so later steps never touch caller-owned data
pub fn start_pipeline(df: &DataFrame) -> PolarsResult<DataFrame> {
    // Polars columns are copy-on-write: the clone is cheap, and a mutation on
    // either side rebuilds the affected column instead of writing through.
    Ok(df.clone())
}

/// Parse the `date` column into a Date dtype and sort by (currency_code, date)
///
/// The sort is stable, so rows that tie on both keys keep their original
/// relative order. Applying this step to an already-normalized frame is a
/// no-op.
pub fn set_dtypes(df: &DataFrame) -> PolarsResult<DataFrame> {
    let date = parse_date_column(df.column("date")?)?;
    df.column("currency_code")?;

    let mut df = df.clone();
    df.with_column(date)?;
    df.sort(
        ["currency_code", "date"],
        SortMultipleOptions::default().with_maintain_order(true),
    )
}

fn parse_date_column(column: &Column) -> PolarsResult<Series> {
    match column.dtype() {
        DataType::Date => Ok(column.as_materialized_series().clone()),
        DataType::String => {
            let values = column.str()?;
            let epoch = NaiveDate::default(); // 1970-01-01
            let mut days: Vec<Option<i32>> = Vec::with_capacity(values.len());
            for (row, value) in values.iter().enumerate() {
                match value {
                    Some(raw) => {
                        let parsed =
                            NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                                PolarsError::ComputeError(
                                    format!("Unparseable date '{}' at row {}: {}", raw, row, e)
                                        .into(),
                                )
                            })?;
                        days.push(Some((parsed - epoch).num_days() as i32));
                    }
                    None => days.push(None),
                }
            }
            Series::new("date".into(), days).cast(&DataType::Date)
        }
        other => Err(PolarsError::ComputeError(
            format!(
                "date column has dtype {:?}; expected String or Date",
                other
            )
            .into(),
        )),
    }
}
