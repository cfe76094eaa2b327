use polars::prelude::*;
use std::collections::HashMap;

/// Derive `local_inflation` and `dollar_inflation` via per-entity differencing
///
/// Rows are partitioned by `name` without re-sorting; within each partition
/// every row after the first gets `(price[i] - price[i-1]) / price[i]`. The
/// divisor is the current row's price, not the previous one. The first row of
/// each partition, rows with a missing name, and rows where either price is
/// missing or the current price is zero all get a null.
pub fn add_inflation_features(df: &DataFrame) -> PolarsResult<DataFrame> {
    let names = df.column("name")?.str()?;
    let local = df
        .column("local_price")?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let dollar = df
        .column("dollar_price")?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let local_inflation = grouped_fractional_change(names, local.f64()?);
    let dollar_inflation = grouped_fractional_change(names, dollar.f64()?);

    let mut out = df.clone();
    out.with_column(Series::new("local_inflation".into(), local_inflation))?;
    out.with_column(Series::new("dollar_inflation".into(), dollar_inflation))?;
    Ok(out)
}

/// Lag-1 fractional change within each key partition, in current row order.
fn grouped_fractional_change(
    keys: &StringChunked,
    values: &Float64Chunked,
) -> Vec<Option<f64>> {
    let mut previous: HashMap<&str, Option<f64>> = HashMap::new();
    let mut out = Vec::with_capacity(values.len());

    for (key, value) in keys.iter().zip(values.iter()) {
        let Some(key) = key else {
            // Rows without an entity name belong to no partition.
            out.push(None);
            continue;
        };

        let change = match previous.get(key) {
            Some(&Some(prev)) => match value {
                Some(current) if current != 0.0 => Some((current - prev) / current),
                _ => None,
            },
            _ => None, // first row of the partition, or previous price missing
        };

        previous.insert(key, value);
        out.push(change);
    }

    out
}
