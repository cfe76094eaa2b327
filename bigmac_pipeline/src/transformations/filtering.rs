use polars::prelude::*;
use std::collections::HashMap;

/// Drop sparse currency groups, then extreme inflation outliers
///
/// The two filters are independent and applied in sequence; surviving rows
/// keep their relative order and the column set is unchanged.
pub fn remove_outliers(
    df: &DataFrame,
    min_row_country: usize,
    inflation_floor: f64,
) -> PolarsResult<DataFrame> {
    let kept = filter_sparse_currencies(df, min_row_country)?;
    filter_inflation_floor(&kept, inflation_floor)
}

/// Keep rows whose `currency_code` group has at least `min_row_country` rows
///
/// Group sizes count rows with a present `name` only, so nameless rows
/// contribute nothing to their group's support.
pub fn filter_sparse_currencies(
    df: &DataFrame,
    min_row_country: usize,
) -> PolarsResult<DataFrame> {
    let codes = df.column("currency_code")?.str()?;
    let names = df.column("name")?.str()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (code, name) in codes.iter().zip(names.iter()) {
        if let (Some(code), Some(_)) = (code, name) {
            *counts.entry(code).or_insert(0) += 1;
        }
    }

    let keep: Vec<bool> = codes
        .iter()
        .map(|code| {
            code.map(|c| counts.get(c).is_some_and(|n| *n >= min_row_country))
                .unwrap_or(false)
        })
        .collect();
    df.filter(&BooleanChunked::from_slice("keep".into(), &keep))
}

/// Keep rows with `local_inflation` strictly greater than the floor
///
/// A missing `local_inflation` never satisfies the comparison, so the first
/// row of every entity partition is dropped here.
pub fn filter_inflation_floor(df: &DataFrame, inflation_floor: f64) -> PolarsResult<DataFrame> {
    let inflation = df.column("local_inflation")?.f64()?;

    let keep: Vec<bool> = inflation
        .iter()
        .map(|value| value.is_some_and(|v| v > inflation_floor))
        .collect();
    df.filter(&BooleanChunked::from_slice("keep".into(), &keep))
}
