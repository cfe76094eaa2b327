use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Write;

use crate::core::domain::PriceRecord;
use crate::parsing::csv_parser::{
    dataframe_to_records, parse_prices_csv, records_to_dataframe,
};
use crate::transformations::cleaning::set_dtypes;

fn sample_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new(
            NaiveDate::from_ymd_opt(2010, 7, 1).unwrap(),
            "USD",
            "United States",
            3.73,
            3.73,
        ),
        PriceRecord::new(
            NaiveDate::from_ymd_opt(2011, 7, 1).unwrap(),
            "USD",
            "United States",
            4.07,
            4.07,
        ),
    ]
}

#[test]
fn test_parse_prices_csv_casts_integer_prices() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,currency_code,name,local_price,dollar_price").unwrap();
    writeln!(file, "2010-07-01,USD,United States,4,4").unwrap();
    writeln!(file, "2010-07-01,JPY,Japan,320,3.67").unwrap();
    file.flush().unwrap();

    let df = parse_prices_csv(file.path()).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.column("date").unwrap().dtype(), &DataType::String);
    assert_eq!(
        df.column("local_price").unwrap().dtype(),
        &DataType::Float64
    );
    assert_eq!(
        df.column("dollar_price").unwrap().dtype(),
        &DataType::Float64
    );

    let prices = df.column("local_price").unwrap().f64().unwrap();
    assert_eq!(prices.get(1), Some(320.0));
}

#[test]
fn test_records_to_dataframe_emits_date_dtype() {
    let df = records_to_dataframe(&sample_records()).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);

    let codes = df.column("currency_code").unwrap().str().unwrap();
    assert_eq!(codes.get(0), Some("USD"));

    // Derived columns exist but are all-null on raw records.
    let inflation = df.column("local_inflation").unwrap().f64().unwrap();
    assert_eq!(inflation.get(0), None);
}

#[test]
fn test_record_roundtrip_preserves_values() {
    let records = sample_records();
    let df = records_to_dataframe(&records).unwrap();
    let back = dataframe_to_records(&df).unwrap();

    assert_eq!(back, records);
}

#[test]
fn test_roundtrip_through_normalization() {
    let records = sample_records();
    let df = records_to_dataframe(&records).unwrap();

    // Record-built frames are already Date-typed, so set_dtypes only sorts.
    let normalized = set_dtypes(&df).unwrap();
    let back = dataframe_to_records(&normalized).unwrap();

    assert_eq!(back, records);
}

#[test]
fn test_dataframe_to_records_requires_date_dtype() {
    let df = df!(
        "date" => &["2010-07-01"],
        "currency_code" => &["USD"],
        "name" => &["United States"],
        "local_price" => &[3.73],
        "dollar_price" => &[3.73],
    )
    .unwrap();

    let err = dataframe_to_records(&df).unwrap_err();
    assert!(err.to_string().contains("Date dtype"));
}
