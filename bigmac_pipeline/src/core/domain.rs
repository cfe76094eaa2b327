//! Domain model for Big Mac index price observations.
//!
//! The pipeline itself operates on Polars DataFrames; `PriceRecord` is the
//! typed row-level view used when converting to and from external formats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price observation: one country's Big Mac price on one survey date.
///
/// The inflation fields are derived columns populated by the feature step.
/// They are `None` for the first observation of an entity and wherever the
/// fractional change is undefined (missing or zero price).
///
/// # Examples
///
/// ```
/// use bigmac_pipeline::core::domain::PriceRecord;
/// use chrono::NaiveDate;
///
/// let record = PriceRecord::new(
///     NaiveDate::from_ymd_opt(2010, 7, 1).unwrap(),
///     "USD",
///     "United States",
///     3.73,
///     3.73,
/// );
///
/// assert!(!record.has_inflation_features());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub currency_code: String,
    pub name: String,
    pub local_price: f64,
    pub dollar_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_inflation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_inflation: Option<f64>,
}

impl PriceRecord {
    /// Creates a raw observation without derived inflation features.
    pub fn new(
        date: NaiveDate,
        currency_code: impl Into<String>,
        name: impl Into<String>,
        local_price: f64,
        dollar_price: f64,
    ) -> Self {
        Self {
            date,
            currency_code: currency_code.into(),
            name: name.into(),
            local_price,
            dollar_price,
            local_inflation: None,
            dollar_inflation: None,
        }
    }

    /// Returns `true` once both derived inflation columns carry a value.
    pub fn has_inflation_features(&self) -> bool {
        self.local_inflation.is_some() && self.dollar_inflation.is_some()
    }

    /// Returns `true` if this row would be dropped by the inflation floor.
    ///
    /// Rows with a missing `local_inflation` count as extreme: a missing
    /// value never satisfies "strictly greater than the floor".
    ///
    /// # Examples
    ///
    /// ```
    /// use bigmac_pipeline::core::domain::PriceRecord;
    /// use chrono::NaiveDate;
    ///
    /// let mut record = PriceRecord::new(
    ///     NaiveDate::from_ymd_opt(2012, 1, 1).unwrap(),
    ///     "ARS",
    ///     "Argentina",
    ///     19.0,
    ///     4.64,
    /// );
    /// assert!(record.is_extreme(-20.0));
    ///
    /// record.local_inflation = Some(-25.0);
    /// assert!(record.is_extreme(-20.0));
    ///
    /// record.local_inflation = Some(0.05);
    /// assert!(!record.is_extreme(-20.0));
    /// ```
    pub fn is_extreme(&self, inflation_floor: f64) -> bool {
        !self
            .local_inflation
            .is_some_and(|value| value > inflation_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PriceRecord {
        PriceRecord::new(
            NaiveDate::from_ymd_opt(2011, 7, 1).unwrap(),
            "EUR",
            "Euro area",
            3.44,
            4.93,
        )
    }

    #[test]
    fn new_record_has_no_features() {
        let record = sample();
        assert!(!record.has_inflation_features());
        assert_eq!(record.currency_code, "EUR");
        assert_eq!(record.local_price, 3.44);
    }

    #[test]
    fn extreme_classification_respects_floor_and_missing() {
        let mut record = sample();
        assert!(record.is_extreme(-20.0), "missing inflation is extreme");

        record.local_inflation = Some(-19.999);
        assert!(!record.is_extreme(-20.0));

        record.local_inflation = Some(-20.0);
        assert!(record.is_extreme(-20.0), "floor itself is not strictly greater");

        record.local_inflation = Some(-25.0);
        assert!(record.is_extreme(-20.0));
    }

    #[test]
    fn serde_roundtrip_skips_missing_features() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("local_inflation"));

        let back: PriceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
