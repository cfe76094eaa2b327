use polars::prelude::*;
use serde_json::{json, Value};

const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 150;

/// Errors produced while building a chart from a DataFrame
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("missing column '{0}' in chart input")]
    MissingColumn(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// A Vega-Lite chart specification ready for an external renderer
#[derive(Debug, Clone)]
pub struct ChartSpec {
    spec: Value,
}

impl ChartSpec {
    /// The underlying Vega-Lite document
    pub fn to_value(&self) -> &Value {
        &self.spec
    }

    pub fn into_value(self) -> Value {
        self.spec
    }

    /// Pretty-printed JSON, suitable for handing to a Vega-Lite renderer
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.spec).unwrap_or_default()
    }

    /// Number of inline data points carried by the chart
    pub fn num_points(&self) -> usize {
        self.spec["data"]["values"]
            .as_array()
            .map(|values| values.len())
            .unwrap_or(0)
    }
}

/// Build the inflation scatter chart over a cleaned price table
///
/// Point mark, `local_inflation` on x, `dollar_inflation` on y, color and
/// tooltip keyed by `currency_code`, 600x150, pan/zoom bound to the scales.
/// One data value per input row; an empty table produces an empty but valid
/// chart.
pub fn inflation_scatter(df: &DataFrame) -> Result<ChartSpec, ChartError> {
    let codes = required_column(df, "currency_code")?.str()?;
    let local = required_column(df, "local_inflation")?.f64()?;
    let dollar = required_column(df, "dollar_inflation")?.f64()?;

    let mut values = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        values.push(json!({
            "currency_code": codes.get(i),
            "local_inflation": local.get(i),
            "dollar_inflation": dollar.get(i),
        }));
    }

    let spec = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "width": CHART_WIDTH,
        "height": CHART_HEIGHT,
        "data": { "values": values },
        "mark": "point",
        "encoding": {
            "x": { "field": "local_inflation", "type": "quantitative" },
            "y": { "field": "dollar_inflation", "type": "quantitative" },
            "color": { "field": "currency_code", "type": "nominal" },
            "tooltip": [
                { "field": "currency_code", "type": "nominal" },
                { "field": "local_inflation", "type": "quantitative" },
                { "field": "dollar_inflation", "type": "quantitative" }
            ]
        },
        "params": [
            { "name": "pan_zoom", "select": "interval", "bind": "scales" }
        ]
    });

    Ok(ChartSpec { spec })
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ChartError> {
    df.column(name)
        .map_err(|_| ChartError::MissingColumn(name.to_string()))
}
