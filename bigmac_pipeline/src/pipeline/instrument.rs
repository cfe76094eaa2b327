use polars::prelude::*;
use std::time::Instant;

/// Run one pipeline step, logging its name, output shape and elapsed time
///
/// Emits a single `log::info!` line per successful invocation. Errors from
/// the step propagate unchanged and produce no log line.
pub fn log_step<F>(name: &str, step: F) -> PolarsResult<DataFrame>
where
    F: FnOnce() -> PolarsResult<DataFrame>,
{
    let start = Instant::now();
    let df = step()?;
    log::info!(
        "just ran step {} shape=({}, {}) took {:?}",
        name,
        df.height(),
        df.width(),
        start.elapsed()
    );
    Ok(df)
}
