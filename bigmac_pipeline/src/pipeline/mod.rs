pub mod instrument;
pub mod runner;

pub use instrument::log_step;
pub use runner::{clean_prices, CleaningConfig, CleaningPipeline, CleaningResult};
