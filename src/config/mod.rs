//! Configuration loading for the selection engine.
//!
//! All tunable constants of the selection algorithm (base weight, penalties,
//! lookback and retention windows) live in an explicit configuration
//! structure passed into the components that use them, so multiple
//! configurations are testable side by side.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DatabaseConfig, HistoryConfig, HolidayConfig, NotifierConfig, SchedulerConfig, WeightConfig,
};
