//! Configuration types for the selection engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the scheduler YAML file. Every section has
//! defaults matching the engine's stock tuning, so a minimal configuration
//! file only needs the notifier webhook URL.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Tuning constants for the weight calculator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Starting weight every candidate receives.
    pub base_weight: f64,
    /// Bonus applied instead of days-since-selection for people who have
    /// never been selected. Strongly favors never-picked people.
    pub never_selected_bonus: f64,
    /// Penalty for having been the catcher on the last working day.
    ///
    /// Only applied when an alternative candidate exists.
    pub last_working_day_penalty: f64,
    /// Penalty per selection inside the lookback window.
    pub frequency_penalty_multiplier: f64,
    /// Lower bound for any computed weight. Must be positive so frequency
    /// penalties alone can never make a candidate unselectable.
    pub minimum_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            base_weight: 100.0,
            never_selected_bonus: 365.0,
            last_working_day_penalty: 50.0,
            frequency_penalty_multiplier: 5.0,
            minimum_weight: 1.0,
        }
    }
}

/// Windows governing the selection history.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Trailing day count used to compute recent-selection frequency.
    pub lookback_days: u32,
    /// Trailing day count of history retained before pruning.
    ///
    /// Must be at least `lookback_days` so pruning never removes records
    /// the weight calculator still reads.
    pub retention_days: u32,
    /// Probability that a maintenance prune runs after a committed
    /// selection. Must be within `[0, 1]`.
    pub cleanup_probability: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            retention_days: 90,
            cleanup_probability: 0.1,
        }
    }
}

/// Holiday oracle settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    /// Endpoint answering whether the given day is a public holiday
    /// (HTTP 200 = holiday, 204 = not a holiday). `None` disables the
    /// network lookup and uses only the static regional table.
    pub api_url: Option<String>,
    /// Request timeout for the holiday endpoint, in seconds.
    pub timeout_secs: u64,
    /// Region code for the static holiday table fallback (German state,
    /// e.g. "BW").
    pub region: String,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            api_url: Some(
                "https://date.nager.at/Api/v3/IsTodayPublicHoliday/DE?countyCode=DE-BW"
                    .to_string(),
            ),
            timeout_secs: 5,
            region: "BW".to_string(),
        }
    }
}

/// Webhook notifier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Webhook endpoint receiving the selection. Required.
    pub webhook_url: String,
    /// Request timeout, in seconds.
    #[serde(default = "default_notifier_timeout")]
    pub timeout_secs: u64,
    /// Maximum delivery attempts.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, in seconds; doubles on each attempt.
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_secs: u64,
}

fn default_notifier_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_retry_delay() -> u64 {
    2
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_notifier_timeout(),
            max_retries: default_max_retries(),
            initial_retry_delay_secs: default_initial_retry_delay(),
        }
    }
}

/// Database location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "user.db".to_string(),
        }
    }
}

/// The complete scheduler configuration.
///
/// # Example
///
/// ```
/// use catcher_engine::config::SchedulerConfig;
///
/// let yaml = r#"
/// notifier:
///   webhook_url: "https://hooks.example.com/duty"
/// history:
///   lookback_days: 30
///   retention_days: 90
/// "#;
/// let config: SchedulerConfig = serde_yaml::from_str(yaml).unwrap();
/// config.validate().unwrap();
/// assert_eq!(config.weights.base_weight, 100.0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Weight calculator tuning.
    pub weights: WeightConfig,
    /// History lookback/retention windows.
    pub history: HistoryConfig,
    /// Holiday oracle settings.
    pub holiday: HolidayConfig,
    /// Webhook notifier settings.
    pub notifier: NotifierConfig,
    /// Database location.
    pub database: DatabaseConfig,
}

impl SchedulerConfig {
    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigInvalid`] if:
    /// - the notifier webhook URL is empty,
    /// - `retention_days` is smaller than `lookback_days`,
    /// - `cleanup_probability` lies outside `[0, 1]`,
    /// - `minimum_weight` is not positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.notifier.webhook_url.trim().is_empty() {
            return Err(EngineError::ConfigInvalid {
                message: "notifier.webhook_url is required".to_string(),
            });
        }
        if self.history.retention_days < self.history.lookback_days {
            return Err(EngineError::ConfigInvalid {
                message: format!(
                    "retention_days ({}) must be >= lookback_days ({})",
                    self.history.retention_days, self.history.lookback_days
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.history.cleanup_probability) {
            return Err(EngineError::ConfigInvalid {
                message: format!(
                    "cleanup_probability ({}) must be within [0, 1]",
                    self.history.cleanup_probability
                ),
            });
        }
        if self.weights.minimum_weight <= 0.0 {
            return Err(EngineError::ConfigInvalid {
                message: format!(
                    "minimum_weight ({}) must be positive",
                    self.weights.minimum_weight
                ),
            });
        }
        Ok(())
    }
}
