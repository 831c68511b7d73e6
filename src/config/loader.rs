//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the scheduler
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::SchedulerConfig;

/// Loads and provides access to the scheduler configuration.
///
/// # Example
///
/// ```no_run
/// use catcher_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./scheduler.yaml").unwrap();
/// let config = loader.config();
/// println!("lookback window: {} days", config.history.lookback_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchedulerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file and validates it.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./scheduler.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - Cross-field validation fails (see [`SchedulerConfig::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: SchedulerConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, validating it first.
    ///
    /// Used by tests and embedders that construct the configuration in code
    /// rather than from a file.
    pub fn from_config(config: SchedulerConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let err = ConfigLoader::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_yaml_is_parse_error() {
        let file = write_temp_config("notifier: [unclosed");
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_temp_config(
            r#"
notifier:
  webhook_url: "https://hooks.example.com/duty"
database:
  path: "/var/lib/catcher/user.db"
"#,
        );
        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.config().database.path, "/var/lib/catcher/user.db");
        assert_eq!(loader.config().history.lookback_days, 30);
    }

    #[test]
    fn test_load_rejects_invalid_windows() {
        let file = write_temp_config(
            r#"
notifier:
  webhook_url: "https://hooks.example.com/duty"
history:
  lookback_days: 60
  retention_days: 30
"#,
        );
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_from_config_validates() {
        let err = ConfigLoader::from_config(SchedulerConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigInvalid { .. }));
    }
}
