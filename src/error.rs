//! Error types for the catcher selection engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur during a daily selection run.

use thiserror::Error;

/// The main error type for the selection engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use catcher_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheduler.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheduler.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration was parsed but contains invalid or inconsistent values.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// A stored person record contained data the engine cannot interpret.
    #[error("Invalid person field '{field}': {message}")]
    InvalidPerson {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The weighted selector was invoked with an empty candidate list.
    ///
    /// The orchestration layer guarantees at least one candidate before
    /// drawing, so this indicates a caller bug rather than a data problem.
    #[error("Weighted selection requires at least one candidate")]
    EmptyCandidateList,

    /// A database operation failed.
    ///
    /// Persistence failures are fatal for the current run; the transactional
    /// recorder guarantees no half-written selection is left behind.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/scheduler.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/scheduler.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_invalid_displays_message() {
        let error = EngineError::ConfigInvalid {
            message: "retention_days (10) must be >= lookback_days (30)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: retention_days (10) must be >= lookback_days (30)"
        );
    }

    #[test]
    fn test_invalid_person_displays_field_and_message() {
        let error = EngineError::InvalidPerson {
            field: "weekdays".to_string(),
            message: "contains no valid weekday digits".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid person field 'weekdays': contains no valid weekday digits"
        );
    }

    #[test]
    fn test_empty_candidate_list_message() {
        let error = EngineError::EmptyCandidateList;
        assert_eq!(
            error.to_string(),
            "Weighted selection requires at least one candidate"
        );
    }

    #[test]
    fn test_database_error_from_rusqlite() {
        let source = rusqlite::Error::InvalidQuery;
        let error = EngineError::from(source);
        assert!(error.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
