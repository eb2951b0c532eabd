//! Configuration validation.

use super::types::DetectorConfig;

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for DetectorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.pair_window_ms == 0 {
            errors.push(ConfigError {
                field: "pair_window_ms".to_string(),
                message: "a zero window can never pair any events".to_string(),
            });
        }
        if self.pair_window_ms > 60_000 {
            errors.push(ConfigError {
                field: "pair_window_ms".to_string(),
                message: format!(
                    "window of {} ms would correlate unrelated edits (max 60000)",
                    self.pair_window_ms
                ),
            });
        }
        if self.history_window == 0 {
            errors.push(ConfigError {
                field: "history_window".to_string(),
                message: "sequence analysis needs at least one event of history".to_string(),
            });
        }
        if self.history_window > 256 {
            errors.push(ConfigError {
                field: "history_window".to_string(),
                message: format!(
                    "history of {} events exceeds the bounded log (max 256)",
                    self.history_window
                ),
            });
        }

        errors
    }
}
