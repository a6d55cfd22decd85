//! Error types shared across Warden crates.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is outside its accepted range
    #[error("Invalid value for `{field}`: {value} ({reason})")]
    InvalidValue {
        /// Field name as it appears in the config file
        field: &'static str,
        /// Offending value
        value: f32,
        /// Why the value was rejected
        reason: &'static str,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`].
    #[must_use]
    pub const fn invalid(field: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value,
            reason,
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::invalid("max_health", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for `max_health`: -1 (must be positive)"
        );
    }
}
