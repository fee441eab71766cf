//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A layer did not fit the configuration schema once merged.
    #[error("invalid configuration from {origin}: {source}")]
    InvalidLayer {
        /// Where the layer came from (file path, `string`, ...).
        origin: String,
        /// Underlying error, e.g. an unknown field.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Explanation of the parsing error.
        reason: String,
    },

    /// A `.env` file could not be loaded.
    #[error("failed to load environment file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// Validation error after loading.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid layer error.
    pub fn invalid_layer(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidLayer {
            origin: origin.into(),
            source,
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/quarry.toml");
        assert!(err.to_string().contains("/path/to/quarry.toml"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("params.max_pairs", "must be greater than zero");
        assert!(err.to_string().contains("params.max_pairs"));
        assert!(err.to_string().contains("must be greater than zero"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("QUARRY__PARAMS__MAX_PAIRS", "expected integer");
        assert!(err.to_string().contains("QUARRY__PARAMS__MAX_PAIRS"));
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_invalid_layer_error() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = ConfigError::invalid_layer("quarry.toml", source);
        assert!(err.to_string().starts_with("invalid configuration from quarry.toml"));
    }

    #[test]
    fn test_validation_error() {
        let err = ConfigError::validation_error("service.name must not be empty");
        assert!(err.to_string().contains("service.name must not be empty"));
    }
}
