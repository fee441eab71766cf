//! Main configuration types.
//!
//! This module provides the top-level [`QuarryConfig`] struct and its builder.

use quarry_extract::ParamLimits;
use quarry_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, ParamsConfig, ServiceConfig};

/// Complete Quarry service configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use quarry_config::QuarryConfig;
///
/// let config = QuarryConfig::default();
/// assert_eq!(config.service.name, "quarry-service");
/// assert_eq!(config.params.max_pairs, 256);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct QuarryConfig {
    /// Service identity.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Parameter decoding limits.
    #[serde(default)]
    pub params: ParamsConfig,
}

impl QuarryConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> QuarryConfigBuilder {
        QuarryConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The service name is empty
    /// - The log level is not a valid filter directive
    /// - A parameter limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "service.name",
                "must not be empty",
            ));
        }

        if self.logging.enabled {
            if let Err(e) = quarry_telemetry::create_env_filter(&self.logging.level) {
                return Err(ConfigError::invalid_value("logging.level", e.to_string()));
            }
        }

        if self.params.max_query_length == 0 {
            return Err(ConfigError::invalid_value(
                "params.max_query_length",
                "must be greater than zero",
            ));
        }

        if self.params.max_pairs == 0 {
            return Err(ConfigError::invalid_value(
                "params.max_pairs",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty debug logs with source locations and span events.
    ///
    /// # Example
    ///
    /// ```
    /// use quarry_config::QuarryConfig;
    ///
    /// let config = QuarryConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.span_events = true;
        config.logging.include_location = true;

        config.service.environment = "development".to_string();

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON info logs.
    ///
    /// # Example
    ///
    /// ```
    /// use quarry_config::{LogFormat, QuarryConfig};
    ///
    /// let config = QuarryConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.span_events = false;
        config.logging.include_location = false;

        config.service.environment = "production".to_string();

        config
    }

    /// Returns the logging setup for this service.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.logging.enabled,
            level: self.logging.level.clone(),
            json_format: self.logging.format == LogFormat::Json,
            span_events: self.logging.span_events,
            file_line_info: self.logging.include_location,
            thread_ids: self.logging.thread_ids,
            include_target: self.logging.include_target,
            service_name: self.service.name.clone(),
        }
    }

    /// Returns the parameter decoding limits.
    #[must_use]
    pub fn param_limits(&self) -> ParamLimits {
        self.params.limits()
    }
}

/// Builder for [`QuarryConfig`].
#[derive(Debug, Default)]
pub struct QuarryConfigBuilder {
    service: Option<ServiceConfig>,
    logging: Option<LoggingConfig>,
    params: Option<ParamsConfig>,
}

impl QuarryConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service section.
    #[must_use]
    pub fn service(mut self, service: ServiceConfig) -> Self {
        self.service = Some(service);
        self
    }

    /// Set the logging section.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Set the params section.
    #[must_use]
    pub fn params(mut self, params: ParamsConfig) -> Self {
        self.params = Some(params);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> QuarryConfig {
        QuarryConfig {
            service: self.service.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            params: self.params.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<QuarryConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
