//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use quarry_extract::ParamLimits;
use serde::{Deserialize, Serialize};

/// Service identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name, reported in logs.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Deployment environment (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            environment: default_environment(),
        }
    }
}

fn default_service_name() -> String {
    "quarry-service".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable logs (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g., "info" or `quarry_extract=trace,warn`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Emit span open/close events.
    #[serde(default)]
    pub span_events: bool,

    /// Include source file and line.
    #[serde(default)]
    pub include_location: bool,

    /// Include the event target.
    #[serde(default = "default_true")]
    pub include_target: bool,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            span_events: false,
            include_location: false,
            include_target: true,
            thread_ids: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Limits applied when decoding request parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParamsConfig {
    /// Maximum length of a query string or form body, in bytes.
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Maximum number of `name=value` pairs.
    #[serde(default = "default_max_pairs")]
    pub max_pairs: usize,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        let limits = ParamLimits::default();
        Self {
            max_query_length: limits.max_query_length,
            max_pairs: limits.max_pairs,
        }
    }
}

impl ParamsConfig {
    /// Returns the decoding limits.
    #[must_use]
    pub fn limits(&self) -> ParamLimits {
        ParamLimits {
            max_query_length: self.max_query_length,
            max_pairs: self.max_pairs,
        }
    }
}

impl From<&ParamsConfig> for ParamLimits {
    fn from(config: &ParamsConfig) -> Self {
        config.limits()
    }
}

fn default_max_query_length() -> usize {
    ParamLimits::default().max_query_length
}

fn default_max_pairs() -> usize {
    ParamLimits::default().max_pairs
}

fn default_true() -> bool {
    true
}
