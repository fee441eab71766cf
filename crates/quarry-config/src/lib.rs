//! Typed configuration for Quarry services.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - `.env` files and environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → files → env), deep-merged
//!
//! # Overview
//!
//! [`QuarryConfig`] holds three sections:
//!
//! - [`ServiceConfig`] - service name and environment
//! - [`LoggingConfig`] - log level, format and fields
//! - [`ParamsConfig`] - limits for decoding request parameters
//!
//! # Example
//!
//! ```no_run
//! use quarry_config::ConfigLoader;
//!
//! # fn main() -> Result<(), quarry_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("quarry.toml")?
//!     .with_dotenv()?
//!     .with_env_prefix("QUARRY")
//!     .load()?;
//!
//! println!("max pairs: {}", config.params.max_pairs);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [service]
//! name = "orders"
//! environment = "production"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [params]
//! max_query_length = 8192
//! max_pairs = 256
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `QUARRY__SERVICE__NAME=orders`
//! - `QUARRY__LOGGING__FORMAT=pretty`
//! - `QUARRY__PARAMS__MAX_PAIRS=64`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{QuarryConfig, QuarryConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, ParamsConfig, ServiceConfig};
