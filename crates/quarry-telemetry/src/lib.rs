//! Logging setup for Quarry services.
//!
//! Quarry's library crates emit structured events through `tracing`:
//! parameter reads log at `trace` on success and `debug` on failure, with
//! the [`fields::PARAM`] and [`fields::RULE`] fields attached. This crate
//! installs the subscriber that renders them.
//!
//! # Example
//!
//! ```rust,ignore
//! use quarry_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&LogConfig::production().with_service_name("orders"))?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

#[doc(hidden)]
pub use tracing;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
