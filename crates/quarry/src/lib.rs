//! # Quarry
//!
//! Typed request-parameter readers and an immutable, path-addressed JSON
//! tree, with the configuration and logging a service needs around them.
//!
//! - [`extract`] reads typed values out of query strings and form bodies,
//!   either collapsing every failure into `None` or chaining stages that
//!   stop at the first missing parameter or failed rule.
//! - [`json`] builds JSON objects from dotted paths and deep-merges them.
//! - [`config`] loads layered TOML/JSON/env configuration.
//! - [`telemetry`] installs structured logging.
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::prelude::*;
//!
//! #[derive(Debug)]
//! struct Signup {
//!     name: String,
//!     age: i32,
//! }
//!
//! let signup = required_string("name")
//!     .and(required_int("age"))
//!     .map(|(name, age)| Signup { name, age })
//!     .validate("age should be at least 18", |s| s.age >= 18)
//!     .boxed();
//!
//! let mut config = QuarryConfig::default();
//! config.logging.enabled = false;
//! let service = quarry::bootstrap(&config).unwrap();
//!
//! # tokio_test::block_on(async {
//! let uri = "/signup?name=Ann&age=16".parse().unwrap();
//! let rejection = service.read_uri(&signup, &uri).await.unwrap_err();
//! assert_eq!(rejection.status_code(), http::StatusCode::UNPROCESSABLE_ENTITY);
//!
//! let body = json_object! {
//!     "error.code" => rejection.error_code(),
//!     "error.message" => rejection.to_string(),
//! };
//! assert_eq!(body.get::<String>("error.code").unwrap(), "VALIDATION_FAILED");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/quarry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bootstrap;
mod rejection;

pub use bootstrap::{bootstrap, BootstrapError, Service};
pub use rejection::Rejection;

// Re-export member crates
pub use quarry_config as config;
pub use quarry_extract as extract;
pub use quarry_json as json;
pub use quarry_telemetry as telemetry;

pub use quarry_json::json_object;

/// Prelude module for convenient imports.
///
/// ```rust
/// use quarry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{bootstrap, BootstrapError, Rejection, Service};

    // Readers
    pub use quarry_extract::{
        optional_bool, optional_int, optional_long, optional_param, optional_string, param,
        required_bool, required_int, required_long, required_param, required_string,
        validation_rule, AsyncReader, BoxedReader, FailureKind, ParamSource, Params, Reader,
        ReaderFailure, ValidationRule,
    };

    // JSON
    pub use quarry_json::{json_object, FromJson, JsonArray, JsonError, JsonObject, JsonValue};

    // Configuration
    pub use quarry_config::{ConfigError, ConfigLoader, QuarryConfig};
}
