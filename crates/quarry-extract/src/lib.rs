//! # Quarry Extract
//!
//! Typed extraction and validation of request parameters.
//!
//! This crate reads values out of a loosely-typed, string-keyed,
//! multi-valued [`ParamSource`] and turns them into typed values:
//!
//! | Item | Failure model | Description |
//! |------|---------------|-------------|
//! | [`Reader`] | `Option` | Synchronous reader; every failure collapses into `None` |
//! | [`AsyncReader`] | [`ReaderFailure`] | Chainable reader that short-circuits on the first failure |
//! | [`ValidationRule`] | [`ReaderFailure::ValidationFailed`] | Named predicate applied inside a chain |
//! | [`FromParam`] | `Option` | Total parser for `i32`, `i64`, `bool` and `String` |
//!
//! ## Example
//!
//! ```rust
//! use quarry_extract::{
//!     optional_string, required_int, required_string, AsyncReader, Params, ReaderFailure,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i32,
//!     email: Option<String>,
//! }
//!
//! let user = required_string("name")
//!     .and(required_int("age"))
//!     .and(optional_string("email"))
//!     .map(|((name, age), email)| User { name, age, email });
//!
//! // Build a stricter reader on top of the base one.
//! let working_age = user.clone().validate("age between 18 and 65", |u| (18..=65).contains(&u.age));
//!
//! # tokio_test::block_on(async {
//! let params = Params::from_query("name=Alice&age=70").unwrap();
//!
//! assert!(user.read(&params).await.is_ok());
//! assert_eq!(
//!     working_age.read(&params).await,
//!     Err(ReaderFailure::validation("age between 18 and 65"))
//! );
//! # });
//! ```
//!
//! ## Failure handling
//!
//! Failures are values. Callers inspect [`ReaderFailure::kind`] and map it to
//! a response, for example with [`ReaderFailure::status_code`]:
//!
//! ```rust
//! use quarry_extract::ReaderFailure;
//! use http::StatusCode;
//!
//! let failure = ReaderFailure::unparsable("age", "Int");
//! assert_eq!(failure.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
//! assert_eq!(failure.description(), Some("age should be Int"));
//! ```

#![doc(html_root_url = "https://docs.rs/quarry-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod async_reader;
mod error;
mod params;
mod parse;
pub mod reader;
mod rule;
mod source;

pub use async_reader::{
    fail, from_fn, optional_bool, optional_int, optional_long, optional_param, optional_string,
    ready, required_bool, required_int, required_long, required_param, required_string,
    AsyncReader, BoxedReader, OptionalParam, RequiredParam,
};
pub use error::{FailureEnvelope, FailureKind, ReadResult, ReaderFailure, SourceError};
pub use params::{ParamLimits, Params};
pub use parse::{parse, FromParam};
pub use reader::{param, reader_fn, Param, Reader};
pub use rule::{validation_rule, Checked, RuleBuilder, ValidationRule};
pub use source::ParamSource;
