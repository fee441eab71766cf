//! # Quarry JSON
//!
//! An immutable JSON tree addressed by dotted paths.
//!
//! [`JsonValue`] is an object, an array or a scalar. Objects are built from
//! `(path, value)` pairs, read back with typed [`JsonObject::get`] calls and
//! combined with recursive merges that never modify their operands.
//!
//! ## Example
//!
//! ```rust
//! use quarry_json::{json_object, JsonArray, JsonObject};
//!
//! let defaults = json_object! {
//!     "server.port" => 8080,
//!     "server.host" => "127.0.0.1",
//! };
//! let overrides: JsonObject = r#"{"server": {"port": 9000}}"#.parse().unwrap();
//!
//! let settings = defaults.merge_right(&overrides);
//! assert_eq!(settings.get::<i32>("server.port").unwrap(), 9000);
//! assert_eq!(settings.get::<String>("server.host").unwrap(), "127.0.0.1");
//!
//! let ports: JsonArray = [80, 443].into_iter().collect();
//! let more: JsonArray = [8080].into_iter().collect();
//! assert_eq!(ports.concat(&more).len(), 3);
//! ```
//!
//! ## Paths
//!
//! The `.` separator always splits, so keys containing a dot cannot be
//! addressed and are expanded into nested objects on construction or parse.
//! Arrays are never indexed by path.

#![doc(html_root_url = "https://docs.rs/quarry-json/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod array;
mod convert;
mod error;
mod merge;
mod object;
pub mod path;
mod text;
mod value;

pub use array::JsonArray;
pub use convert::FromJson;
pub use error::{JsonError, JsonResult};
pub use merge::Priority;
pub use object::{JsonMap, JsonObject};
pub use value::{JsonValue, Scalar, ValueKind};
