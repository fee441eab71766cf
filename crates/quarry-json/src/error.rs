//! JSON access and parse errors.

use crate::ValueKind;
use thiserror::Error;

/// Result type alias using [`JsonError`].
pub type JsonResult<T> = Result<T, JsonError>;

/// Errors raised when resolving a path or reading JSON text.
///
/// Path failures signal a data-shape or programming error in the caller;
/// none of them are fatal.
#[derive(Debug, Error)]
pub enum JsonError {
    /// A path segment named a key that does not exist.
    #[error("no value at '{path}': missing segment '{segment}'")]
    MissingSegment {
        /// The full path being resolved.
        path: String,
        /// The segment that was not found.
        segment: String,
    },

    /// A path tried to descend into a value that is not an object.
    #[error("cannot resolve '{segment}' in '{path}': found {found}, expected object")]
    NotAnObject {
        /// The full path being resolved.
        path: String,
        /// The segment that could not be looked up.
        segment: String,
        /// Kind of the value found instead of an object.
        found: ValueKind,
    },

    /// The value at the path could not be coerced to the requested type.
    #[error("value at '{path}' is {found}, expected {expected}")]
    Incompatible {
        /// The full path that was resolved.
        path: String,
        /// Name of the requested type.
        expected: &'static str,
        /// Kind of the value found.
        found: ValueKind,
    },

    /// JSON text could not be parsed.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl JsonError {
    /// Returns the path involved, if the error came from path resolution.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingSegment { path, .. }
            | Self::NotAnObject { path, .. }
            | Self::Incompatible { path, .. } => Some(path),
            Self::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_segment_display() {
        let err = JsonError::MissingSegment {
            path: "a.b.c".to_string(),
            segment: "b".to_string(),
        };
        assert_eq!(err.to_string(), "no value at 'a.b.c': missing segment 'b'");
        assert_eq!(err.path(), Some("a.b.c"));
    }

    #[test]
    fn test_incompatible_display() {
        let err = JsonError::Incompatible {
            path: "a".to_string(),
            expected: "Int",
            found: ValueKind::String,
        };
        assert_eq!(err.to_string(), "value at 'a' is string, expected Int");
    }

    #[test]
    fn test_parse_error_has_no_path() {
        let err: JsonError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.path().is_none());
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
