//! Reader failure types.
//!
//! This module provides the typed failures produced by async readers and
//! the decoding errors produced when a [`Params`](crate::Params) source is
//! built from a raw query string or form body.

use http::StatusCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for async reader stages.
pub type ReadResult<T> = Result<T, ReaderFailure>;

/// Discriminator for [`ReaderFailure`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A required parameter was absent or empty.
    ParamNotFound,
    /// A value could not be parsed or failed a rule.
    ValidationFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParamNotFound => write!(f, "param_not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
        }
    }
}

/// Failure raised by an [`AsyncReader`](crate::AsyncReader) chain.
///
/// Failures are plain values: the first one produced by a chain aborts the
/// remaining stages and is handed back to the caller, which typically maps
/// it onto a client-error response.
///
/// # Example
///
/// ```rust
/// use quarry_extract::{FailureKind, ReaderFailure};
/// use http::StatusCode;
///
/// let failure = ReaderFailure::param_not_found("user_id");
/// assert_eq!(failure.kind(), FailureKind::ParamNotFound);
/// assert_eq!(failure.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(failure.to_string(), "missing required parameter: user_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderFailure {
    /// A required parameter was absent from the source, or present but empty.
    #[error("missing required parameter: {name}")]
    ParamNotFound {
        /// Name of the missing parameter.
        name: String,
    },

    /// A present value was unparsable or failed a validation rule.
    #[error("validation failed: {description}")]
    ValidationFailed {
        /// Human-readable description of the violated rule.
        description: String,
    },
}

impl ReaderFailure {
    /// Creates a failure for a missing or empty required parameter.
    #[must_use]
    pub fn param_not_found(name: impl Into<String>) -> Self {
        Self::ParamNotFound { name: name.into() }
    }

    /// Creates a failure for a violated rule.
    #[must_use]
    pub fn validation(description: impl Into<String>) -> Self {
        Self::ValidationFailed {
            description: description.into(),
        }
    }

    /// Creates the failure reported when a present value cannot be parsed
    /// to `type_name`, e.g. `"age should be Int"`.
    #[must_use]
    pub fn unparsable(name: &str, type_name: &str) -> Self {
        Self::validation(format!("{name} should be {type_name}"))
    }

    /// Returns the failure discriminator.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ParamNotFound { .. } => FailureKind::ParamNotFound,
            Self::ValidationFailed { .. } => FailureKind::ValidationFailed,
        }
    }

    /// Returns the parameter name for [`ReaderFailure::ParamNotFound`].
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::ParamNotFound { name } => Some(name),
            Self::ValidationFailed { .. } => None,
        }
    }

    /// Returns the rule description for [`ReaderFailure::ValidationFailed`].
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::ParamNotFound { .. } => None,
            Self::ValidationFailed { description } => Some(description),
        }
    }

    /// Returns the HTTP status a caller should respond with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            FailureKind::ParamNotFound => StatusCode::BAD_REQUEST,
            FailureKind::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            FailureKind::ParamNotFound => "PARAM_NOT_FOUND",
            FailureKind::ValidationFailed => "VALIDATION_FAILED",
        }
    }

    /// Builds a serializable error envelope for this failure.
    #[must_use]
    pub fn to_envelope(&self) -> FailureEnvelope {
        FailureEnvelope {
            code: self.error_code(),
            message: self.to_string(),
            param: self.param_name().map(String::from),
        }
    }
}

/// Serializable body describing a [`ReaderFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEnvelope {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Offending parameter, when the failure names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// Error raised while decoding raw parameters into a [`Params`](crate::Params).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The raw input exceeded the configured length.
    #[error("parameter input too large: max {max} bytes, got {actual} bytes")]
    TooLarge {
        /// Configured maximum.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// The raw input held more pairs than allowed.
    #[error("too many parameters: max {max}, got {actual}")]
    TooManyPairs {
        /// Configured maximum.
        max: usize,
        /// Observed pair count.
        actual: usize,
    },

    /// The raw input was not valid `application/x-www-form-urlencoded` data.
    #[error("malformed parameter encoding: {0}")]
    Malformed(String),
}
