//! Request rejections.

use http::StatusCode;
use quarry_extract::{FailureEnvelope, ReaderFailure, SourceError};
use thiserror::Error;

/// Why a request's parameters were rejected.
///
/// Decoding problems come first; once the parameters decode, the reader's
/// own failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The raw query or form body could not be decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The reader failed.
    #[error(transparent)]
    Read(#[from] ReaderFailure),
}

impl Rejection {
    /// HTTP status for this rejection.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Source(SourceError::TooLarge { .. }) => StatusCode::URI_TOO_LONG,
            Self::Source(SourceError::TooManyPairs { .. } | SourceError::Malformed(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Read(failure) => failure.status_code(),
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Source(SourceError::TooLarge { .. }) => "PARAMS_TOO_LARGE",
            Self::Source(SourceError::TooManyPairs { .. }) => "TOO_MANY_PARAMS",
            Self::Source(SourceError::Malformed(_)) => "MALFORMED_PARAMS",
            Self::Read(failure) => failure.error_code(),
        }
    }

    /// Serializable response body.
    #[must_use]
    pub fn to_envelope(&self) -> FailureEnvelope {
        match self {
            Self::Read(failure) => failure.to_envelope(),
            Self::Source(error) => FailureEnvelope {
                code: self.error_code(),
                message: error.to_string(),
                param: None,
            },
        }
    }
}
