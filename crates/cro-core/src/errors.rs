//! Error taxonomy surfaced by report operations.
//!
//! Every gateway operation resolves to either its success value or exactly one
//! [`ReportError`]. Persistence failures are not part of this taxonomy: the
//! store absorbs them (see `cro-store::StorageError`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can be surfaced to a caller of a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Bad input. Raised before any side effect, never retried automatically.
    #[error("{0}")]
    Validation(String),

    /// The requested report does not exist in the backing strategy.
    #[error("Report not found: {id}")]
    NotFound { id: String },

    /// No response reached us (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service responded but refused or failed the request.
    #[error("{message}")]
    Remote {
        /// HTTP status, when the failure came from a response status.
        status: Option<u16>,
        /// Server-supplied reason, or a generic fallback.
        message: String,
    },

    /// The analysis backend is temporarily unavailable.
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ReportError {
    /// Payload-free discriminant, used by presenters and for matching.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Whether a caller may reasonably retry the same request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::ServiceUnavailable(_))
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}

/// Kinds of surfaced errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Transport,
    Remote,
    ServiceUnavailable,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::Remote => "remote",
            Self::ServiceUnavailable => "service_unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            ReportError::Validation("bad".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ReportError::not_found("rpt-1").kind(), ErrorKind::NotFound);
        assert_eq!(
            ReportError::Transport("refused".into()).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ReportError::remote(Some(500), "boom").kind(),
            ErrorKind::Remote
        );
        assert_eq!(
            ReportError::ServiceUnavailable("down".into()).kind(),
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(ReportError::Transport("x".into()).is_retryable());
        assert!(ReportError::ServiceUnavailable("x".into()).is_retryable());
        assert!(!ReportError::Validation("x".into()).is_retryable());
        assert!(!ReportError::not_found("x").is_retryable());
        assert!(!ReportError::remote(None, "x").is_retryable());
    }

    #[test]
    fn remote_error_displays_server_message_verbatim() {
        let err = ReportError::remote(Some(422), "URL could not be fetched");
        assert_eq!(err.to_string(), "URL could not be fetched");
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ServiceUnavailable).unwrap();
        assert_eq!(json, "\"service_unavailable\"");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
