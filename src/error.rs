//! Error types for remote file management.
//!
//! Configuration problems (bad method, missing fields) are separated from
//! runtime failures (HTTP, filesystem) so callers can tell a broken
//! declaration apart from a broken network. Drift is not an error and never
//! appears here; see [`crate::ReadOutcome`].

use std::io;
use std::path::PathBuf;

/// Result type alias for remotefile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a remote file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP method other than GET or POST was declared.
    #[error("invalid HTTP method: {given} (only GET and POST are allowed)")]
    InvalidMethod {
        /// The method string as declared, after upper-casing.
        given: String,
    },

    /// A required specification field was empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// HTTP request failed, either with a non-2xx status or at the
    /// transport level (DNS, connection, TLS).
    #[error("download failed: {message}")]
    Http {
        /// Error message, includes the numeric status when one was received.
        message: String,
        /// HTTP status code if the server responded at all.
        status: Option<u16>,
    },

    /// IO error while writing or removing the destination file.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// Whether this error is a configuration problem, detectable without
    /// any network or filesystem access.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidMethod { .. } | Self::MissingField { .. })
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}
