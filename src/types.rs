//! Core types for remote file management.
//!
//! [`FileSpec`] is the declared desired state of one managed file and
//! [`TrackedFile`] is the observed state handed back to the orchestrator
//! after a successful reconciliation. Both serialize with serde so the
//! orchestrator can persist them between runs; the on-disk format is the
//! orchestrator's business.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// HTTP method used for the download request.
///
/// Only GET and POST are supported; anything else is a configuration
/// error, rejected before any network call.
///
/// # Example
///
/// ```
/// use remotefile::Method;
///
/// assert_eq!(Method::parse("get").unwrap(), Method::Get);
/// assert_eq!(Method::parse("POST").unwrap(), Method::Post);
/// assert!(Method::parse("DELETE").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// HTTP GET (the default).
    #[default]
    Get,
    /// HTTP POST with an empty body.
    Post,
}

impl Method {
    /// Parse a method string, case-insensitively.
    ///
    /// Returns [`Error::InvalidMethod`] for anything other than GET or POST.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(Error::InvalidMethod {
                given: other.to_string(),
            }),
        }
    }

    /// Get the upper-case wire form of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Declared desired state of one managed file.
///
/// # Example
///
/// ```
/// use remotefile::{FileSpec, Method};
///
/// let spec = FileSpec::new("https://example.com/app.tar.gz", "/opt/app.tar.gz")
///     .method(Method::Get)
///     .header("Authorization", "Bearer xyz");
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    /// URL to download the file from.
    pub url: String,
    /// Local path where the downloaded file is saved.
    pub path: PathBuf,
    /// HTTP method to use (default: GET).
    #[serde(default)]
    pub method: Method,
    /// Custom headers to include in the request. Sensitive: values are
    /// redacted from `Debug` output and must not be logged in cleartext.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl FileSpec {
    /// Create a spec for the given URL and destination path.
    #[must_use]
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            method: Method::default(),
            headers: BTreeMap::new(),
        }
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Check that the required fields are present.
    ///
    /// Returns [`Error::MissingField`] for an empty `url` or `path`. Called
    /// by the reconciler before any network access.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::MissingField { field: "url" });
        }
        if self.path.as_os_str().is_empty() {
            return Err(Error::MissingField { field: "path" });
        }
        Ok(())
    }
}

// Header values may carry credentials, so Debug prints keys only.
impl fmt::Debug for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSpec")
            .field("url", &self.url)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Observed state of a managed file after a successful reconciliation.
///
/// Produced only by a completed fetch+write; the fingerprints always
/// describe the bytes last written to `spec.path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    /// The spec the file was reconciled from.
    #[serde(flatten)]
    pub spec: FileSpec,
    /// Hex SHA-1 of the file content (40 chars). Doubles as the resource id.
    pub sha1: String,
    /// Hex SHA-256 of the file content (64 chars), the stronger
    /// verification fingerprint.
    pub sha256: String,
}

impl TrackedFile {
    /// Unique id of the resource: the SHA-1 content fingerprint.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.sha1
    }
}

/// Why a tracked file no longer matches its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// The destination file was removed out-of-band.
    FileMissing,
    /// The remote content no longer matches the stored identity.
    ContentChanged {
        /// SHA-1 recorded at the last reconciliation.
        expected: String,
        /// SHA-1 of the freshly fetched content.
        actual: String,
    },
}

/// Outcome of a read (drift-detection) pass.
///
/// `Drifted` is a signal to discard the tracked record, not an error:
/// genuine failures (network, IO) come back as [`crate::Error`] and leave
/// the prior record untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// File and remote both still match the record; fingerprints refreshed.
    InSync(TrackedFile),
    /// Drift detected; the orchestrator should drop the record.
    Drifted(Drift),
}

impl ReadOutcome {
    /// Check whether the resource is still in sync.
    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        matches!(self, Self::InSync(_))
    }
}
