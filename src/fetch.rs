//! Fetching remote content over HTTP.
//!
//! The [`Fetcher`] trait is the seam between the reconciler and the
//! network. The real implementation is [`HttpFetcher`]; use [`MockFetcher`]
//! for testing without network access:
//!
//! ```
//! use remotefile::{Fetcher, Method, MockFetcher};
//! use std::collections::BTreeMap;
//!
//! let mock = MockFetcher::new();
//! mock.push_body(b"content".to_vec());
//!
//! let bytes = mock
//!     .fetch(Method::Get, "https://example.com/f", &BTreeMap::new())
//!     .unwrap();
//! assert_eq!(bytes, b"content");
//! ```

use crate::error::{Error, Result};
use crate::types::Method;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Maximum response body size drained into memory (1 GiB).
const MAX_BODY_SIZE: u64 = 1024 * 1024 * 1024;

/// Trait for fetching the content behind a URL.
///
/// One call performs one request; there are no retries. A non-2xx status
/// is an [`Error::Http`] carrying the numeric status, applied uniformly to
/// every operation.
pub trait Fetcher: Send + Sync {
    /// Perform a single request and return the full response body.
    fn fetch(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>>;
}

/// HTTP fetcher backed by a single shared ureq agent.
///
/// The agent is default-configured (transport-default timeouts and
/// redirects, no retry policy) and reused across calls.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a fetcher with a default-configured agent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>> {
        // ureq turns non-2xx statuses into Error::StatusCode, which the
        // From conversion maps to Error::Http with the code in the message.
        let mut response = match method {
            Method::Get => {
                let mut request = self.agent.get(url);
                for (name, value) in headers {
                    request = request.header(name.as_str(), value.as_str());
                }
                request.call()?
            }
            Method::Post => {
                let mut request = self.agent.post(url);
                for (name, value) in headers {
                    request = request.header(name.as_str(), value.as_str());
                }
                request.send_empty()?
            }
        };

        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_vec()?;

        Ok(bytes)
    }
}

/// A request observed by a [`MockFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Method used.
    pub method: Method,
    /// URL requested.
    pub url: String,
    /// Headers sent with the request.
    pub headers: BTreeMap<String, String>,
}

/// Scripted response: a body to return or an HTTP status to fail with.
type MockResponse = std::result::Result<Vec<u8>, u16>;

/// Mock fetcher for testing without network access.
///
/// Responses are scripted in order with [`push_body`](Self::push_body) and
/// [`push_status`](Self::push_status); the last scripted response repeats
/// once the queue runs down to it. Requests are recorded for assertions,
/// and [`require_header`](Self::require_header) makes the mock answer 401
/// unless the request carries the expected header value.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    required_headers: Arc<Mutex<BTreeMap<String, String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockFetcher {
    /// Create a new mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response with the given body.
    pub fn push_body(&self, body: Vec<u8>) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    /// Script a failure with the given HTTP status.
    pub fn push_status(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Err(status));
    }

    /// Require a header on every request; mismatches answer 401.
    pub fn require_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.required_headers
            .lock()
            .unwrap()
            .insert(name.into(), value.into());
    }

    /// All requests observed so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests observed so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
        });

        for (name, value) in self.required_headers.lock().unwrap().iter() {
            if headers.get(name).map(String::as_str) != Some(value.as_str()) {
                return Err(Error::http("HTTP 401", Some(401)));
            }
        }

        let mut responses = self.responses.lock().unwrap();
        let response = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };

        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(Error::http(format!("HTTP {status}"), Some(status))),
            None => Err(Error::http("mock: no scripted response", None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_headers() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn test_mock_scripted_responses_in_order() {
        let mock = MockFetcher::new();
        mock.push_body(b"first".to_vec());
        mock.push_body(b"second".to_vec());

        let url = "https://example.com/f";
        assert_eq!(mock.fetch(Method::Get, url, &no_headers()).unwrap(), b"first");
        assert_eq!(mock.fetch(Method::Get, url, &no_headers()).unwrap(), b"second");
    }

    #[test]
    fn test_mock_last_response_repeats() {
        let mock = MockFetcher::new();
        mock.push_body(b"only".to_vec());

        let url = "https://example.com/f";
        assert_eq!(mock.fetch(Method::Get, url, &no_headers()).unwrap(), b"only");
        assert_eq!(mock.fetch(Method::Get, url, &no_headers()).unwrap(), b"only");
    }

    #[test]
    fn test_mock_status_failure() {
        let mock = MockFetcher::new();
        mock.push_status(405);

        let err = mock
            .fetch(Method::Post, "https://example.com/f", &no_headers())
            .unwrap_err();
        assert_eq!(err.status(), Some(405));
        assert!(err.to_string().contains("405"));
    }

    #[test]
    fn test_mock_required_header_mismatch_is_401() {
        let mock = MockFetcher::new();
        mock.push_body(b"secret".to_vec());
        mock.require_header("Authorization", "Bearer xyz");

        let url = "https://example.com/f";

        let err = mock.fetch(Method::Get, url, &no_headers()).unwrap_err();
        assert_eq!(err.status(), Some(401));

        let mut wrong = BTreeMap::new();
        wrong.insert("Authorization".to_string(), "Bearer nope".to_string());
        let err = mock.fetch(Method::Get, url, &wrong).unwrap_err();
        assert!(err.to_string().contains("401"));

        let mut right = BTreeMap::new();
        right.insert("Authorization".to_string(), "Bearer xyz".to_string());
        assert_eq!(mock.fetch(Method::Get, url, &right).unwrap(), b"secret");
    }

    #[test]
    fn test_mock_records_requests() {
        let mock = MockFetcher::new();
        mock.push_body(Vec::new());

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "text/plain".to_string());
        mock.fetch(Method::Post, "https://example.com/f", &headers)
            .unwrap();

        let requests = mock.requests();
        assert_eq!(mock.fetch_count(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "https://example.com/f");
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn test_mock_without_script_errors() {
        let mock = MockFetcher::new();
        let err = mock
            .fetch(Method::Get, "https://example.com/f", &no_headers())
            .unwrap_err();
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_http_fetcher_default() {
        // Construction only; network behavior is covered through the
        // Fetcher seam with MockFetcher.
        let _fetcher = HttpFetcher::default();
    }
}
