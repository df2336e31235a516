//! The HTTP client seam and its reqwest-backed implementation.
//!
//! The dispatcher talks to the Attio API exclusively through the
//! [`HttpClient`] trait so tests can substitute a mock. The production
//! implementation wraps a pooled `reqwest::Client` with rustls, a
//! request timeout and a stable user agent.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::descriptor::HttpMethod;
use crate::dispatch::request::ResolvedRequest;

/// A normalised HTTP response, status preserved for error mapping.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body: parsed JSON where possible, raw text otherwise.
    pub body: Value,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A transport-level failure: the request never produced a response.
///
/// Application-level failures (non-2xx statuses) are NOT transport
/// failures; they come back as an [`HttpResponse`] so the dispatcher can
/// preserve status and body for the caller.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportFailure {
    /// Status code, when the failure surfaced one.
    pub status: Option<u16>,
    /// Description of the failure (no credentials, ever).
    pub message: String,
}

/// Executes resolved requests against the remote API.
///
/// Dropping the future returned by `execute` is the abort path: an
/// in-flight request must be torn down when the future is dropped, which
/// is how the dispatcher implements cancellation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes the request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] when no response was produced
    /// (connection failure, timeout, malformed response).
    async fn execute(&self, request: &ResolvedRequest) -> Result<HttpResponse, TransportFailure>;
}

/// `reqwest`-backed [`HttpClient`] for the Attio API.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] if the underlying TLS backend
    /// cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportFailure> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("attio-mcp-server/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportFailure {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: &ResolvedRequest) -> Result<HttpResponse, TransportFailure> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| TransportFailure {
            status: e.status().map(|s| s.as_u16()),
            message: if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("request failed: {e}")
            },
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| TransportFailure {
            status: Some(status),
            message: format!("failed to read response body: {e}"),
        })?;

        // Attio responses are JSON; fall back to raw text for anything else
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        for status in [200, 201, 204, 299] {
            assert!(HttpResponse {
                status,
                body: Value::Null
            }
            .is_success());
        }
        for status in [199, 301, 404, 500] {
            assert!(!HttpResponse {
                status,
                body: Value::Null
            }
            .is_success());
        }
    }

    #[test]
    fn transport_failure_display() {
        let failure = TransportFailure {
            status: None,
            message: "request timed out".to_string(),
        };
        assert_eq!(failure.to_string(), "request timed out");
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(ReqwestClient::new(Duration::from_secs(30)).is_ok());
    }
}
