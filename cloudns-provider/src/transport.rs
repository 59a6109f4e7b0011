//! HTTP transport
//!
//! The client talks to the API through the [`Transport`] trait so the wire
//! layer can be swapped (tests, proxies, custom TLS). [`HttpTransport`] is the
//! reqwest-backed default.
//!
//! A transport only moves bytes: it does not retry, does not interpret HTTP
//! status codes and does not look at the body. Failure envelopes arrive with
//! status 200 and are detected by the client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::{ProviderError, Result};

/// Default connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("cloudns-provider/", env!("CARGO_PKG_VERSION"));

/// Raw response as returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code, informational only.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Wire transport used by [`ClouDnsClient`](crate::ClouDnsClient).
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url` and return the raw response.
    ///
    /// Only failures that prevent obtaining a body are errors; they should be
    /// reported as [`ProviderError::Transport`].
    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with explicit timeouts and `User-Agent`.
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Transport {
                endpoint: "client".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let detail = if e.is_timeout() {
                    format!("Request timed out: {e}")
                } else {
                    e.to_string()
                };
                ProviderError::Transport {
                    endpoint: url.to_string(),
                    detail,
                }
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport {
                endpoint: url.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        Ok(HttpResponse { status, body: text })
    }
}
