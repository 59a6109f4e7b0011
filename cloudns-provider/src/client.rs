//! ClouDNS client and its builder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::envelope::ensure_success;
use crate::error::{ProviderError, Result};
use crate::transport::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpTransport,
    Transport,
};
use crate::types::Apiaccess;
use crate::utils::log_sanitizer::{redact_credentials, truncate_for_log};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudns.net";

/// Client for the ClouDNS API.
///
/// The client holds no credentials; every operation takes an [`Apiaccess`].
/// It is cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct ClouDnsClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl fmt::Debug for ClouDnsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClouDnsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Request body with the credentials merged in at top level.
#[derive(Serialize)]
struct Authenticated<'a, B: ?Sized> {
    #[serde(flatten)]
    auth: &'a Apiaccess,
    #[serde(flatten)]
    params: &'a B,
}

impl ClouDnsClient {
    /// Client against the production API with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder.
    pub fn builder() -> ClouDnsClientBuilder {
        ClouDnsClientBuilder::default()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the body once it passed the envelope check.
    pub(crate) async fn call<B>(
        &self,
        endpoint: Endpoint,
        auth: &Apiaccess,
        params: &B,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let path = endpoint.path();
        let result = self.send(path, auth, params).await;
        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("[ClouDNS] {path} failed: {e}");
            } else {
                log::error!("[ClouDNS] {path} failed: {e}");
            }
        }
        result
    }

    async fn send<B>(&self, path: &str, auth: &Apiaccess, params: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(Authenticated { auth, params }).map_err(|e| {
            ProviderError::Serialization {
                endpoint: path.to_string(),
                detail: e.to_string(),
            }
        })?;

        let url = format!("{}{path}", self.base_url);
        log::debug!("[ClouDNS] POST {path} {}", redact_credentials(&payload));

        let response = self.transport.post(&url, &payload).await?;
        log::debug!(
            "[ClouDNS] {path} -> HTTP {}: {}",
            response.status,
            truncate_for_log(&response.body)
        );

        ensure_success(path, &response.body)?;
        Ok(response.body)
    }

    /// [`call`](Self::call), then decode the body as `T`.
    pub(crate) async fn call_json<T, B>(
        &self,
        endpoint: Endpoint,
        auth: &Apiaccess,
        params: &B,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.call(endpoint, auth, params).await?;
        parse_json(endpoint, &body)
    }
}

/// Decode a response body, logging the raw text when it does not fit `T`.
pub(crate) fn parse_json<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T> {
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse {
            endpoint: endpoint.path().to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| {
        log::error!("[ClouDNS] {endpoint}: JSON parse failed: {e}");
        log::error!("[ClouDNS] {endpoint}: raw response: {}", truncate_for_log(body));
        ProviderError::decode(endpoint.path(), e)
    })
}

/// Empty parameter set for endpoints that take credentials only.
pub(crate) fn no_params() -> serde_json::Map<String, Value> {
    serde_json::Map::new()
}

/// Builder for [`ClouDnsClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use cloudns_provider::ClouDnsClient;
///
/// let client = ClouDnsClient::builder()
///     .request_timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok::<(), cloudns_provider::ProviderError>(())
/// ```
#[must_use]
pub struct ClouDnsClientBuilder {
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    user_agent: String,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClouDnsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport: None,
        }
    }
}

impl ClouDnsClientBuilder {
    /// Override the API base URL (e.g., a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport. Timeouts and `User-Agent` are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ClouDnsClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProviderError::InvalidParameter {
                param: "base_url".to_string(),
                detail: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                self.connect_timeout,
                self.request_timeout,
                &self.user_agent,
            )?),
        };

        Ok(ClouDnsClient {
            transport,
            base_url,
        })
    }
}
