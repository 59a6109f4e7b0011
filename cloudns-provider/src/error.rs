use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all ClouDNS operations.
///
/// Variants carry the endpoint (or entity) that produced them so a caller can
/// tell which call failed. All variants are serializable for structured error
/// reporting.
///
/// No variant is retried by this crate. A single failed call is a single
/// failed operation; backoff is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The transport failed before a response body was obtained
    /// (DNS resolution failure, connection refused, timeout, TLS error, ...).
    #[error("[{endpoint}] Transport error: {detail}")]
    Transport {
        /// Endpoint path the request was sent to.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The provider answered with its failure envelope.
    ///
    /// `message` is the provider's `statusDescription`, verbatim.
    #[error("[{endpoint}] {message}")]
    Api {
        /// Endpoint path that produced the failure.
        endpoint: String,
        /// Provider description of the failure.
        message: String,
    },

    /// The response body is not valid JSON or not the expected shape,
    /// or an identifier could not be decoded.
    #[error("[{endpoint}] Decode error: {detail}")]
    Decode {
        /// Endpoint path whose response (or request input) failed to decode.
        endpoint: String,
        /// Details about the decode failure.
        detail: String,
    },

    /// A read expected to resolve a single entity found none.
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// Kind of entity (`"zone"`, `"record"`, ...).
        entity: String,
        /// Lookup key that did not match.
        key: String,
    },

    /// A zero-length body was returned where content was expected.
    #[error("[{endpoint}] Empty response body")]
    EmptyResponse {
        /// Endpoint path that returned nothing.
        endpoint: String,
    },

    /// The operation is permanently unsupported by the provider API.
    #[error("{operation} is not supported: {detail}")]
    Unsupported {
        /// Operation name.
        operation: String,
        /// Why it is unsupported.
        detail: String,
    },

    /// A caller-supplied value was rejected before any request was sent.
    #[error("Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{endpoint}] Serialization error: {detail}")]
    Serialization {
        /// Endpoint path the body was meant for.
        endpoint: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// Whether the error is an expected outcome (bad input, missing resource,
    /// provider refusal) rather than a fault. Used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Update this when adding a variant.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::NotFound { .. }
                | Self::Unsupported { .. }
                | Self::InvalidParameter { .. }
        )
    }

    pub(crate) fn decode(endpoint: &str, detail: impl ToString) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
