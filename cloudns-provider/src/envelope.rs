//! Provider success/failure envelope detection.
//!
//! The API answers HTTP 200 for most failures and reports them in a
//! `{"status": ..., "statusDescription": ...}` object instead. Any endpoint can
//! return that shape, so the check runs on every body before decoding.

use serde::Deserialize;

use crate::error::{ProviderError, Result};

/// The literal `status` value the provider uses for success.
pub const SUCCESS_STATUS: &str = "Success";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "statusDescription")]
    description: Option<String>,
}

/// Return the provider's failure description if `body` is a failure envelope.
///
/// A body is a failure when it decodes as an envelope object, its status is
/// not [`SUCCESS_STATUS`], and the envelope is not entirely empty. Arrays,
/// id-keyed record maps, unrelated objects and non-JSON all pass.
///
/// An envelope whose status and description are both empty is indistinguishable
/// from an unrelated object and is treated as success.
pub fn failure_message(body: &str) -> Option<String> {
    let envelope: Envelope = serde_json::from_str(body).ok()?;
    let status = envelope.status.unwrap_or_default();
    let description = envelope.description.unwrap_or_default();

    if status == SUCCESS_STATUS || (status.is_empty() && description.is_empty()) {
        return None;
    }
    Some(description)
}

/// Fail with [`ProviderError::Api`] when `body` is a failure envelope.
pub(crate) fn ensure_success(endpoint: &str, body: &str) -> Result<()> {
    match failure_message(body) {
        Some(message) => Err(ProviderError::Api {
            endpoint: endpoint.to_string(),
            message,
        }),
        None => Ok(()),
    }
}
