//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ClouDnsClient;
use crate::error::{ProviderError, Result};
use crate::transport::{HttpResponse, Transport};
use crate::types::Apiaccess;

pub const MOCK_BASE_URL: &str = "http://mock.test";

pub fn test_auth() -> Apiaccess {
    Apiaccess::new(1, "secret")
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a 200 response.
    pub fn respond(&self, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::ok(body)));
    }

    /// Queue a transport failure.
    pub fn fail(&self, detail: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ProviderError::Transport {
                endpoint: MOCK_BASE_URL.to_string(),
                detail: detail.to_string(),
            }));
    }

    /// Recorded `(url, body)` pairs.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    /// Body of the only recorded request.
    pub fn single_body(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request: {requests:?}");
        requests[0].1.clone()
    }

    pub fn client(self: &Arc<Self>) -> ClouDnsClient {
        ClouDnsClient::builder()
            .base_url(MOCK_BASE_URL)
            .transport(self.clone())
            .build()
            .unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {url}"))
    }
}
