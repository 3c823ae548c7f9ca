//! Mock implementations for testing.
//!
//! Provides a scripted [`MockRanker`] for exercising the compressor without a
//! model, and a [`MockHttpTransport`] for exercising the HTTP backend without
//! a network. Both record the requests they receive.

use crate::errors::{CompressorError, CompressorResult};
use crate::ranker::{RankedPassage, Ranker, RerankRequest};
use crate::transport::{HttpTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use parking_lot::Mutex;
use std::collections::VecDeque;
use url::Url;

/// Scripted ranker for tests.
///
/// Responses queued with [`add_response`](Self::add_response) or
/// [`add_error`](Self::add_error) are returned in order. When the queue is
/// empty the mock falls back to a deterministic echo ranking: every passage
/// in input order with score 1.0.
pub struct MockRanker {
    model: String,
    responses: Mutex<VecDeque<CompressorResult<Vec<RankedPassage>>>>,
    requests: Mutex<Vec<RerankRequest>>,
}

impl MockRanker {
    /// Create a new mock ranker
    pub fn new() -> Self {
        Self {
            model: "mock-rerank-model".to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn add_response(&self, results: Vec<RankedPassage>) {
        self.responses.lock().push_back(Ok(results));
    }

    /// Queue an error response
    pub fn add_error(&self, error: CompressorError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<RerankRequest> {
        self.requests.lock().clone()
    }

    /// Get the most recent recorded request
    pub fn last_request(&self) -> Option<RerankRequest> {
        self.requests.lock().last().cloned()
    }

    /// Clear recorded requests
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }
}

impl Default for MockRanker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ranker for MockRanker {
    fn model(&self) -> &str {
        &self.model
    }

    async fn rerank(&self, request: RerankRequest) -> CompressorResult<Vec<RankedPassage>> {
        let scripted = self.responses.lock().pop_front();
        let fallback = request
            .passages
            .iter()
            .map(|p| RankedPassage::new(p.id, p.text.clone(), 1.0))
            .collect();

        self.requests.lock().push(request);

        match scripted {
            Some(response) => response,
            None => Ok(fallback),
        }
    }
}

/// A mock HTTP response to return
#[derive(Clone)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json<T: serde::Serialize>(data: &T) -> Self {
        Self {
            status: 200,
            body: serde_json::to_vec(data).unwrap(),
        }
    }

    /// Create an error response
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "message": message });
        Self {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }
}

/// A recorded HTTP request
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// HTTP method
    pub method: Method,
    /// Request URL
    pub url: String,
    /// Request body
    pub body: Option<Vec<u8>>,
}

/// Mock HTTP transport for testing the HTTP backend.
///
/// Non-success scripted responses are surfaced as API errors the way the real
/// transport maps them.
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<MockRequest>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a response to return
    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Get recorded requests
    pub fn get_requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Get the last request
    pub fn last_request(&self) -> Option<MockRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        _headers: HeaderMap,
        body: Option<Bytes>,
    ) -> CompressorResult<TransportResponse> {
        self.requests.lock().push(MockRequest {
            method: method.clone(),
            url: url.to_string(),
            body: body.as_ref().map(|b| b.to_vec()),
        });

        let response = self.responses.lock().pop_front().unwrap_or(MockResponse {
            status: 500,
            body: b"No mock response configured".to_vec(),
        });

        if response.status >= 400 {
            return Err(CompressorError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
                code: None,
            });
        }

        Ok(TransportResponse {
            status: response.status,
            headers: HeaderMap::new(),
            body: Bytes::from(response.body),
        })
    }
}
