//! HTTP transport implementations.

use crate::errors::{CompressorError, CompressorResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Response from HTTP transport
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

/// HTTP transport trait for talking to a remote rerank API.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> CompressorResult<TransportResponse>;

    /// Execute a request and return the response
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> CompressorResult<TransportResponse> {
        let parsed_url = Url::parse(&url)?;
        let body_bytes = body.map(Bytes::from);
        self.send(method, parsed_url, headers, body_bytes).await
    }
}

/// Reqwest-based HTTP transport implementation
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport
    pub fn new(timeout: Duration) -> CompressorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| CompressorError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Create a new reqwest transport with a custom client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert HTTP method to reqwest method
    fn to_reqwest_method(&self, method: Method) -> reqwest::Method {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
            Method::PATCH => reqwest::Method::PATCH,
            Method::HEAD => reqwest::Method::HEAD,
            Method::OPTIONS => reqwest::Method::OPTIONS,
            _ => reqwest::Method::GET,
        }
    }

    /// Convert HeaderMap to reqwest HeaderMap
    fn to_reqwest_headers(&self, headers: HeaderMap) -> reqwest::header::HeaderMap {
        let mut reqwest_headers = reqwest::header::HeaderMap::new();
        for (name, value) in headers.iter() {
            if let Ok(header_name) =
                reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes())
            {
                if let Ok(header_value) = reqwest::header::HeaderValue::from_bytes(value.as_bytes())
                {
                    reqwest_headers.insert(header_name, header_value);
                }
            }
        }
        reqwest_headers
    }

    /// Convert reqwest headers back to http HeaderMap
    fn from_reqwest_headers(&self, headers: &reqwest::header::HeaderMap) -> HeaderMap {
        let mut http_headers = HeaderMap::new();
        for (name, value) in headers.iter() {
            if let Ok(header_name) = http::header::HeaderName::from_bytes(name.as_str().as_bytes())
            {
                if let Ok(header_value) = http::header::HeaderValue::from_bytes(value.as_bytes()) {
                    http_headers.insert(header_name, header_value);
                }
            }
        }
        http_headers
    }

    /// Map an HTTP error status to a CompressorError
    fn map_http_error(
        &self,
        status: reqwest::StatusCode,
        headers: &reqwest::header::HeaderMap,
        body: &Bytes,
    ) -> CompressorError {
        let body_str = String::from_utf8_lossy(body);

        // Prefer the structured error shape when the API returns one
        if let Ok(error_response) =
            serde_json::from_slice::<crate::errors::ApiErrorResponse>(body)
        {
            return CompressorError::Api {
                status: status.as_u16(),
                message: error_response.message,
                code: error_response.code,
            };
        }

        match status.as_u16() {
            401 => CompressorError::Authentication {
                message: format!("Authentication failed: {}", body_str),
            },
            403 => CompressorError::Authentication {
                message: format!("Access forbidden: {}", body_str),
            },
            429 => CompressorError::RateLimit {
                message: format!("Rate limit exceeded: {}", body_str),
                retry_after: self.parse_retry_after(headers),
            },
            400 => CompressorError::Validation {
                message: format!("Validation error: {}", body_str),
                details: vec![],
            },
            422 => CompressorError::Validation {
                message: format!("Unprocessable entity: {}", body_str),
                details: vec![],
            },
            500..=599 => CompressorError::Server {
                message: format!("Server error: {}", body_str),
                status_code: Some(status.as_u16()),
            },
            _ => CompressorError::Api {
                status: status.as_u16(),
                message: body_str.to_string(),
                code: None,
            },
        }
    }

    /// Parse the retry-after header from a response
    fn parse_retry_after(&self, headers: &reqwest::header::HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> CompressorResult<TransportResponse> {
        let reqwest_method = self.to_reqwest_method(method);
        let reqwest_headers = self.to_reqwest_headers(headers);

        let mut request = self
            .client
            .request(reqwest_method, url.as_str())
            .headers(reqwest_headers);

        if let Some(body_data) = body {
            request = request.body(body_data.to_vec());
        }

        let response = request.send().await?;

        let status = response.status();
        let raw_headers = response.headers().clone();
        let response_headers = self.from_reqwest_headers(&raw_headers);
        let body_bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(self.map_http_error(status, &raw_headers, &body_bytes));
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            headers: response_headers,
            body: body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(30));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_method_conversion() {
        let transport = ReqwestTransport::new(Duration::from_secs(30)).unwrap();

        assert_eq!(
            transport.to_reqwest_method(Method::GET),
            reqwest::Method::GET
        );
        assert_eq!(
            transport.to_reqwest_method(Method::POST),
            reqwest::Method::POST
        );
    }

    #[test]
    fn test_header_conversion() {
        let transport = ReqwestTransport::new(Duration::from_secs(30)).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("x-custom-header", "custom-value".parse().unwrap());

        let reqwest_headers = transport.to_reqwest_headers(headers);

        assert_eq!(
            reqwest_headers.get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            reqwest_headers.get("x-custom-header").unwrap(),
            "custom-value"
        );
    }

    #[test]
    fn test_map_http_error_rate_limit_retry_after() {
        let transport = ReqwestTransport::new(Duration::from_secs(30)).unwrap();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "12".parse().unwrap());

        let error = transport.map_http_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            &headers,
            &Bytes::from_static(b"slow down"),
        );

        assert_eq!(error.retry_after(), Some(Duration::from_secs(12)));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_map_http_error_structured_body() {
        let transport = ReqwestTransport::new(Duration::from_secs(30)).unwrap();

        let body = Bytes::from_static(br#"{"message": "bad model", "code": "unknown_model"}"#);
        let error = transport.map_http_error(
            reqwest::StatusCode::BAD_REQUEST,
            &reqwest::header::HeaderMap::new(),
            &body,
        );

        match error {
            CompressorError::Api { status, message, code } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad model");
                assert_eq!(code, Some("unknown_model".to_string()));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
