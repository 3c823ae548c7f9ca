//! The error enum shared by the compressor and its ranker backends.

use crate::errors::categories::{ErrorCategory, ValidationDetail};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for compressor operations
pub type CompressorResult<T> = Result<T, CompressorError>;

/// Main error type for the rerank compressor.
///
/// `Configuration` is raised eagerly when a compressor or backend is built.
/// Every other variant originates in a ranker backend during a `compress`
/// call and is propagated to the caller as-is; the compressor itself performs
/// no retry and no partial-result recovery.
#[derive(Error, Debug, Clone)]
pub enum CompressorError {
    /// Configuration error (missing capability, invalid settings)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Authentication error against a remote rerank API
    #[error("Authentication error: {message}")]
    Authentication {
        /// Error message describing the authentication issue
        message: String,
    },

    /// Validation error (invalid request parameters)
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue
        message: String,
        /// List of specific validation failures
        details: Vec<ValidationDetail>,
    },

    /// Rate limit error from a remote rerank API
    #[error("Rate limit error: {message}")]
    RateLimit {
        /// Error message describing the rate limit issue
        message: String,
        /// Duration to wait before retrying (if provided by the API)
        retry_after: Option<Duration>,
    },

    /// Network error (connection failed, timeout, DNS issues)
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Server error (5xx responses from a remote rerank API)
    #[error("Server error: {message}")]
    Server {
        /// Error message from the server
        message: String,
        /// HTTP status code
        status_code: Option<u16>,
    },

    /// API error (structured error from a remote rerank API)
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
        /// Error code from the API
        code: Option<String>,
    },

    /// Model inference error (load failure, scoring failure)
    #[error("Inference error: {message}")]
    Inference {
        /// Error message describing the inference issue
        message: String,
    },

    /// Internal error (unexpected conditions, library bugs)
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },
}

impl CompressorError {
    /// Returns true if this error is retryable with exponential backoff.
    ///
    /// The compressor never retries on its own; this classification is for
    /// callers that layer retry behavior over `compress`.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompressorError::RateLimit { .. }
                | CompressorError::Network { .. }
                | CompressorError::Server {
                    status_code: Some(500) | Some(502) | Some(503) | Some(504),
                    ..
                }
                | CompressorError::Api {
                    status: 429 | 500 | 502 | 503 | 504,
                    ..
                }
        )
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            CompressorError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CompressorError::Server { status_code, .. } => *status_code,
            CompressorError::Api { status, .. } => Some(*status),
            CompressorError::RateLimit { .. } => Some(429),
            CompressorError::Authentication { .. } => Some(401),
            _ => None,
        }
    }

    /// Get the category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompressorError::Configuration { .. } => ErrorCategory::Configuration,
            CompressorError::Authentication { .. } => ErrorCategory::Authentication,
            CompressorError::Validation { .. } => ErrorCategory::Validation,
            CompressorError::RateLimit { .. } => ErrorCategory::RateLimit,
            CompressorError::Network { .. } => ErrorCategory::Network,
            CompressorError::Server { .. } => ErrorCategory::Server,
            CompressorError::Api { .. } => ErrorCategory::Server,
            CompressorError::Inference { .. } => ErrorCategory::Inference,
            CompressorError::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

// Conversions from common error types
impl From<reqwest::Error> for CompressorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompressorError::Network {
                message: format!("Request timed out: {}", err),
            }
        } else if err.is_connect() {
            CompressorError::Network {
                message: format!("Connection failed: {}", err),
            }
        } else {
            CompressorError::Network {
                message: format!("Network error: {}", err),
            }
        }
    }
}

impl From<serde_json::Error> for CompressorError {
    fn from(err: serde_json::Error) -> Self {
        CompressorError::Internal {
            message: format!("JSON serialization/deserialization error: {}", err),
        }
    }
}

impl From<url::ParseError> for CompressorError {
    fn from(err: url::ParseError) -> Self {
        CompressorError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let rate_limit_error = CompressorError::RateLimit {
            message: "Too many requests".to_string(),
            retry_after: Some(Duration::from_secs(30)),
        };
        assert!(rate_limit_error.is_retryable());

        let config_error = CompressorError::Configuration {
            message: "Unknown model".to_string(),
        };
        assert!(!config_error.is_retryable());

        let server_error = CompressorError::Server {
            message: "Service unavailable".to_string(),
            status_code: Some(503),
        };
        assert!(server_error.is_retryable());

        let inference_error = CompressorError::Inference {
            message: "Model failed to load".to_string(),
        };
        assert!(!inference_error.is_retryable());
    }

    #[test]
    fn test_retry_after() {
        let rate_limit = CompressorError::RateLimit {
            message: "Too many requests".to_string(),
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(rate_limit.retry_after(), Some(Duration::from_secs(30)));

        let network_error = CompressorError::Network {
            message: "Connection failed".to_string(),
        };
        assert_eq!(network_error.retry_after(), None);
    }

    #[test]
    fn test_status_code() {
        let api_error = CompressorError::Api {
            status: 400,
            message: "Bad request".to_string(),
            code: None,
        };
        assert_eq!(api_error.status_code(), Some(400));

        let auth_error = CompressorError::Authentication {
            message: "Unauthorized".to_string(),
        };
        assert_eq!(auth_error.status_code(), Some(401));
    }

    #[test]
    fn test_category() {
        let config_error = CompressorError::Configuration {
            message: "bad".to_string(),
        };
        assert_eq!(config_error.category(), ErrorCategory::Configuration);

        let inference_error = CompressorError::Inference {
            message: "bad".to_string(),
        };
        assert_eq!(inference_error.category(), ErrorCategory::Inference);
    }
}
