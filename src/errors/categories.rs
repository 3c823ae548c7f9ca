//! Error categories and validation details.

use serde::{Deserialize, Serialize};

/// Detailed information about a validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationDetail {
    /// The field that failed validation
    pub field: String,
    /// The error message for this field
    pub message: String,
    /// The invalid value (if available and safe to include)
    pub value: Option<String>,
}

impl ValidationDetail {
    /// Create a new validation detail
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Create a new validation detail with a value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }
}

/// Error category for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Compressor or backend configuration errors
    Configuration,
    /// Authentication failures against a remote rerank API
    Authentication,
    /// Request validation errors
    Validation,
    /// Rate limiting by a remote rerank API
    RateLimit,
    /// Network connectivity issues
    Network,
    /// Server-side errors from a remote rerank API
    Server,
    /// Model inference failures
    Inference,
    /// Internal library errors
    Internal,
}

impl ErrorCategory {
    /// Check if errors in this category are retryable by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }

    /// Get a human-readable description of this category
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Configuration error",
            ErrorCategory::Authentication => "Authentication error",
            ErrorCategory::Validation => "Validation error",
            ErrorCategory::RateLimit => "Rate limit exceeded",
            ErrorCategory::Network => "Network error",
            ErrorCategory::Server => "Server error",
            ErrorCategory::Inference => "Inference error",
            ErrorCategory::Internal => "Internal error",
        }
    }
}

/// Structured error body returned by remote rerank APIs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error message
    pub message: String,
    /// Error code (optional)
    #[serde(default)]
    pub code: Option<String>,
}
