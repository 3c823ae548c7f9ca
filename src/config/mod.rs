//! Configuration types for the compressor and the HTTP ranker backend.

use crate::errors::{CompressorError, CompressorResult, ValidationDetail};
use crate::{DEFAULT_MODEL, DEFAULT_SCORE_THRESHOLD, DEFAULT_TIMEOUT_SECS, DEFAULT_TOP_N};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Configuration for [`RerankCompressor`].
///
/// The schema is strict: deserializing a configuration with unknown fields
/// fails instead of silently ignoring them.
///
/// [`RerankCompressor`]: crate::compressor::RerankCompressor
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompressorConfig {
    /// Model identifier the lazily-built client loads when no client is supplied
    pub model: String,
    /// Maximum number of documents returned, applied as prefix truncation of
    /// the ranker's output before score filtering
    pub top_n: usize,
    /// Inclusive minimum relevance score a result must meet to be kept
    pub score_threshold: f64,
    /// Prefix prepended to the injected `id` / `relevance_score` metadata keys
    pub prefix_metadata: String,
    /// When set, only these metadata keys (intersected with what each document
    /// actually has) are forwarded to the ranker; output metadata is unaffected
    pub filter_metadata_keys: Option<HashSet<String>>,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            top_n: DEFAULT_TOP_N,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            prefix_metadata: String::new(),
            filter_metadata_keys: None,
        }
    }
}

impl CompressorConfig {
    /// Create a builder with default settings
    pub fn builder() -> CompressorConfigBuilder {
        CompressorConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// `top_n = 0` is allowed and yields empty output. Any threshold that can
    /// admit results is allowed, negative values and negative infinity
    /// included, since backends differ in score ranges; only `NaN` and
    /// positive infinity are rejected.
    pub fn validate(&self) -> CompressorResult<()> {
        let mut details = Vec::new();

        if self.model.is_empty() {
            details.push(ValidationDetail::new("model", "Model cannot be empty"));
        }

        if self.score_threshold.is_nan() || self.score_threshold == f64::INFINITY {
            details.push(ValidationDetail::with_value(
                "score_threshold",
                "Score threshold cannot be NaN or positive infinity",
                self.score_threshold.to_string(),
            ));
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(CompressorError::Validation {
                message: format!("Compressor configuration invalid: {} error(s)", details.len()),
                details,
            })
        }
    }
}

/// Builder for [`CompressorConfig`]
#[derive(Debug, Clone, Default)]
pub struct CompressorConfigBuilder {
    config: CompressorConfig,
}

impl CompressorConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: CompressorConfig::default(),
        }
    }

    /// Set the model identifier for the lazily-built client
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the result-count cap
    pub fn top_n(mut self, top_n: usize) -> Self {
        self.config.top_n = top_n;
        self
    }

    /// Set the inclusive minimum relevance score
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.config.score_threshold = threshold;
        self
    }

    /// Set the prefix for injected metadata keys
    pub fn prefix_metadata(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix_metadata = prefix.into();
        self
    }

    /// Restrict the metadata keys forwarded to the ranker
    pub fn filter_metadata_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.filter_metadata_keys =
            Some(keys.into_iter().map(Into::into).collect::<HashSet<_>>());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> CompressorResult<CompressorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration for [`HttpRanker`].
///
/// [`HttpRanker`]: crate::ranker::HttpRanker
#[derive(Clone)]
pub struct HttpRankerConfig {
    /// Base URL of the rerank API
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: SecretString,
    /// Model requested from the remote API
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
    /// Optional client name forwarded in request headers
    pub client_name: Option<String>,
}

impl std::fmt::Debug for HttpRankerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRankerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("client_name", &self.client_name)
            .finish()
    }
}

impl HttpRankerConfig {
    /// Create a configuration for the given endpoint and API key
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client_name: None,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `RERANK_BASE_URL` and `RERANK_API_KEY` (both required) and
    /// `RERANK_MODEL` (optional).
    pub fn from_env() -> CompressorResult<Self> {
        let base_url =
            std::env::var("RERANK_BASE_URL").map_err(|_| CompressorError::Configuration {
                message: "RERANK_BASE_URL environment variable is not set".to_string(),
            })?;
        let api_key =
            std::env::var("RERANK_API_KEY").map_err(|_| CompressorError::Configuration {
                message: "RERANK_API_KEY environment variable is not set".to_string(),
            })?;

        let mut config = Self::new(base_url, SecretString::new(api_key));
        if let Ok(model) = std::env::var("RERANK_MODEL") {
            config.model = model;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the model requested from the remote API
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the client name forwarded in request headers
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> CompressorResult<()> {
        Url::parse(&self.base_url).map_err(|e| CompressorError::Configuration {
            message: format!("Invalid base URL `{}`: {}", self.base_url, e),
        })?;

        if self.api_key.expose_secret().is_empty() {
            return Err(CompressorError::Configuration {
                message: "API key cannot be empty".to_string(),
            });
        }

        if self.model.is_empty() {
            return Err(CompressorError::Configuration {
                message: "Model cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
