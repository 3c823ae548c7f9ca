//! HTTP backend for remote rerank APIs.

use super::traits::Ranker;
use super::types::{RankedPassage, RerankRequest};
use crate::auth::{AuthManager, BearerAuthManager};
use crate::config::HttpRankerConfig;
use crate::errors::{CompressorError, CompressorResult};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::Metadata;
use async_trait::async_trait;
use http::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

const RERANK_PATH: &str = "/v1/rerank";

/// Wire request sent to the remote API
#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: Vec<WireDocument<'a>>,
}

#[derive(Serialize)]
struct WireDocument<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "meta_is_empty")]
    meta: &'a Metadata,
}

fn meta_is_empty(meta: &&Metadata) -> bool {
    meta.is_empty()
}

/// Wire response returned by the remote API
#[derive(Deserialize)]
struct WireResponse {
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireResult {
    index: usize,
    relevance_score: f64,
    #[serde(default)]
    document: Option<WireDocumentEcho>,
}

#[derive(Deserialize)]
struct WireDocumentEcho {
    text: String,
}

/// Ranker backed by a remote rerank API.
///
/// Speaks the common `POST /v1/rerank` JSON shape: a model name, a query, and
/// a list of `{text}` documents in; a list of `{index, relevance_score}`
/// results in descending relevance order out. Passage metadata rides along as
/// a `meta` field on each document when present. Response indexes are mapped
/// back to the submitted passage ids.
pub struct HttpRanker {
    transport: Arc<dyn HttpTransport>,
    auth_manager: Arc<dyn AuthManager>,
    base_url: Url,
    model: String,
}

impl HttpRanker {
    /// Create a ranker over an existing transport and auth manager
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth_manager: Arc<dyn AuthManager>,
        base_url: Url,
        model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            auth_manager,
            base_url,
            model: model.into(),
        }
    }

    /// Create a ranker from configuration, building its own transport.
    ///
    /// The API key is checked for basic well-formedness here so a malformed
    /// key fails at construction rather than on the first request.
    pub fn from_config(config: HttpRankerConfig) -> CompressorResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)?;
        let auth_manager =
            BearerAuthManager::with_client_name(config.api_key, config.client_name);
        auth_manager
            .validate_api_key()
            .map_err(|message| CompressorError::Configuration { message })?;

        let transport = Arc::new(ReqwestTransport::new(config.timeout)?) as Arc<dyn HttpTransport>;

        Ok(Self::new(
            transport,
            Arc::new(auth_manager),
            base_url,
            config.model,
        ))
    }

    /// Build the endpoint URL
    fn rerank_url(&self) -> CompressorResult<String> {
        self.base_url
            .join(RERANK_PATH)
            .map(|u| u.to_string())
            .map_err(|e| CompressorError::Configuration {
                message: format!("Invalid URL: {}", e),
            })
    }
}

#[async_trait]
impl Ranker for HttpRanker {
    fn model(&self) -> &str {
        &self.model
    }

    async fn rerank(&self, request: RerankRequest) -> CompressorResult<Vec<RankedPassage>> {
        let url = self.rerank_url()?;
        let headers = self.auth_manager.get_headers();

        let wire = WireRequest {
            model: &self.model,
            query: &request.query,
            documents: request
                .passages
                .iter()
                .map(|p| WireDocument {
                    text: &p.text,
                    meta: &p.meta,
                })
                .collect(),
        };
        let body = serde_json::to_vec(&wire)?;

        debug!(
            model = %self.model,
            passages = request.passages.len(),
            "sending rerank request"
        );

        let response = self
            .transport
            .execute(Method::POST, url, headers, Some(body))
            .await?;

        let parsed: WireResponse = serde_json::from_slice(&response.body)?;

        let mut ranked = Vec::with_capacity(parsed.results.len());
        for result in parsed.results {
            let passage = request.passages.get(result.index).ok_or_else(|| {
                CompressorError::Internal {
                    message: format!(
                        "rerank API returned index {} for a batch of {} passages",
                        result.index,
                        request.passages.len()
                    ),
                }
            })?;
            let text = match result.document {
                Some(echo) => echo.text,
                None => passage.text.clone(),
            };
            ranked.push(RankedPassage::new(passage.id, text, result.relevance_score));
        }

        info!(
            model = %self.model,
            passages = request.passages.len(),
            results = ranked.len(),
            "rerank request completed"
        );

        Ok(ranked)
    }
}
