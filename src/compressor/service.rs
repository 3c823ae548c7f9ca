//! Compressor implementation.

use crate::config::CompressorConfig;
use crate::errors::{CompressorError, CompressorResult};
use crate::ranker::{ClientSource, Passage, Ranker, RerankRequest};
use crate::types::{Document, Metadata};
use crate::{METADATA_ID_KEY, METADATA_RELEVANCE_KEY};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info};

/// Document compressor backed by a reranking engine.
///
/// `compress` marshals the input documents into passages, submits them with
/// the query as one batched request, then prefix-truncates the ranked output
/// to `top_n` and drops results below `score_threshold`. Kept documents come
/// back in the ranker's order with the original metadata plus injected
/// `id` / `relevance_score` keys.
///
/// The ranker client is either caller-supplied or built lazily from the
/// configured model on first use and cached for the lifetime of the
/// compressor. Everything else is call-scoped; `compress` holds no state
/// between invocations.
pub struct RerankCompressor {
    config: CompressorConfig,
    source: ClientSource,
    client: OnceCell<Arc<dyn Ranker>>,
}

impl RerankCompressor {
    /// Create a builder with default settings
    pub fn builder() -> RerankCompressorBuilder {
        RerankCompressorBuilder::new()
    }

    /// Create a compressor that builds its client from `config.model`.
    ///
    /// Fails with a configuration error when the build has no local inference
    /// support or the model name is unknown; supply a client instead in that
    /// case. The check runs here so `compress` never raises configuration
    /// errors.
    pub fn new(config: CompressorConfig) -> CompressorResult<Self> {
        config.validate()?;
        let source = ClientSource::Lazy {
            model: config.model.clone(),
        };
        source.validate()?;
        Ok(Self {
            config,
            source,
            client: OnceCell::new(),
        })
    }

    /// Create a compressor over a caller-supplied ranker.
    ///
    /// The client's lifetime and thread-safety are the caller's
    /// responsibility; it is reused across calls.
    pub fn with_client(config: CompressorConfig, client: Arc<dyn Ranker>) -> CompressorResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: ClientSource::Provided(client),
            client: OnceCell::new(),
        })
    }

    /// Get the active configuration
    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Resolve the ranker client, building and caching it on first use
    fn client(&self) -> CompressorResult<&Arc<dyn Ranker>> {
        self.client.get_or_try_init(|| self.source.resolve())
    }

    /// Rerank `documents` against `query`, then truncate and filter.
    ///
    /// Returns between 0 and `min(top_n, documents.len())` documents in the
    /// ranker's relevance order. An empty input returns an empty output
    /// without submitting any passages. Errors raised by the ranker propagate
    /// unmodified; there is no retry and no partial result.
    pub async fn compress(
        &self,
        documents: &[Document],
        query: &str,
    ) -> CompressorResult<Vec<Document>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let client = self.client()?;

        // Passage ids are the 0-based input positions; the ranker's result
        // ids index back into `documents`.
        let passages: Vec<Passage> = documents
            .iter()
            .enumerate()
            .map(|(id, doc)| {
                let meta = self.passage_meta(doc);
                Passage::new(id, doc.content.clone()).with_meta(meta)
            })
            .collect();

        debug!(
            model = %client.model(),
            documents = documents.len(),
            "submitting rerank batch"
        );

        let request = RerankRequest::new(query, passages);
        let results = client.rerank(request).await?;

        // Truncate first, then filter: a high-scoring result the ranker
        // placed below top_n is dropped even when it clears the threshold.
        let mut compressed = Vec::new();
        for ranked in results.into_iter().take(self.config.top_n) {
            if ranked.score < self.config.score_threshold {
                continue;
            }

            let original = documents.get(ranked.id).ok_or_else(|| {
                CompressorError::Internal {
                    message: format!(
                        "ranker returned id {} for a batch of {} documents",
                        ranked.id,
                        documents.len()
                    ),
                }
            })?;

            // Full original metadata, then the injected keys; injected keys
            // win on collision.
            let mut metadata = original.metadata.clone();
            metadata.insert(
                format!("{}{}", self.config.prefix_metadata, METADATA_ID_KEY),
                serde_json::json!(ranked.id),
            );
            metadata.insert(
                format!("{}{}", self.config.prefix_metadata, METADATA_RELEVANCE_KEY),
                serde_json::json!(ranked.score),
            );

            compressed.push(Document::with_metadata(ranked.text, metadata));
        }

        info!(
            documents = documents.len(),
            kept = compressed.len(),
            top_n = self.config.top_n,
            "compressed documents"
        );

        Ok(compressed)
    }

    /// Metadata forwarded to the ranker for one document: the full mapping,
    /// or its restriction to the allowed key set. Absent keys are skipped.
    fn passage_meta(&self, doc: &Document) -> Metadata {
        match &self.config.filter_metadata_keys {
            Some(keys) => doc
                .metadata
                .iter()
                .filter(|(key, _)| keys.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            None => doc.metadata.clone(),
        }
    }
}

/// Builder for [`RerankCompressor`]
#[derive(Default)]
pub struct RerankCompressorBuilder {
    config: CompressorConfig,
    client: Option<Arc<dyn Ranker>>,
}

impl RerankCompressorBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: CompressorConfig::default(),
            client: None,
        }
    }

    /// Supply a pre-built ranker client
    pub fn client(mut self, client: Arc<dyn Ranker>) -> Self {
        self.client = Some(client);
        self
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
            Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: CompressorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the settings and build the compressor
    pub fn build(self) -> CompressorResult<RerankCompressor> {
        match self.client {
            Some(client) => RerankCompressor::with_client(self.config, client),
            None => RerankCompressor::new(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockRanker;
    use crate::ranker::RankedPassage;

    #[tokio::test]
    async fn test_compress_empty_input_submits_nothing() {
        let ranker = Arc::new(MockRanker::new());
        let compressor = RerankCompressor::builder()
            .client(ranker.clone())
            .build()
            .unwrap();

        let result = compressor.compress(&[], "query").await.unwrap();
        assert!(result.is_empty());
        assert!(ranker.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_compress_assigns_positional_ids() {
        let ranker = Arc::new(MockRanker::new());
        let compressor = RerankCompressor::builder()
            .client(ranker.clone())
            .build()
            .unwrap();

        let documents = vec![Document::new("a"), Document::new("b"), Document::new("c")];
        compressor.compress(&documents, "q").await.unwrap();

        let request = ranker.last_request().unwrap();
        let ids: Vec<usize> = request.passages.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(request.passages[1].text, "b");
    }

    #[tokio::test]
    async fn test_compress_error_propagates() {
        let ranker = Arc::new(MockRanker::new());
        ranker.add_error(CompressorError::Inference {
            message: "model exploded".to_string(),
        });
        let compressor = RerankCompressor::builder()
            .client(ranker)
            .build()
            .unwrap();

        let result = compressor.compress(&[Document::new("a")], "q").await;
        assert!(matches!(result, Err(CompressorError::Inference { .. })));
    }

    #[tokio::test]
    async fn test_compress_rejects_out_of_range_id() {
        let ranker = Arc::new(MockRanker::new());
        ranker.add_response(vec![RankedPassage::new(9, "ghost", 0.9)]);
        let compressor = RerankCompressor::builder()
            .client(ranker)
            .build()
            .unwrap();

        let result = compressor.compress(&[Document::new("a")], "q").await;
        assert!(matches!(result, Err(CompressorError::Internal { .. })));
    }
}
