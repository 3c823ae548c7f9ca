//! In-process cross-encoder inference via fastembed.
//!
//! Only compiled with the `local` feature. This is the backend built when a
//! compressor is configured with a model name and no client: a pure function
//! of the model identifier.

use super::traits::Ranker;
use super::types::{RankedPassage, RerankRequest};
use crate::errors::{CompressorError, CompressorResult};
use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use std::sync::Arc;
use tracing::{debug, info};

/// Map a model identifier to an engine model.
///
/// Unknown names fail with a configuration error listing the supported set.
pub(crate) fn parse_model_name(model: &str) -> CompressorResult<RerankerModel> {
    match model {
        "bge-reranker-base" => Ok(RerankerModel::BGERerankerBase),
        "jina-reranker-v1-turbo-en" => Ok(RerankerModel::JINARerankerV1TurboEn),
        "jina-reranker-v2-base-multilingual" => Ok(RerankerModel::JINARerankerV2BaseMultiligual),
        other => Err(CompressorError::Configuration {
            message: format!(
                "Unknown rerank model `{}`. Supported models: bge-reranker-base, \
                 jina-reranker-v1-turbo-en, jina-reranker-v2-base-multilingual",
                other
            ),
        }),
    }
}

/// Ranker running a cross-encoder model in-process.
///
/// The model is loaded once at construction and reused across calls.
/// Inference is synchronous under the hood and runs on a blocking task so it
/// does not stall the async executor.
pub struct LocalRanker {
    model_name: String,
    engine: Arc<TextRerank>,
}

impl LocalRanker {
    /// Load the named model and build a ranker over it.
    ///
    /// Model download and load cost is paid here; a failure surfaces as an
    /// inference error, since the model name itself was already validated.
    pub fn try_new(model: &str) -> CompressorResult<Self> {
        let engine_model = parse_model_name(model)?;

        debug!(model = %model, "loading local rerank model");
        let engine = TextRerank::try_new(RerankInitOptions::new(engine_model)).map_err(|e| {
            CompressorError::Inference {
                message: format!("Failed to load rerank model `{}`: {}", model, e),
            }
        })?;
        info!(model = %model, "local rerank model loaded");

        Ok(Self {
            model_name: model.to_string(),
            engine: Arc::new(engine),
        })
    }
}

#[async_trait]
impl Ranker for LocalRanker {
    fn model(&self) -> &str {
        &self.model_name
    }

    async fn rerank(&self, request: RerankRequest) -> CompressorResult<Vec<RankedPassage>> {
        let engine = self.engine.clone();
        let RerankRequest { query, passages } = request;

        let ranked = tokio::task::spawn_blocking(move || -> CompressorResult<Vec<RankedPassage>> {
            let texts: Vec<&str> = passages.iter().map(|p| p.text.as_str()).collect();

            let results = engine
                .rerank(query.as_str(), &texts, true, None)
                .map_err(|e| CompressorError::Inference {
                    message: format!("Cross-encoder scoring failed: {}", e),
                })?;

            // Results arrive sorted by descending score; keep that order.
            let mut ranked = Vec::with_capacity(results.len());
            for result in results {
                let passage =
                    passages
                        .get(result.index)
                        .ok_or_else(|| CompressorError::Internal {
                            message: format!(
                                "engine returned index {} for a batch of {} passages",
                                result.index,
                                passages.len()
                            ),
                        })?;
                let text = match result.document {
                    Some(text) => text,
                    None => passage.text.clone(),
                };
                ranked.push(RankedPassage::new(passage.id, text, f64::from(result.score)));
            }
            Ok(ranked)
        })
        .await
        .map_err(|e| CompressorError::Internal {
            message: format!("Inference task failed: {}", e),
        })??;

        Ok(ranked)
    }
}
