//! The `Ranker` trait all backends implement.

use super::types::{RankedPassage, RerankRequest};
use crate::errors::CompressorResult;
use async_trait::async_trait;

/// Trait for reranking backends.
///
/// Implementations score every passage in the request against the query and
/// return the results in descending relevance order. Callers treat the
/// returned order as authoritative; truncation and threshold filtering happen
/// downstream in the compressor.
///
/// Implementations must be safe for repeated sequential reuse; the crate
/// makes no internal guarantee about concurrent calls beyond what `Send +
/// Sync` provides.
#[async_trait]
pub trait Ranker: Send + Sync {
    /// Get the model identifier this ranker scores with
    fn model(&self) -> &str;

    /// Score all passages in the request against the query.
    ///
    /// Returns one result per submitted passage, ordered by descending
    /// relevance. Errors propagate to the caller unmodified.
    async fn rerank(&self, request: RerankRequest) -> CompressorResult<Vec<RankedPassage>>;
}
