//! Request and result types for the ranker seam.
//!
//! These shapes are call-scoped: passages are built from the input documents
//! at the start of a `compress` call and discarded when it returns. They are
//! also the wire format of the HTTP backend.

use crate::types::Metadata;
use serde::{Deserialize, Serialize};

/// A passage submitted to the ranker.
///
/// `id` is the 0-based position of the source document in the input batch;
/// ids are contiguous and a bijection with input positions for the duration
/// of one call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passage {
    /// Position of the source document in the input batch
    pub id: usize,
    /// Text content forwarded to the ranker
    pub text: String,
    /// Metadata forwarded to the ranker as scoring context, possibly
    /// restricted to a caller-specified key set
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub meta: Metadata,
}

impl Passage {
    /// Create a passage with empty metadata
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            meta: Metadata::new(),
        }
    }

    /// Attach metadata to the passage
    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

/// A batched rerank request: one query against a sequence of passages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RerankRequest {
    /// The query to score passages against
    pub query: String,
    /// Passages in input order
    pub passages: Vec<Passage>,
}

impl RerankRequest {
    /// Create a new rerank request
    pub fn new(query: impl Into<String>, passages: Vec<Passage>) -> Self {
        Self {
            query: query.into(),
            passages,
        }
    }
}

/// One scored result produced by a ranker.
///
/// `id` refers back to the submitted passage id. Backends return results in
/// descending relevance order; the compressor never re-sorts them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPassage {
    /// Passage id this score belongs to
    pub id: usize,
    /// The (possibly backend-echoed) passage text
    pub text: String,
    /// Relevance score, higher is more relevant
    pub score: f64,
}

impl RankedPassage {
    /// Create a ranked passage
    pub fn new(id: usize, text: impl Into<String>, score: f64) -> Self {
        Self {
            id,
            text: text.into(),
            score,
        }
    }
}
