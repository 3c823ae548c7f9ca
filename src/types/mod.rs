//! The pipeline-facing document representation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Open metadata mapping attached to a document.
///
/// Values are arbitrary JSON; no fixed schema is assumed.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A candidate document in a retrieval pipeline.
///
/// Consumed and produced by [`RerankCompressor::compress`]. Within one
/// `compress` call the document's identity is positional: its index in the
/// input slice becomes the passage id sent to the ranker.
///
/// [`RerankCompressor::compress`]: crate::compressor::RerankCompressor::compress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text content of the document
    pub content: String,
    /// Key-value metadata associated with the document
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with empty metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Create a document with metadata
    pub fn with_metadata(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Add a single metadata entry, returning the document
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<String> for Document {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

impl From<&str> for Document {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}
