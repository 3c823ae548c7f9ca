//! The rerank compressor: the adapter between a retrieval pipeline and a
//! reranking engine.

mod service;

pub use service::{RerankCompressor, RerankCompressorBuilder};
