//! # Rerank Compressor
//!
//! Adapter that lets a retrieval pipeline rerank candidate documents against a
//! query with an external cross-encoder, then truncate and filter the result.
//!
//! ## Features
//!
//! - Single `compress(documents, query)` operation: marshal documents into
//!   passages, invoke the ranker, map results back to documents
//! - Result-count cap (`top_n`) and inclusive score threshold
//! - Metadata passthrough with injected `id` / `relevance_score` keys
//! - Pluggable ranker backends behind the [`Ranker`] trait
//! - HTTP backend for remote rerank APIs (`/v1/rerank` JSON shape)
//! - Optional in-process cross-encoder inference (`local` feature)
//! - Comprehensive observability with `tracing`
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rerank_compressor::{Document, RerankCompressor, Ranker};
//! # use rerank_compressor::mocks::MockRanker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     # let client: Arc<dyn Ranker> = Arc::new(MockRanker::new());
//!     let compressor = RerankCompressor::builder()
//!         .client(client)
//!         .top_n(3)
//!         .score_threshold(0.5)
//!         .build()?;
//!
//!     let documents = vec![
//!         Document::new("Paris is the capital of France."),
//!         Document::new("London is the capital of England."),
//!     ];
//!
//!     let compressed = compressor
//!         .compress(&documents, "What is the capital of France?")
//!         .await?;
//!
//!     for doc in compressed {
//!         println!("{}", doc.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `compressor` - The [`RerankCompressor`] adapter and its builder
//! - `config` - Configuration types and builders
//! - `ranker` - The [`Ranker`] trait, request/result types, and backends
//! - `auth` - Authentication header management for the HTTP backend
//! - `transport` - HTTP transport layer
//! - `errors` - Error types and taxonomy
//! - `types` - The pipeline-facing [`Document`] type
//! - `observability` - Logging configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod auth;
pub mod compressor;
pub mod config;
pub mod errors;
pub mod observability;
pub mod ranker;
pub mod transport;
pub mod types;

// Testing support, usable from integration tests and downstream crates
pub mod fixtures;
pub mod mocks;

// Re-exports for convenience
pub use auth::{AuthManager, BearerAuthManager};
pub use compressor::{RerankCompressor, RerankCompressorBuilder};
pub use config::{CompressorConfig, CompressorConfigBuilder, HttpRankerConfig};
pub use errors::{CompressorError, CompressorResult, ValidationDetail};
pub use observability::{init_logging, LogFormat, LogLevel, LoggingConfig};
pub use ranker::{ClientSource, HttpRanker, Passage, RankedPassage, Ranker, RerankRequest};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
pub use types::{Document, Metadata};

#[cfg(feature = "local")]
pub use ranker::LocalRanker;

/// The default model loaded when no client is supplied
pub const DEFAULT_MODEL: &str = "bge-reranker-base";

/// The default number of documents returned by `compress`
pub const DEFAULT_TOP_N: usize = 3;

/// The default minimum relevance score. Backends score on arbitrary scales,
/// including negative logits, so only negative infinity admits everything.
pub const DEFAULT_SCORE_THRESHOLD: f64 = f64::NEG_INFINITY;

/// The default request timeout for the HTTP backend
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Metadata key (before prefixing) carrying the assigned passage id
pub const METADATA_ID_KEY: &str = "id";

/// Metadata key (before prefixing) carrying the relevance score
pub const METADATA_RELEVANCE_KEY: &str = "relevance_score";
