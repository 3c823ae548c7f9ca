//! The ranker collaborator: trait seam, request/result types, and backends.
//!
//! The compressor talks to a reranking engine only through the [`Ranker`]
//! trait. Two backends ship with the crate:
//!
//! - [`HttpRanker`] - remote rerank API speaking the `/v1/rerank` JSON shape
//! - [`LocalRanker`] - in-process cross-encoder inference (`local` feature)

mod http;
mod source;
mod traits;
mod types;

#[cfg(feature = "local")]
mod local;

pub use http::HttpRanker;
pub use source::ClientSource;
pub use traits::Ranker;
pub use types::{Passage, RankedPassage, RerankRequest};

#[cfg(feature = "local")]
pub use local::LocalRanker;
