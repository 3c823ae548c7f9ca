//! Error types for the rerank compressor.
//!
//! Configuration problems surface at construction time; everything a ranker
//! backend raises during `compress` propagates to the caller unmodified.

mod categories;
mod error;

pub use categories::{ApiErrorResponse, ErrorCategory, ValidationDetail};
pub use error::{CompressorError, CompressorResult};
