//! Observability for the compressor: structured logging configuration.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! up to the embedding application. [`init_logging`] is a convenience for
//! binaries and tests that want a sensible default.

mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
