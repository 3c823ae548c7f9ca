//! HTTP transport layer for the HTTP ranker backend.

mod http_transport;

pub use http_transport::{HttpTransport, ReqwestTransport, TransportResponse};
