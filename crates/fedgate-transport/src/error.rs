//! Transport-level error types

use thiserror::Error;

/// Errors produced while issuing a request to a subgraph.
///
/// Every variant is subgraph-scoped: the loader converts these into a
/// per-subgraph failure outcome rather than failing the round.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The descriptor's URL did not parse as a URI
    #[error("invalid subgraph url `{0}`")]
    InvalidUrl(String),

    /// The request could not be constructed
    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    /// The connection or transfer failed
    #[error("request failed: {0}")]
    Http(#[from] hyper::Error),

    /// The subgraph answered outside the 2xx range
    #[error("subgraph responded with status {0}")]
    Status(hyper::StatusCode),

    /// The response body was not a valid GraphQL JSON envelope
    #[error("response body was not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
