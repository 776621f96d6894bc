//! The abstract subgraph fetch capability

use crate::error::TransportError;
use crate::request::GraphQLRequest;
use crate::response::GraphQLResponse;

/// Capability to execute one GraphQL request against a subgraph.
///
/// The loader is generic over this trait: production uses the HTTP
/// implementation, tests substitute in-memory fakes. Deadlines, retries,
/// and authentication all live behind this seam; the loader adds none of
/// its own.
#[async_trait::async_trait]
pub trait GraphQLSource: Send + Sync + std::fmt::Debug {
    /// Execute `request` and return the parsed response envelope.
    ///
    /// # Errors
    /// Returns [`TransportError`] when the request cannot be delivered or
    /// the reply is not a GraphQL envelope. Remote-reported GraphQL errors
    /// are not an `Err`: they come back inside the envelope.
    async fn process(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError>;
}
