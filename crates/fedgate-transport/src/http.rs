//! hyper-based [`GraphQLSource`] implementation

use crate::error::TransportError;
use crate::request::GraphQLRequest;
use crate::response::GraphQLResponse;
use crate::source::GraphQLSource;
use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request, Uri};

/// HTTP fetch capability backed by a shared hyper client.
///
/// Plain HTTP only; TLS termination is expected at the deployment edge.
/// Timeouts are whatever the underlying connector enforces — the loader
/// deliberately adds none.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client<HttpConnector>,
}

impl HttpSource {
    /// Create a source with a fresh connection pool.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl GraphQLSource for HttpSource {
    async fn process(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        let uri: Uri = request
            .url
            .parse()
            .map_err(|_| TransportError::InvalidUrl(request.url.clone()))?;

        let body = request.body();
        let mut outbound = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))?;
        outbound.headers_mut().extend(request.headers.clone());

        tracing::trace!(url = %request.url, "issuing subgraph request");
        let response = self.client.request(outbound).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
