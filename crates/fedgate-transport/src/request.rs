//! Outbound GraphQL request shape

use hyper::header::HeaderMap;

/// The fixed introspection query used to retrieve a subgraph's schema text.
pub const SERVICE_DEFINITION_QUERY: &str = "query GetServiceDefinition { _service { sdl } }";

/// One GraphQL request against a subgraph endpoint.
///
/// Always sent as POST with a JSON body of the form `{"query": …}`.
#[derive(Debug, Clone)]
pub struct GraphQLRequest {
    /// Target endpoint
    pub url: String,
    /// Query text
    pub query: String,
    /// Headers attached to the outbound request
    pub headers: HeaderMap,
}

impl GraphQLRequest {
    /// Build a request with an explicit query.
    #[inline]
    #[must_use]
    pub fn new(url: impl Into<String>, query: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            url: url.into(),
            query: query.into(),
            headers,
        }
    }

    /// Build the fixed service-definition introspection request.
    #[inline]
    #[must_use]
    pub fn introspection(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self::new(url, SERVICE_DEFINITION_QUERY, headers)
    }

    /// JSON body for the POST request.
    #[must_use]
    pub fn body(&self) -> String {
        serde_json::json!({ "query": self.query }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn introspection_request_uses_fixed_query() {
        let request = GraphQLRequest::introspection("http://reviews/graphql", HeaderMap::new());
        assert_eq!(request.query, SERVICE_DEFINITION_QUERY);
        assert_eq!(request.url, "http://reviews/graphql");
    }

    #[test]
    fn body_is_json_encoded() {
        let request = GraphQLRequest::new("http://x", "query { a }", HeaderMap::new());
        assert_eq!(request.body(), r#"{"query":"query { a }"}"#);
    }
}
