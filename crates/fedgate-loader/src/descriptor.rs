//! Subgraph descriptors and loader configuration

use crate::error::LoaderError;
use fedgate_transport::{GraphQLSource, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One subgraph as configured for a round.
///
/// Immutable for the round's duration. `name` is the unique key into the
/// SDL cache; `url` is optional here but required by the time a round
/// starts.
#[derive(Debug, Clone)]
pub struct SubgraphDescriptor {
    /// Unique subgraph name
    pub name: String,
    /// Routing URL; a round refuses to start while this is missing
    pub url: Option<String>,
    /// Namespace prefix applied to the subgraph's type names
    pub namespace: Option<String>,
    /// Fetch capability used for this subgraph's requests
    pub source: Arc<dyn GraphQLSource>,
}

impl SubgraphDescriptor {
    /// Create a descriptor with just a name and fetch capability.
    #[must_use]
    pub fn new(name: impl Into<String>, source: Arc<dyn GraphQLSource>) -> Self {
        Self {
            name: name.into(),
            url: None,
            namespace: None,
            source,
        }
    }

    /// Set the routing URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the namespace prefix.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Loader configuration shared across every subgraph in a round.
///
/// Deserializable so the embedding process can carry it in its own config
/// file; `headers` is applied identically to every subgraph's request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Headers attached to every outbound introspection request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl LoaderConfig {
    /// Create an empty configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shared header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Convert the configured headers into an HTTP header map.
    ///
    /// # Errors
    /// Returns [`LoaderError::InvalidHeader`] if a name or value is not
    /// valid HTTP.
    pub fn header_map(&self) -> Result<HeaderMap, LoaderError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name: HeaderName =
                name.parse()
                    .map_err(|_| LoaderError::InvalidHeader { name: name.clone() })?;
            let header_value: HeaderValue =
                value
                    .parse()
                    .map_err(|_| LoaderError::InvalidHeader { name: name.clone() })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedgate_test_utils::StaticSource;

    #[test]
    fn descriptor_builder() {
        let descriptor = SubgraphDescriptor::new("reviews", Arc::new(StaticSource::new("")))
            .with_url("http://reviews/graphql")
            .with_namespace("Rev");
        assert_eq!(descriptor.name, "reviews");
        assert_eq!(descriptor.url.as_deref(), Some("http://reviews/graphql"));
        assert_eq!(descriptor.namespace.as_deref(), Some("Rev"));
    }

    #[test]
    fn config_headers_convert_to_header_map() {
        let config = LoaderConfig::new()
            .with_header("authorization", "Bearer token")
            .with_header("x-gateway", "fedgate");
        let map = config.header_map().unwrap();
        assert_eq!(map.get("authorization").unwrap(), "Bearer token");
        assert_eq!(map.get("x-gateway").unwrap(), "fedgate");
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let config = LoaderConfig::new().with_header("bad header", "x");
        assert!(matches!(
            config.header_map(),
            Err(LoaderError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn config_deserializes_from_toml() {
        let config: LoaderConfig = toml::from_str(
            "[headers]\n\
             authorization = \"Bearer token\"\n",
        )
        .unwrap();
        assert_eq!(
            config.headers.get("authorization").map(String::as_str),
            Some("Bearer token")
        );
    }
}
