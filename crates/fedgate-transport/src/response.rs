//! GraphQL response envelope

use serde::Deserialize;

/// The JSON envelope a subgraph returns for any GraphQL request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQLResponse {
    /// The `data` payload, if the execution produced one
    pub data: Option<serde_json::Value>,
    /// Remote-reported execution errors
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

/// One remote-reported error object.
///
/// Only the message is carried forward; locations and extensions are not
/// consumed by the loader.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Human-readable error message
    pub message: String,
}

impl GraphQLResponse {
    /// True when the response carries data and no remote-reported errors.
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.data.is_some() && self.errors.is_empty()
    }

    /// Extract the schema text from a `{ _service { sdl } }` reply.
    #[must_use]
    pub fn service_sdl(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .get("_service")?
            .get("sdl")?
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_definition_reply() {
        let response: GraphQLResponse =
            serde_json::from_str(r#"{"data": {"_service": {"sdl": "type Query { ok: Boolean }"}}}"#)
                .unwrap();
        assert!(response.is_clean());
        assert_eq!(
            response.service_sdl(),
            Some("type Query { ok: Boolean }")
        );
    }

    #[test]
    fn deserializes_error_reply() {
        let response: GraphQLResponse = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "introspection disabled"}]}"#,
        )
        .unwrap();
        assert!(!response.is_clean());
        assert_eq!(response.errors[0].message, "introspection disabled");
        assert_eq!(response.service_sdl(), None);
    }

    #[test]
    fn missing_sdl_field_yields_none() {
        let response: GraphQLResponse =
            serde_json::from_str(r#"{"data": {"_service": {}}}"#).unwrap();
        assert!(response.is_clean());
        assert_eq!(response.service_sdl(), None);
    }
}
