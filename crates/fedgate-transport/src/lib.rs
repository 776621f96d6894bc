//! GraphQL wire types and the abstract subgraph fetch capability
//!
//! Everything the loader needs to talk to a subgraph without knowing how
//! the bytes move: the fixed introspection request, the response envelope,
//! the [`GraphQLSource`] trait, and a hyper-backed HTTP implementation.

#![warn(unreachable_pub)]

pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod source;

pub use error::TransportError;
pub use http::HttpSource;
pub use hyper::header::{HeaderMap, HeaderName, HeaderValue};
pub use hyper::StatusCode;
pub use request::{GraphQLRequest, SERVICE_DEFINITION_QUERY};
pub use response::{GraphQLError, GraphQLResponse};
pub use source::GraphQLSource;
