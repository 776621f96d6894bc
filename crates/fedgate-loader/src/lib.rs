//! Concurrent subgraph schema loader with change detection
//!
//! The loader runs "rounds": one round issues the service-definition
//! introspection query to every configured subgraph in parallel, parses
//! each returned SDL document, optionally prefixes its type names with the
//! subgraph's namespace, and compares the raw text against a caller-owned
//! cache to decide whether anything changed since the last round.
//!
//! Failure handling is asymmetric on purpose:
//! - configuration problems (empty list, any missing URL) abort the round
//!   before any network activity
//! - per-subgraph failures (transport, remote-reported errors, bad SDL)
//!   are logged and dropped from the result without failing the round
//!
//! # Example
//!
//! ```rust,ignore
//! use fedgate_loader::{load_service_definitions, SdlCache, SubgraphDescriptor};
//! use fedgate_transport::{HeaderMap, HttpSource};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), fedgate_loader::LoaderError> {
//! let source = Arc::new(HttpSource::new());
//! let subgraphs = vec![
//!     SubgraphDescriptor::new("reviews", source.clone())
//!         .with_url("http://reviews.internal/graphql"),
//!     SubgraphDescriptor::new("products", source)
//!         .with_url("http://products.internal/graphql")
//!         .with_namespace("Prod"),
//! ];
//!
//! let mut cache = SdlCache::new();
//! let outcome = load_service_definitions(&subgraphs, &HeaderMap::new(), &mut cache).await?;
//! if outcome.changed() {
//!     println!("recomposing {} subgraphs", outcome.into_definitions().len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod round;

pub use cache::SdlCache;
pub use descriptor::{LoaderConfig, SubgraphDescriptor};
pub use error::LoaderError;
pub use round::{load_service_definitions, RoundOutcome, ServiceDefinition};
