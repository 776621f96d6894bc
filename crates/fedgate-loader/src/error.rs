//! Round-level error types
//!
//! Only configuration problems cross the round boundary. Per-subgraph
//! transport, remote, and parse failures are logged and folded into the
//! round result instead.

use thiserror::Error;

/// Fatal, round-level configuration errors.
///
/// Any of these aborts the round before a single request is issued; no
/// partial result is produced and the cache is not touched.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The round was started with an empty subgraph list
    #[error("tried to load services from remote endpoints but none provided")]
    NoSubgraphs,

    /// One subgraph has no routing URL. This aborts the whole round, not
    /// just the one subgraph — deliberately stricter than the per-subgraph
    /// tolerance for network failures.
    #[error("tried to load schema from {name} but no url found")]
    MissingUrl {
        /// Name of the subgraph missing its URL
        name: String,
    },

    /// The configured namespaces did not combine into a valid matcher
    #[error("invalid namespace configuration: {0}")]
    Namespace(#[from] fedgate_sdl::RewriteError),

    /// A configured header name or value is not valid for HTTP
    #[error("invalid header `{name}`")]
    InvalidHeader {
        /// Offending header name
        name: String,
    },
}
