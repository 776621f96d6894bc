//! One fetch-transform-aggregate round across all configured subgraphs
//!
//! The aggregator validates the descriptor list, fans out one fetch job per
//! subgraph, then folds every job's outcome through a single mpsc consumer.
//! All cache reads, cache writes, and change-flag updates happen on that
//! consumer, sequentially, so no shared state is ever mutated from two
//! tasks at once. Jobs themselves only fetch, parse, and rewrite.

use crate::cache::SdlCache;
use crate::descriptor::SubgraphDescriptor;
use crate::error::LoaderError;
use fedgate_sdl::{parse_document, Document, NamespacePrefixer};
use fedgate_transport::{GraphQLRequest, GraphQLSource, HeaderMap};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One subgraph's parsed, possibly namespace-rewritten schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    /// Subgraph name
    pub name: String,
    /// URL the schema was fetched from
    pub url: String,
    /// Parsed schema document
    pub document: Document,
}

/// Discriminated result of one round.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// No subgraph's schema text differed from its cached entry
    Unchanged,
    /// At least one subgraph changed; `definitions` holds every subgraph
    /// that succeeded this round, in job completion order
    Changed {
        /// Surviving service definitions
        definitions: Vec<ServiceDefinition>,
    },
}

impl RoundOutcome {
    /// Whether the round detected any schema change.
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// The round's definitions, empty for an unchanged round.
    #[must_use]
    pub fn into_definitions(self) -> Vec<ServiceDefinition> {
        match self {
            Self::Unchanged => Vec::new(),
            Self::Changed { definitions } => definitions,
        }
    }
}

/// Per-job message sent to the aggregating consumer.
///
/// Failures carry nothing forward; their only trace is the log line the
/// job already emitted.
#[derive(Debug)]
enum FetchOutcome {
    Success {
        name: String,
        url: String,
        sdl: String,
        document: Document,
    },
    Failure,
}

/// Fetch every subgraph's schema concurrently and fold the results into a
/// single [`RoundOutcome`].
///
/// `cache` holds the last-seen SDL text per subgraph and must outlive the
/// round's caller; a changed round is one where at least one successful
/// subgraph's text differs from (or is absent from) its cache entry.
///
/// Individual subgraph failures — transport errors, remote-reported
/// GraphQL errors, unparseable SDL — are logged, excluded from the result,
/// and leave that subgraph's cache entry untouched. They never fail the
/// round.
///
/// # Errors
/// Returns [`LoaderError`] before any request is issued when the list is
/// empty or any descriptor lacks a URL. A single missing URL aborts the
/// whole round.
pub async fn load_service_definitions(
    subgraphs: &[SubgraphDescriptor],
    headers: &HeaderMap,
    cache: &mut SdlCache,
) -> Result<RoundOutcome, LoaderError> {
    if subgraphs.is_empty() {
        return Err(LoaderError::NoSubgraphs);
    }
    let mut jobs = Vec::with_capacity(subgraphs.len());
    for descriptor in subgraphs {
        let url = descriptor.url.clone().ok_or_else(|| LoaderError::MissingUrl {
            name: descriptor.name.clone(),
        })?;
        jobs.push(FetchJob {
            name: descriptor.name.clone(),
            url,
            namespace: descriptor.namespace.clone(),
            source: Arc::clone(&descriptor.source),
        });
    }

    // The matcher spans every namespace configured in the round, not just
    // the job's own. Compiled once, shared by all jobs.
    let namespaces: Vec<String> = subgraphs
        .iter()
        .filter_map(|d| d.namespace.clone())
        .collect();
    let prefixer = Arc::new(NamespacePrefixer::new(&namespaces)?);

    let (tx, mut rx) = mpsc::channel(jobs.len());
    for job in jobs {
        let tx = tx.clone();
        let headers = headers.clone();
        let prefixer = Arc::clone(&prefixer);
        tokio::spawn(async move {
            let outcome = job.run(headers, &prefixer).await;
            // Receiver outlives every sender; a send only fails if the
            // round itself was dropped.
            let _ = tx.send(outcome).await;
        });
    }
    drop(tx);

    // Single consumer: every cache mutation and the change-flag fold run
    // here, one message at a time, in job completion order.
    let mut changed = false;
    let mut definitions = Vec::new();
    while let Some(outcome) = rx.recv().await {
        match outcome {
            FetchOutcome::Success {
                name,
                url,
                sdl,
                document,
            } => {
                if cache.get(&name) != Some(sdl.as_str()) {
                    changed = true;
                }
                cache.insert(name.clone(), sdl);
                definitions.push(ServiceDefinition {
                    name,
                    url,
                    document,
                });
            }
            FetchOutcome::Failure => {}
        }
    }

    if changed {
        Ok(RoundOutcome::Changed { definitions })
    } else {
        Ok(RoundOutcome::Unchanged)
    }
}

/// One subgraph's fetch job: request, classify, parse, rewrite.
struct FetchJob {
    name: String,
    url: String,
    namespace: Option<String>,
    source: Arc<dyn GraphQLSource>,
}

impl FetchJob {
    async fn run(self, headers: HeaderMap, prefixer: &NamespacePrefixer) -> FetchOutcome {
        let request = GraphQLRequest::introspection(self.url.clone(), headers);
        let response = match self.source.process(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(
                    "Encountered error when loading {} at {}: {}",
                    self.name,
                    self.url,
                    error
                );
                return FetchOutcome::Failure;
            }
        };

        if !response.is_clean() {
            for error in &response.errors {
                tracing::error!(subgraph = %self.name, "{}", error.message);
            }
            return FetchOutcome::Failure;
        }

        let Some(sdl) = response.service_sdl() else {
            tracing::warn!(
                "Encountered error when loading {} at {}: response carried no sdl",
                self.name,
                self.url
            );
            return FetchOutcome::Failure;
        };

        let document = match parse_document(sdl) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(
                    "Encountered error when loading {} at {}: {}",
                    self.name,
                    self.url,
                    error
                );
                return FetchOutcome::Failure;
            }
        };

        let document = match &self.namespace {
            Some(namespace) => prefixer.apply(document, namespace),
            None => document,
        };

        FetchOutcome::Success {
            name: self.name,
            url: self.url,
            sdl: sdl.to_string(),
            document,
        }
    }
}
