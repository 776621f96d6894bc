//! Testing utilities for the fedgate workspace
//!
//! In-memory [`GraphQLSource`] fakes so loader behavior can be exercised
//! without a network.

#![allow(missing_docs)]

use fedgate_transport::{
    GraphQLError, GraphQLRequest, GraphQLResponse, GraphQLSource, StatusCode, TransportError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build the envelope a healthy subgraph returns for the introspection query.
#[must_use]
pub fn sdl_response(sdl: &str) -> GraphQLResponse {
    GraphQLResponse {
        data: Some(serde_json::json!({ "_service": { "sdl": sdl } })),
        errors: vec![],
    }
}

/// Source that always answers with the same SDL.
#[derive(Debug, Clone)]
pub struct StaticSource {
    sdl: String,
}

impl StaticSource {
    #[must_use]
    pub fn new(sdl: impl Into<String>) -> Self {
        Self { sdl: sdl.into() }
    }
}

#[async_trait::async_trait]
impl GraphQLSource for StaticSource {
    async fn process(&self, _request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        Ok(sdl_response(&self.sdl))
    }
}

/// Source that answers with remote-reported GraphQL errors and no data.
#[derive(Debug, Clone)]
pub struct ErrorSource {
    messages: Vec<String>,
}

impl ErrorSource {
    #[must_use]
    pub fn new<S: Into<String>>(messages: impl IntoIterator<Item = S>) -> Self {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl GraphQLSource for ErrorSource {
    async fn process(&self, _request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        Ok(GraphQLResponse {
            data: None,
            errors: self
                .messages
                .iter()
                .map(|message| GraphQLError {
                    message: message.clone(),
                })
                .collect(),
        })
    }
}

/// Source whose requests fail at the transport layer.
#[derive(Debug, Clone, Default)]
pub struct FailingSource;

impl FailingSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl GraphQLSource for FailingSource {
    async fn process(&self, _request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        Err(TransportError::Status(StatusCode::BAD_GATEWAY))
    }
}

/// Source that answers with fixed SDL and records every request it sees.
///
/// Clones share the recording, so a test can keep one handle and hand
/// another to a descriptor.
#[derive(Debug, Clone)]
pub struct RecordingSource {
    sdl: String,
    requests: Arc<Mutex<Vec<GraphQLRequest>>>,
}

impl RecordingSource {
    #[must_use]
    pub fn new(sdl: impl Into<String>) -> Self {
        Self {
            sdl: sdl.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request processed so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<GraphQLRequest> {
        self.requests.lock().expect("recording poisoned").clone()
    }
}

#[async_trait::async_trait]
impl GraphQLSource for RecordingSource {
    async fn process(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        self.requests
            .lock()
            .expect("recording poisoned")
            .push(request);
        Ok(sdl_response(&self.sdl))
    }
}

/// Wrapper that counts how many requests reach the inner source.
#[derive(Debug, Clone)]
pub struct CountingSource<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

impl<S> CountingSource<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests processed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Handle to the call counter, usable after the source is moved.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl<S: GraphQLSource> GraphQLSource for CountingSource<S> {
    async fn process(&self, request: GraphQLRequest) -> Result<GraphQLResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.process(request).await
    }
}
