//! Search worker implementation.
//!
//! The worker owns the search backend and turns [`SearchMessage`]s into
//! [`SearchResponse`]s. It never touches coordinator state; responses are
//! delivered back as events, possibly out of order, and the coordinator
//! decides whether they still apply.

use crate::backend::{MemoryBackend, SearchBackend};
use crate::domain::{LocatorError, Result, SearchRequest};
use crate::infrastructure::paths;
use crate::worker::{SearchMessage, SearchResponse};
use std::path::PathBuf;

/// File name of the default index inside the data directory.
pub const DEFAULT_INDEX_FILE: &str = "locations.json";

/// Executes search messages against a backend.
#[derive(Default)]
pub struct SearchWorker {
    /// Backend, opened lazily from the data directory when not injected.
    backend: Option<Box<dyn SearchBackend>>,
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker")
            .field("locations", &self.backend.as_ref().map(|b| b.location_count()))
            .finish()
    }
}

impl SearchWorker {
    /// Creates a worker over an existing backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn SearchBackend>) -> Self {
        Self { backend: Some(backend) }
    }

    /// Creates a worker over the default index in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the index exists but cannot be read.
    pub fn open_default() -> Result<Self> {
        let path = paths::get_data_dir().join(DEFAULT_INDEX_FILE);
        let backend: Box<dyn SearchBackend> = Box::new(MemoryBackend::open(path)?);
        Ok(Self::with_backend(backend))
    }

    fn get_backend(&mut self) -> Result<&dyn SearchBackend> {
        if self.backend.is_none() {
            tracing::debug!("no backend injected, opening default index");
            self.backend = Self::open_default()?.backend;
        }
        self.backend
            .as_deref()
            .ok_or_else(|| LocatorError::Worker("search backend not initialized".to_string()))
    }

    /// Logs the outcome of a backend call and maps failures to a response.
    fn handle_backend_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> SearchResponse
    where
        F: FnOnce(T) -> SearchResponse,
        E: FnOnce(String) -> SearchResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "backend operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "backend operation failed");
                on_error(format!("{operation}: {e}"))
            }
        }
    }

    fn handle_execute_vertical_query(&mut self, request: &SearchRequest) -> SearchResponse {
        let sequence = request.sequence;

        Self::handle_backend_result(
            "execute vertical query",
            self.get_backend()
                .and_then(|backend| backend.execute_vertical_query(request)),
            |results| {
                tracing::debug!(
                    sequence,
                    result_count = results.result_count,
                    page_len = results.locations.len(),
                    "vertical query completed"
                );
                SearchResponse::QueryCompleted { sequence, results }
            },
            |message| SearchResponse::QueryFailed { sequence, message },
        )
    }

    fn handle_load_index(&mut self, path: String) -> SearchResponse {
        Self::handle_backend_result(
            "load index",
            MemoryBackend::open(PathBuf::from(&path)),
            |backend| {
                let count = backend.location_count();
                tracing::debug!(path = %path, count, "index loaded");
                self.backend = Some(Box::new(backend));
                SearchResponse::IndexLoaded { count }
            },
            |message| SearchResponse::Error { message },
        )
    }

    /// Re-attaches the issuing span's context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &SearchMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: SearchMessage) -> SearchResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let _span = tracing::debug_span!(
            "worker_handle_message",
            sequence = ?message.sequence(),
            traced = message.trace_context().is_some()
        )
        .entered();

        match message {
            SearchMessage::ExecuteVerticalQuery { request, .. } => self.handle_execute_vertical_query(&request),
            SearchMessage::LoadIndex { path, .. } => self.handle_load_index(path),
        }
    }

    /// Handles a JSON-encoded message and returns the JSON-encoded response.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not a valid message or the
    /// response cannot be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: SearchMessage = serde_json::from_str(payload)?;
        let response = self.handle_message(message);
        Ok(serde_json::to_string(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocationRecord;
    use crate::domain::SearchResults;

    struct FailingBackend;

    impl SearchBackend for FailingBackend {
        fn execute_vertical_query(&self, _request: &SearchRequest) -> Result<SearchResults> {
            Err(LocatorError::Search("service unavailable".to_string()))
        }

        fn location_count(&self) -> usize {
            0
        }
    }

    fn request(sequence: u64) -> SearchRequest {
        SearchRequest {
            sequence,
            vertical: "locations".to_string(),
            query: None,
            static_filters: vec![],
            facets: vec![],
            offset: 0,
            limit: 20,
        }
    }

    fn worker() -> SearchWorker {
        SearchWorker::with_backend(Box::new(MemoryBackend::new(
            vec![LocationRecord::new("a", "Alpha", 45.0, 9.0)],
            vec![],
        )))
    }

    #[test]
    fn query_response_echoes_sequence() {
        let response = worker().handle_message(SearchMessage::execute_vertical_query(request(42)));
        match response {
            SearchResponse::QueryCompleted { sequence, results } => {
                assert_eq!(sequence, 42);
                assert_eq!(results.result_count, 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn backend_failure_becomes_query_failed() {
        let mut worker = SearchWorker::with_backend(Box::new(FailingBackend));
        let response = worker.handle_message(SearchMessage::execute_vertical_query(request(5)));
        assert!(matches!(
            response,
            SearchResponse::QueryFailed { sequence: 5, ref message } if message.contains("service unavailable")
        ));
    }

    #[test]
    fn load_index_replaces_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(
            &path,
            r#"{"version":1,"locations":[
                {"id":"x","name":"X","latitude":1.0,"longitude":2.0},
                {"id":"y","name":"Y","latitude":1.0,"longitude":2.0}
            ]}"#,
        )
        .unwrap();

        let mut worker = worker();
        let response = worker.handle_message(SearchMessage::load_index(path.display().to_string()));
        assert_eq!(response, SearchResponse::IndexLoaded { count: 2 });
    }

    #[test]
    fn payload_round_trip_through_json() {
        let payload = serde_json::to_string(&SearchMessage::execute_vertical_query(request(1))).unwrap();
        let response = worker().handle_payload(&payload).unwrap();
        let decoded: SearchResponse = serde_json::from_str(&response).unwrap();
        assert!(matches!(decoded, SearchResponse::QueryCompleted { sequence: 1, .. }));
        assert!(worker().handle_payload("not json").is_err());
    }
}
