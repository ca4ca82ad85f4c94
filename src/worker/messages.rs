//! Search worker message types.
//!
//! Requests and responses exchanged between the coordinator and the search
//! worker. Messages are serializable so the worker can sit behind any
//! transport, and each request carries the caller's trace context so worker
//! spans join the coordinator's trace.

use crate::domain::{SearchRequest, SearchResults};
use serde::{Deserialize, Serialize};

/// Trace and span ids of the span that issued a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace id, 32 hex digits.
    pub trace_id: String,

    /// Span id of the issuing span, 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `SearchMessage` constructors that attach the current trace context.
macro_rules! search_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl SearchMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

search_message_builders! {
    execute_vertical_query(ExecuteVerticalQuery { request: SearchRequest }),
    load_index(LoadIndex { path: String }),
}

/// Requests handled by the search worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchMessage {
    /// Run one sequenced vertical query.
    ExecuteVerticalQuery {
        request: SearchRequest,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the worker's backend with the index stored at `path`.
    LoadIndex {
        path: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl SearchMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ExecuteVerticalQuery { trace_context, .. } | Self::LoadIndex { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    /// Sequence number of a query message.
    #[must_use]
    pub const fn sequence(&self) -> Option<u64> {
        match self {
            Self::ExecuteVerticalQuery { request, .. } => Some(request.sequence),
            Self::LoadIndex { .. } => None,
        }
    }
}

/// Responses produced by the search worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchResponse {
    /// A query finished; `sequence` echoes the request's number.
    QueryCompleted { sequence: u64, results: SearchResults },

    /// A query failed. Failures are reported, never retried.
    QueryFailed { sequence: u64, message: String },

    /// A new index is in place.
    IndexLoaded { count: usize },

    /// A non-query operation failed.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sequence: u64) -> SearchRequest {
        SearchRequest {
            sequence,
            vertical: "locations".to_string(),
            query: Some("coffee".to_string()),
            static_filters: vec![],
            facets: vec![],
            offset: 0,
            limit: 20,
        }
    }

    #[test]
    fn builders_skip_trace_context_without_otel_layer() {
        let message = SearchMessage::execute_vertical_query(request(7));
        assert_eq!(message.trace_context(), None);
        assert_eq!(message.sequence(), Some(7));
        assert_eq!(SearchMessage::load_index("/tmp/x.json".to_string()).sequence(), None);
    }

    #[test]
    fn messages_survive_a_json_transport() {
        let message = SearchMessage::ExecuteVerticalQuery {
            request: request(3),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert_eq!(serde_json::from_str::<SearchMessage>(&payload).unwrap(), message);
    }
}
