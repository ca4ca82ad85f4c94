//! OpenTelemetry tracing with file-based span export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `storefinder-otlp.json` under the data directory, one OTLP
//! JSON document per exported batch. The file rotates at 10 MB and three
//! rotated files are kept.
//!
//! Worker messages carry the issuing span's ids
//! ([`TraceContext`](crate::worker::TraceContext)), so a query issued by the
//! coordinator and its execution in the worker share one trace.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
