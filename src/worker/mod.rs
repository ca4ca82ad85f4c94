//! Search worker answering vertical queries off the coordinator's path.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and message dispatch

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{SearchMessage, SearchResponse, TraceContext};
