//! Search backends answering vertical queries.
//!
//! # Modules
//!
//! - `backend`: [`SearchBackend`] trait implemented by every backend
//! - `memory`: JSON-file-backed in-memory index with fuzzy text matching
//! - `models`: on-disk index records, separate from domain results

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SearchBackend;
pub use memory::MemoryBackend;
pub use models::{FacetField, IndexData, LocationRecord};
