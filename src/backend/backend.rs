//! Search backend abstraction.
//!
//! The worker talks to the search service only through [`SearchBackend`], so a
//! hosted service client and the in-memory index are interchangeable.

use crate::domain::{Result, SearchRequest, SearchResults};

pub trait SearchBackend: Send {
    /// Runs one vertical query: text match, static filters, selected facet
    /// options, facet counts and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error when the service cannot answer the query.
    fn execute_vertical_query(&self, request: &SearchRequest) -> Result<SearchResults>;

    /// Number of locations available to search.
    fn location_count(&self) -> usize;
}
