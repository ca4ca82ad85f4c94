//! Vertical query orchestration.
//!
//! The executor assigns every query a monotonically increasing sequence
//! number and decides, when a response arrives, whether it is still relevant.
//! There is no cancellation: an earlier query that resolves after a later one
//! has been applied is discarded instead of overwriting newer results.

use super::modes::LoadingState;
use crate::domain::{Facet, SearchRequest, StaticFilter};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Outcome of matching a response against the executor's sequence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response is current; apply it.
    Apply,
    /// A newer response was already applied; drop this one.
    Stale,
}

/// Issues vertical queries and tracks their completion.
#[derive(Debug, Clone)]
pub struct SearchExecutor {
    loading: LoadingState,
    next_sequence: u64,
    last_applied: Option<u64>,
    in_flight: BTreeMap<u64, DateTime<Utc>>,
    page: usize,
    page_size: usize,
}

impl SearchExecutor {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            loading: LoadingState::Loading,
            next_sequence: 1,
            last_applied: None,
            in_flight: BTreeMap::new(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Builds the request for the next query, snapshotting filters and facets.
    pub fn issue(
        &mut self,
        vertical: &str,
        query: Option<&str>,
        static_filters: &[StaticFilter],
        facets: &[Facet],
    ) -> SearchRequest {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.in_flight.insert(sequence, Utc::now());

        tracing::debug!(
            sequence,
            vertical = %vertical,
            query = ?query,
            filters = static_filters.len(),
            page = self.page,
            in_flight = self.in_flight.len(),
            "issuing vertical query"
        );

        SearchRequest {
            sequence,
            vertical: vertical.to_string(),
            query: query.map(ToString::to_string),
            static_filters: static_filters.to_vec(),
            facets: facets.to_vec(),
            offset: self.page * self.page_size,
            limit: self.page_size,
        }
    }

    /// Records a successful response.
    pub fn complete(&mut self, sequence: u64) -> Completion {
        self.log_latency(sequence);

        if self.is_stale(sequence) {
            tracing::debug!(sequence, last_applied = ?self.last_applied, "discarding stale response");
            return Completion::Stale;
        }

        self.mark_applied(sequence);
        if self.loading != LoadingState::Ready {
            tracing::debug!(sequence, from = ?self.loading, "executor ready");
            self.loading = LoadingState::Ready;
        }
        Completion::Apply
    }

    /// Records a failed response.
    ///
    /// An applied failure counts as the newest outcome: older responses
    /// arriving after it are stale. A failure never leaves the blocking
    /// loader on screen.
    pub fn fail(&mut self, sequence: u64) -> Completion {
        self.log_latency(sequence);

        if self.is_stale(sequence) {
            return Completion::Stale;
        }
        self.mark_applied(sequence);
        if self.loading == LoadingState::Loading {
            self.loading = LoadingState::Idle;
        }
        Completion::Apply
    }

    /// Advances `last_applied` and forgets every query at or below it.
    fn mark_applied(&mut self, sequence: u64) {
        self.last_applied = Some(sequence);
        let still_pending = self.in_flight.split_off(&(sequence + 1));
        let superseded = self.in_flight.len();
        self.in_flight = still_pending;
        if superseded > 0 {
            tracing::debug!(sequence, superseded, "pruned superseded queries");
        }
    }

    fn is_stale(&self, sequence: u64) -> bool {
        self.last_applied.is_some_and(|last| sequence < last)
    }

    fn log_latency(&mut self, sequence: u64) {
        if let Some(issued_at) = self.in_flight.remove(&sequence) {
            let elapsed = Utc::now().signed_duration_since(issued_at);
            tracing::debug!(
                sequence,
                elapsed_ms = elapsed.num_milliseconds(),
                still_in_flight = self.in_flight.len(),
                "vertical query resolved"
            );
        }
    }

    #[must_use]
    pub const fn loading(&self) -> LoadingState {
        self.loading
    }

    #[must_use]
    pub const fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Number of pages needed for `result_count` results.
    #[must_use]
    pub const fn page_count(&self, result_count: usize) -> usize {
        result_count.div_ceil(self.page_size)
    }
}

impl Default for SearchExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
