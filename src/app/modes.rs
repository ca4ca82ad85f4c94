//! Loading and panel mode state types.
//!
//! # State Machine
//!
//! The executor moves through three loading states:
//! - **Loading**: initial state; a query is always issued on mount and the
//!   result list shows a blocking loader until it completes
//! - **Ready**: at least one query result has been applied
//! - **Idle**: the initial query failed; the loader is dropped so it never
//!   sticks, and later queries may still move to `Ready`
//!
//! The facet panel is either closed (results visible) or open over the list.

/// Loading state of the search executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    /// Initial query failed; nothing to show yet, no loader.
    Idle,

    /// Initial query in flight. The result list is replaced by a loader.
    Loading,

    /// Results have been applied at least once.
    ///
    /// Later queries run without the blocking overlay.
    Ready,
}

impl LoadingState {
    /// Whether the result list should be replaced by the loader.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Which panel occupies the left column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    /// Result cards with count, applied filters and pagination.
    Results,

    /// Facet tiles overlaying the results ("Filters & Features").
    ///
    /// Only reachable when facets are enabled in configuration.
    Facets,
}
