//! The single highlighted facet option shared by every view.
//!
//! [`HighlightState`] is the one authoritative cell. Card and pin renderers
//! never keep their own copy: they receive a [`HighlightSnapshot`] derived from
//! this cell, either pulled during view model computation or pushed through a
//! [`HighlightSubscriber`] broadcast after each change.

use super::colors::{Color, FacetColorMapper};
use serde::{Deserialize, Serialize};

/// At most one highlighted facet-option identity.
///
/// Writes are last-write-wins. Every write, including clearing, bumps the
/// revision so subscribers can detect missed updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    identity: Option<String>,
    revision: u64,
}

impl HighlightState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            identity: None,
            revision: 0,
        }
    }

    /// Overwrites the highlighted identity.
    pub fn set_highlighted(&mut self, identity: impl Into<String>) {
        let identity = identity.into();
        tracing::debug!(identity = %identity, previous = ?self.identity, "highlight set");
        self.identity = Some(identity);
        self.revision += 1;
    }

    /// Returns to the "nothing highlighted" state.
    pub fn clear_highlight(&mut self) {
        tracing::debug!(previous = ?self.identity, "highlight cleared");
        self.identity = None;
        self.revision += 1;
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Resolves the current identity to a color in one immutable value.
    #[must_use]
    pub fn snapshot(&self, mapper: &FacetColorMapper) -> HighlightSnapshot {
        HighlightSnapshot {
            identity: self.identity.clone(),
            color: self.identity.as_deref().map(|id| mapper.color_for(id)),
            revision: self.revision,
        }
    }
}

/// Immutable view of the highlight for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSnapshot {
    pub identity: Option<String>,
    pub color: Option<Color>,
    pub revision: u64,
}

/// Receives highlight broadcasts.
///
/// Implemented by the card and pin renderers. Both receive the same snapshot
/// value for a given revision.
pub trait HighlightSubscriber {
    fn on_highlight_changed(&mut self, snapshot: &HighlightSnapshot);
}
