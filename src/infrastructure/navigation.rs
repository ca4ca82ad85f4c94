//! Navigation state (the location's query string and history).
//!
//! The coordinator reads the current query string on mount and pushes a new
//! one after each submitted search. Hosts implement [`NavigationState`] over
//! their own history mechanism; [`MemoryNavigation`] keeps it in memory.

/// Access to the current location's query string and its history.
pub trait NavigationState {
    /// Current search string, including the leading `?` when non-empty.
    fn location_search(&self) -> String;

    /// Pushes a new history entry with `search` as its query string.
    fn push_state(&mut self, search: &str);
}

/// In-memory navigation with a recorded history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryNavigation {
    history: Vec<String>,
}

impl MemoryNavigation {
    /// Starts at `search` as the only history entry.
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            history: vec![search.into()],
        }
    }

    /// Every entry, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl NavigationState for MemoryNavigation {
    fn location_search(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn push_state(&mut self, search: &str) {
        tracing::debug!(search = %search, depth = self.history.len() + 1, "history push");
        self.history.push(search.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_updates_current_search() {
        let mut nav = MemoryNavigation::new("?query=coffee");
        assert_eq!(nav.location_search(), "?query=coffee");

        nav.push_state("?query=tea");
        assert_eq!(nav.location_search(), "?query=tea");
        assert_eq!(nav.history().len(), 2);
    }

    #[test]
    fn default_has_empty_search() {
        assert_eq!(MemoryNavigation::default().location_search(), "");
    }
}
