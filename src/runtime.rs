//! Host-side runtime wiring the coordinator to its collaborators.
//!
//! [`Locator`] owns the application state, the search worker, the navigation
//! state and the highlight subscribers. It feeds events through
//! [`handle_event`] and executes the resulting actions. Worker responses are
//! queued in arrival order instead of being applied immediately, so a host
//! (or a test) decides when, and in which order, each completion lands.

use crate::app::{handle_event, Action, AppState, Event, HighlightSubscriber, QueryParams};
use crate::domain::Result;
use crate::infrastructure::NavigationState;
use crate::worker::{SearchResponse, SearchWorker};
use std::collections::VecDeque;

/// A mounted store locator.
pub struct Locator {
    state: AppState,
    worker: SearchWorker,
    navigation: Box<dyn NavigationState>,
    subscribers: Vec<Box<dyn HighlightSubscriber>>,
    /// Responses not yet delivered, oldest first.
    inbox: VecDeque<SearchResponse>,
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("state", &self.state)
            .field("worker", &self.worker)
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.inbox.len())
            .finish_non_exhaustive()
    }
}

impl Locator {
    #[must_use]
    pub fn new(state: AppState, worker: SearchWorker, navigation: Box<dyn NavigationState>) -> Self {
        Self {
            state,
            worker,
            navigation,
            subscribers: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    /// Registers a renderer for highlight broadcasts.
    pub fn add_subscriber(&mut self, subscriber: Box<dyn HighlightSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Mounts the locator against the current navigation state.
    ///
    /// # Errors
    ///
    /// Propagates errors from event handling.
    pub fn mount(&mut self) -> Result<bool> {
        let search = self.navigation.location_search();
        self.dispatch(&Event::Mount { search })
    }

    /// Submits the search bar with the current navigation parameters.
    ///
    /// # Errors
    ///
    /// Propagates errors from event handling.
    pub fn submit_search(&mut self, query: &str) -> Result<bool> {
        let params = QueryParams::parse(&self.navigation.location_search());
        self.dispatch(&Event::SubmitSearch {
            query: query.to_string(),
            params,
        })
    }

    /// Handles one event and executes its actions.
    ///
    /// Returns whether the view should re-render.
    ///
    /// # Errors
    ///
    /// Returns the event handler's error; no action runs in that case.
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (should_render, actions) = handle_event(&mut self.state, event)?;
        tracing::debug!(action_count = actions.len(), should_render, "event dispatched");
        for action in actions {
            self.execute_action(action);
        }
        Ok(should_render)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                let response = self.worker.handle_message(message);
                tracing::debug!(pending = self.inbox.len() + 1, "worker response queued");
                self.inbox.push_back(response);
            }
            Action::PushHistory { search } => {
                self.navigation.push_state(&search);
            }
            Action::BroadcastHighlight(snapshot) => {
                tracing::debug!(
                    subscribers = self.subscribers.len(),
                    revision = snapshot.revision,
                    "broadcasting highlight"
                );
                for subscriber in &mut self.subscribers {
                    subscriber.on_highlight_changed(&snapshot);
                }
            }
            Action::LocationSelected { location_id } => {
                tracing::debug!(location_id = %location_id, "location selected");
            }
        }
    }

    /// Delivers the oldest queued response.
    ///
    /// Returns `Ok(None)` when nothing is queued, otherwise whether the view
    /// should re-render.
    ///
    /// # Errors
    ///
    /// Propagates errors from event handling.
    pub fn deliver_next(&mut self) -> Result<Option<bool>> {
        match self.inbox.pop_front() {
            Some(response) => self.deliver(response).map(Some),
            None => Ok(None),
        }
    }

    /// Delivers queued responses until the queue is empty, including
    /// responses queued by the deliveries themselves.
    ///
    /// # Errors
    ///
    /// Stops at the first error from event handling.
    pub fn deliver_all(&mut self) -> Result<bool> {
        let mut should_render = false;
        while let Some(rendered) = self.deliver_next()? {
            should_render |= rendered;
        }
        Ok(should_render)
    }

    /// Removes every queued response without delivering it.
    ///
    /// Pair with [`Locator::deliver`] to apply completions out of order.
    pub fn take_pending(&mut self) -> Vec<SearchResponse> {
        self.inbox.drain(..).collect()
    }

    /// Delivers one response as if it had just arrived.
    ///
    /// # Errors
    ///
    /// Propagates errors from event handling.
    pub fn deliver(&mut self, response: SearchResponse) -> Result<bool> {
        self.dispatch(&Event::SearchResponse(response))
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Renders the current frame.
    #[must_use]
    pub fn render_to_string(&self, rows: usize, cols: usize) -> String {
        crate::ui::render_to_string(&self.state, rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HighlightSnapshot;
    use crate::backend::{FacetField, LocationRecord, MemoryBackend};
    use crate::infrastructure::MemoryNavigation;
    use crate::ui::Theme;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<HighlightSnapshot>>>);

    impl HighlightSubscriber for Recorder {
        fn on_highlight_changed(&mut self, snapshot: &HighlightSnapshot) {
            self.0.borrow_mut().push(snapshot.clone());
        }
    }

    fn locator(search: &str) -> Locator {
        let backend = MemoryBackend::new(
            vec![
                LocationRecord::new("a", "Coffee Brera", 45.472, 9.187)
                    .with_field("c_features", serde_json::json!(["Parking"])),
                LocationRecord::new("b", "Tea Navigli", 45.452, 9.176),
            ],
            vec![FacetField {
                field_id: "c_features".to_string(),
                display_name: "Features".to_string(),
            }],
        );
        Locator::new(
            AppState::new("locations", Theme::default()),
            SearchWorker::with_backend(Box::new(backend)),
            Box::new(MemoryNavigation::new(search)),
        )
    }

    #[test]
    fn responses_wait_in_the_inbox() {
        let mut locator = locator("?query=coffee");
        locator.mount().unwrap();

        assert_eq!(locator.pending(), 1);
        assert!(locator.state().loading().is_blocking());

        assert_eq!(locator.deliver_next().unwrap(), Some(true));
        assert_eq!(locator.state().result_count, 1);
        assert_eq!(locator.deliver_next().unwrap(), None);
    }

    #[test]
    fn submit_replaces_query() {
        let mut locator = locator("?type=store");
        locator.submit_search("tea").unwrap();
        locator.deliver_all().unwrap();

        assert_eq!(locator.state().query.as_deref(), Some("tea"));
        assert_eq!(locator.state().result_count, 1);
    }

    #[test]
    fn broadcast_reaches_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut locator = locator("");
        locator.add_subscriber(Box::new(Recorder(Rc::clone(&seen))));
        locator.add_subscriber(Box::new(Recorder(Rc::clone(&seen))));
        locator.mount().unwrap();
        locator.deliver_all().unwrap();

        locator
            .dispatch(&Event::ToggleFacetOption {
                field_id: "c_features".to_string(),
                value: "Parking".to_string(),
            })
            .unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert!(seen[0].color.is_some());
    }
}
