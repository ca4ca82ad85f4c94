//! Side effects requested by the event handler.
//!
//! The handler mutates [`AppState`](super::AppState) and returns actions; the
//! runtime executes them in order. Keeping effects out of the handler makes
//! every state transition testable without a worker, history or renderer.

use super::highlight::HighlightSnapshot;
use crate::worker::SearchMessage;

/// Commands executed by the locator runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hands a message to the search worker. Its response arrives later as
    /// an [`Event::SearchResponse`](super::Event::SearchResponse).
    PostToWorker(SearchMessage),

    /// Pushes a navigation history entry with this query string.
    PushHistory {
        /// Serialized parameters including the leading `?`.
        search: String,
    },

    /// Notifies every highlight subscriber with the same snapshot.
    BroadcastHighlight(HighlightSnapshot),

    /// Tells the host which location the user picked from a card or a pin.
    LocationSelected {
        location_id: String,
    },
}
