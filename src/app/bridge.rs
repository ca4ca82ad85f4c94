//! Cross-view propagation of the highlight color.
//!
//! The bridge turns one [`HighlightSnapshot`] into per-location decorations for
//! the result cards and the map pins. Both lists are derived from the same
//! snapshot value inside a single call, so a partial re-render can never show
//! the list and the map in different colors.

use super::colors::Color;
use super::highlight::HighlightSnapshot;
use crate::domain::{GeoPoint, Location};
use serde::{Deserialize, Serialize};

/// What the card renderer needs for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDecoration {
    pub location_id: String,
    pub highlight_color: Option<Color>,
    pub is_selected: bool,
}

/// What the pin renderer needs for one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinDecoration {
    pub location_id: String,
    pub coordinate: GeoPoint,
    pub highlight_color: Option<Color>,
    pub is_selected: bool,
}

/// Decorations for both views from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossViewDecorations {
    pub snapshot: HighlightSnapshot,
    pub cards: Vec<CardDecoration>,
    pub pins: Vec<PinDecoration>,
}

/// Derives card and pin decorations from the shared highlight.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossViewHighlightBridge;

impl CrossViewHighlightBridge {
    /// Decorates every location for both views in one pass.
    #[must_use]
    pub fn decorate(
        snapshot: &HighlightSnapshot,
        locations: &[Location],
        selected_location_id: Option<&str>,
    ) -> CrossViewDecorations {
        let _span = tracing::trace_span!(
            "decorate",
            revision = snapshot.revision,
            locations = locations.len()
        )
        .entered();

        let is_selected = |location: &Location| selected_location_id == Some(location.id.as_str());

        let cards = locations
            .iter()
            .map(|location| CardDecoration {
                location_id: location.id.clone(),
                highlight_color: snapshot.color.clone(),
                is_selected: is_selected(location),
            })
            .collect();

        let pins = locations
            .iter()
            .map(|location| PinDecoration {
                location_id: location.id.clone(),
                coordinate: location.coordinate,
                highlight_color: snapshot.color.clone(),
                is_selected: is_selected(location),
            })
            .collect();

        CrossViewDecorations {
            snapshot: snapshot.clone(),
            cards,
            pins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::colors::FacetColorMapper;
    use crate::app::highlight::HighlightState;
    use std::collections::BTreeMap;

    fn location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Store {id}"),
            address: String::new(),
            coordinate: GeoPoint::new(45.0, 9.0),
            distance: None,
            fields: BTreeMap::new(),
        }
    }

    #[test]
    fn cards_and_pins_share_color_and_selection() {
        let mapper = FacetColorMapper::default();
        let mut highlight = HighlightState::new();
        highlight.set_highlighted("Wheelchair Accessible");
        let snapshot = highlight.snapshot(&mapper);

        let decorations =
            CrossViewHighlightBridge::decorate(&snapshot, &[location("a"), location("b")], Some("b"));

        let expected = Some(mapper.color_for("Wheelchair Accessible"));
        for (card, pin) in decorations.cards.iter().zip(&decorations.pins) {
            assert_eq!(card.location_id, pin.location_id);
            assert_eq!(card.highlight_color, expected);
            assert_eq!(pin.highlight_color, expected);
            assert_eq!(card.is_selected, pin.is_selected);
        }
        assert!(decorations.cards[1].is_selected);
        assert!(!decorations.pins[0].is_selected);
    }

    #[test]
    fn no_highlight_means_no_color() {
        let snapshot = HighlightState::new().snapshot(&FacetColorMapper::default());
        let decorations = CrossViewHighlightBridge::decorate(&snapshot, &[location("a")], None);
        assert_eq!(decorations.cards[0].highlight_color, None);
        assert_eq!(decorations.pins[0].highlight_color, None);
    }
}
