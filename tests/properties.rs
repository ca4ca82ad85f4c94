//! Property tests for the coordinator's pure building blocks.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use storefinder::app::{Completion, Event, FacetColorMapper, FilterSet, RadiusFilterDeriver, SearchExecutor};
use storefinder::backend::{FacetField, LocationRecord, MemoryBackend};
use storefinder::domain::{FilterValue, GeoBounds, GeoPoint, Matcher, StaticFilter, ViewportDrag};
use storefinder::infrastructure::MemoryNavigation;
use storefinder::worker::{SearchResponse, SearchWorker};
use storefinder::{AppState, Locator, Theme};

#[derive(Debug, Clone)]
enum FilterOp {
    Field(String),
    Drag(ViewportDrag),
}

fn point() -> impl Strategy<Value = GeoPoint> {
    (-85.0..85.0f64, -180.0..180.0f64).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

fn drag() -> impl Strategy<Value = ViewportDrag> {
    (point(), point(), point()).prop_map(|(center, south_west, north_east)| ViewportDrag {
        center,
        bounds: GeoBounds::new(south_west, north_east),
    })
}

fn filter_op() -> impl Strategy<Value = FilterOp> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(FilterOp::Field),
        drag().prop_map(FilterOp::Drag),
    ]
}

fn field_filter(field_id: &str) -> StaticFilter {
    StaticFilter {
        field_id: field_id.to_string(),
        matcher: Matcher::Equals,
        value: FilterValue::Bool(true),
        selected: true,
        display_name: field_id.to_string(),
    }
}

/// A user event or the arrival of one in-flight response.
#[derive(Debug, Clone)]
enum Step {
    Toggle { field_id: &'static str, value: &'static str },
    Drag(ViewportDrag),
    Deliver(usize),
    DeliverAsFailure(usize),
}

const OPTIONS: [(&str, &str); 4] = [
    ("c_features", "Drive Thru"),
    ("c_features", "Wheelchair Accessible"),
    ("c_services", "Wifi"),
    ("c_services", "Delivery"),
];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => prop::sample::select(OPTIONS.to_vec())
            .prop_map(|(field_id, value)| Step::Toggle { field_id, value }),
        1 => prop::bool::ANY.prop_map(|near_milan| {
            let center = if near_milan {
                GeoPoint::new(45.4642, 9.1900)
            } else {
                GeoPoint::new(45.0703, 7.6869)
            };
            Step::Drag(ViewportDrag {
                center,
                bounds: GeoBounds::new(
                    GeoPoint::new(center.lat - 0.1, center.lng - 0.1),
                    GeoPoint::new(center.lat + 0.1, center.lng + 0.1),
                ),
            })
        }),
        3 => any::<usize>().prop_map(Step::Deliver),
        1 => any::<usize>().prop_map(Step::DeliverAsFailure),
    ]
}

fn locator() -> Locator {
    let backend = MemoryBackend::new(
        vec![
            LocationRecord::new("duomo", "Coffee Duomo", 45.4642, 9.1900)
                .with_field("c_features", serde_json::json!(["Drive Thru", "Wheelchair Accessible"]))
                .with_field("c_services", serde_json::json!(["Wifi"])),
            LocationRecord::new("brera", "Coffee Brera", 45.4720, 9.1870)
                .with_field("c_features", serde_json::json!(["Wheelchair Accessible"]))
                .with_field("c_services", serde_json::json!(["Delivery", "Wifi"])),
            LocationRecord::new("torino", "Tea Torino", 45.0703, 7.6869)
                .with_field("c_features", serde_json::json!(["Drive Thru"]))
                .with_field("c_services", serde_json::json!(["Delivery"])),
        ],
        vec![
            FacetField {
                field_id: "c_features".to_string(),
                display_name: "Features".to_string(),
            },
            FacetField {
                field_id: "c_services".to_string(),
                display_name: "Services".to_string(),
            },
        ],
    );
    Locator::new(
        AppState::new("locations", Theme::default()).with_facets_enabled(true),
        SearchWorker::with_backend(Box::new(backend)),
        Box::new(MemoryNavigation::new("")),
    )
}

fn sequence_of(response: &SearchResponse) -> u64 {
    match response {
        SearchResponse::QueryCompleted { sequence, .. } | SearchResponse::QueryFailed { sequence, .. } => *sequence,
        other => panic!("expected a query outcome, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn at_most_one_location_filter_and_order_kept(ops in prop::collection::vec(filter_op(), 0..24)) {
        let mut fields = Vec::new();
        let mut set = FilterSet::new();
        let mut last_drag = None;

        for op in &ops {
            match op {
                FilterOp::Field(field_id) => {
                    fields.push(field_id.clone());
                    let mut filters = set.current().to_vec();
                    filters.push(field_filter(field_id));
                    set = FilterSet::from_filters(filters);
                }
                FilterOp::Drag(drag) => {
                    last_drag = Some(*drag);
                    set.replace_location_filter(RadiusFilterDeriver::derive(drag));
                }
            }
        }

        let locations: Vec<_> = set.current().iter().filter(|f| f.is_location()).collect();
        prop_assert!(locations.len() <= 1);
        prop_assert_eq!(locations.len(), usize::from(last_drag.is_some()));
        if let (Some(filter), Some(drag)) = (locations.first(), last_drag) {
            let near = filter.value.as_near().unwrap();
            prop_assert_eq!(near.lat, drag.center.lat);
            prop_assert_eq!(near.lng, drag.center.lng);
        }

        let others: Vec<String> = set
            .current()
            .iter()
            .filter(|f| !f.is_location())
            .map(|f| f.field_id.clone())
            .collect();
        prop_assert_eq!(others, fields);
    }

    #[test]
    fn color_depends_only_on_utf16_length(identity in "\\PC{0,40}", palette_len in 1usize..10) {
        let palette: Vec<String> = (0..palette_len).map(|i| format!("#{i:06x}")).collect();
        let mapper = FacetColorMapper::with_palette(palette.clone());

        let color = mapper.color_for(&identity);
        prop_assert_eq!(&color, &mapper.color_for(&identity));
        prop_assert_eq!(color.as_hex(), palette[identity.encode_utf16().count() % palette_len].as_str());

        let same_length = "x".repeat(identity.encode_utf16().count());
        prop_assert_eq!(color, mapper.color_for(&same_length));
    }

    #[test]
    fn radius_is_finite_and_non_negative(drag in drag()) {
        let radius = RadiusFilterDeriver::radius_for(&drag);
        prop_assert!(radius.is_finite());
        prop_assert!(radius >= 0.0);
        prop_assert!(radius <= std::f64::consts::PI * storefinder::domain::geo::EARTH_RADIUS_METERS + 1.0);
    }

    #[test]
    fn applied_sequences_never_go_backwards(order in Just((1u64..=8).collect::<Vec<_>>()).prop_shuffle()) {
        let mut executor = SearchExecutor::default();
        for _ in 0..order.len() {
            executor.issue("locations", None, &[], &[]);
        }

        let mut newest_applied = 0;
        for sequence in order {
            match executor.complete(sequence) {
                Completion::Apply => {
                    prop_assert!(sequence > newest_applied);
                    newest_applied = sequence;
                }
                Completion::Stale => prop_assert!(sequence < newest_applied),
            }
        }
        prop_assert_eq!(executor.last_applied(), Some(newest_applied));
        prop_assert_eq!(executor.in_flight(), 0);
    }

    #[test]
    fn final_selections_follow_user_toggles_in_any_delivery_order(steps in prop::collection::vec(step(), 1..32)) {
        let mut locator = locator();
        locator.mount().unwrap();
        locator.deliver_all().unwrap();

        let mut expected: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut in_flight: Vec<SearchResponse> = Vec::new();
        let mut newest_sequence = 1;

        for step in steps {
            match step {
                Step::Toggle { field_id, value } => {
                    let toggled = locator
                        .dispatch(&Event::ToggleFacetOption {
                            field_id: field_id.to_string(),
                            value: value.to_string(),
                        })
                        .unwrap();
                    if toggled {
                        let values = expected.entry(field_id.to_string()).or_default();
                        if !values.remove(value) {
                            values.insert(value.to_string());
                        }
                        if values.is_empty() {
                            expected.remove(field_id);
                        }
                    }
                }
                Step::Drag(drag) => {
                    locator.dispatch(&Event::MapDragEnd(drag)).unwrap();
                }
                Step::Deliver(_) | Step::DeliverAsFailure(_) if in_flight.is_empty() => {}
                Step::Deliver(index) => {
                    let response = in_flight.remove(index % in_flight.len());
                    locator.deliver(response).unwrap();
                }
                Step::DeliverAsFailure(index) => {
                    let response = in_flight.remove(index % in_flight.len());
                    locator
                        .deliver(SearchResponse::QueryFailed {
                            sequence: sequence_of(&response),
                            message: "timeout".to_string(),
                        })
                        .unwrap();
                }
            }

            for response in locator.take_pending() {
                newest_sequence = newest_sequence.max(sequence_of(&response));
                in_flight.push(response);
            }
            prop_assert_eq!(&locator.state().facet_selections, &expected);
        }

        for response in in_flight {
            locator.deliver(response).unwrap();
        }

        let state = locator.state();
        prop_assert_eq!(&state.facet_selections, &expected);
        for facet in &state.facets {
            for option in &facet.options {
                let wanted = expected.get(&facet.field_id).is_some_and(|v| v.contains(&option.value));
                prop_assert_eq!(option.selected, wanted);
            }
        }
        prop_assert_eq!(state.executor.last_applied(), Some(newest_sequence));
        prop_assert_eq!(state.executor.in_flight(), 0);
    }
}
