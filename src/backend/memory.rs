//! In-memory location index backed by a JSON file.
//!
//! The whole index is loaded on creation and queried in memory. Writes go
//! through a temporary file and a rename so a crash never leaves a truncated
//! index behind.
//!
//! # Query pipeline
//!
//! 1. Fuzzy-match every query token against name, address and city
//! 2. Apply selected static filters (`$near` by great-circle distance,
//!    comparisons on entity fields)
//! 3. Count facet options over the remaining set
//! 4. Apply selected facet options (OR within a facet, AND across facets)
//! 5. Sort by distance when a location filter is active, else by match score
//! 6. Paginate with `offset` and `limit`
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "facet_fields": [
//!     { "field_id": "c_services", "display_name": "Services" }
//!   ],
//!   "locations": [
//!     {
//!       "id": "duomo",
//!       "name": "Duomo Store",
//!       "address": "Piazza del Duomo 1",
//!       "city": "Milano",
//!       "latitude": 45.4642,
//!       "longitude": 9.19,
//!       "fields": { "c_services": ["Parking", "Wheelchair Accessible"] }
//!     }
//!   ]
//! }
//! ```

use super::backend::SearchBackend;
use super::models::{FacetField, IndexData, LocationRecord};
use crate::domain::{
    Facet, FacetOption, FilterValue, GeoPoint, LocatorError, Matcher, Result, SearchRequest,
    SearchResults, StaticFilter,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A record that passed matching, with its score and distance.
struct Candidate<'a> {
    record: &'a LocationRecord,
    score: i64,
    distance: Option<f64>,
}

/// In-memory search index.
pub struct MemoryBackend {
    data: IndexData,
    file_path: Option<PathBuf>,
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("locations", &self.data.locations.len())
            .field("facet_fields", &self.data.facet_fields)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl MemoryBackend {
    /// Creates an index from records, not bound to any file.
    #[must_use]
    pub fn new(locations: Vec<LocationRecord>, facet_fields: Vec<FacetField>) -> Self {
        Self {
            data: IndexData {
                facet_fields,
                locations,
                ..IndexData::default()
            },
            file_path: None,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Opens the index at `file_path`, creating an empty one when missing.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or the file
    /// exists but is not a valid index.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use storefinder::backend::{MemoryBackend, SearchBackend};
    /// use std::path::PathBuf;
    ///
    /// let backend = MemoryBackend::open(PathBuf::from("/tmp/locations.json"))?;
    /// println!("{} locations", backend.location_count());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening location index");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no index file, starting empty");
            IndexData::default()
        };

        tracing::debug!(
            locations = data.locations.len(),
            facet_fields = data.facet_fields.len(),
            "location index opened"
        );

        Ok(Self {
            data,
            file_path: Some(file_path),
            matcher: SkimMatcherV2::default(),
        })
    }

    fn load_from_file(path: &Path) -> Result<IndexData> {
        let contents = std::fs::read_to_string(path)?;
        let data: IndexData = serde_json::from_str(&contents)
            .map_err(|e| LocatorError::Search(format!("failed to parse index: {e}")))?;

        tracing::debug!(version = data.version, locations = data.locations.len(), "loaded index");
        Ok(data)
    }

    /// Writes the index back to its file with an atomic rename.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend has no file or the write fails.
    pub fn save(&self) -> Result<()> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| LocatorError::Search("index is not bound to a file".to_string()))?;

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing index to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!(path = ?path, "index saved");
        Ok(())
    }

    /// Inserts or replaces locations by id.
    pub fn upsert(&mut self, records: Vec<LocationRecord>) {
        for record in records {
            if let Some(existing) = self.data.locations.iter_mut().find(|r| r.id == record.id) {
                *existing = record;
            } else {
                self.data.locations.push(record);
            }
        }
    }

    fn text_score(&self, record: &LocationRecord, tokens: &[String]) -> Option<i64> {
        if tokens.is_empty() {
            return Some(0);
        }

        let haystacks = [
            record.name.to_lowercase(),
            record.address.to_lowercase(),
            record.city.to_lowercase(),
        ];

        tokens.iter().try_fold(0, |total, token| {
            haystacks
                .iter()
                .filter_map(|haystack| self.matcher.fuzzy_match(haystack, token))
                .max()
                .map(|best| total + best)
        })
    }

    fn facet_options_match(record: &LocationRecord, selections: &BTreeMap<&str, BTreeSet<&str>>) -> bool {
        selections.iter().all(|(field_id, wanted)| {
            record
                .field_values(field_id)
                .iter()
                .any(|value| wanted.contains(value.as_str()))
        })
    }

    /// Builds facets with option counts over `candidates`, carrying the
    /// request's selection flags.
    fn compute_facets(&self, candidates: &[Candidate<'_>], request: &SearchRequest) -> Vec<Facet> {
        self.data
            .facet_fields
            .iter()
            .map(|field| {
                let mut counts: BTreeMap<String, usize> = BTreeMap::new();
                for candidate in candidates {
                    for value in candidate.record.field_values(&field.field_id) {
                        *counts.entry(value).or_default() += 1;
                    }
                }

                let previous = request.facets.iter().find(|f| f.field_id == field.field_id);
                let mut options: Vec<FacetOption> = counts
                    .into_iter()
                    .map(|(value, count)| {
                        let prior = previous.and_then(|f| f.options.iter().find(|o| o.value == value));
                        FacetOption {
                            display_name: prior.and_then(|o| o.display_name.clone()),
                            selected: prior.is_some_and(|o| o.selected),
                            value,
                            count,
                        }
                    })
                    .collect();
                options.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

                Facet {
                    field_id: field.field_id.clone(),
                    display_name: field.display_name.clone(),
                    options,
                }
            })
            .collect()
    }
}

/// Evaluates a non-location static filter against a record field.
fn field_filter_matches(record: &LocationRecord, filter: &StaticFilter) -> bool {
    let Some(field) = record.fields.get(&filter.field_id) else {
        return filter.matcher == Matcher::NotEquals;
    };

    let equals = match (&filter.value, field) {
        (FilterValue::Text(expected), serde_json::Value::Array(items)) => {
            items.iter().any(|item| item.as_str() == Some(expected.as_str()))
        }
        (FilterValue::Text(expected), value) => value.as_str() == Some(expected.as_str()),
        (FilterValue::Bool(expected), value) => value.as_bool() == Some(*expected),
        (FilterValue::Number(expected), value) => value.as_f64() == Some(*expected),
        (FilterValue::Near(_), _) => false,
    };

    let ordering = match (&filter.value, field.as_f64()) {
        (FilterValue::Number(expected), Some(actual)) => actual.partial_cmp(expected),
        _ => None,
    };

    match filter.matcher {
        Matcher::Equals => equals,
        Matcher::NotEquals => !equals,
        Matcher::LessThan => ordering == Some(Ordering::Less),
        Matcher::LessThanOrEqualTo => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Matcher::GreaterThan => ordering == Some(Ordering::Greater),
        Matcher::GreaterThanOrEqualTo => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        // Range values are not representable in a single filter value.
        Matcher::Between | Matcher::Near => true,
    }
}

impl SearchBackend for MemoryBackend {
    fn execute_vertical_query(&self, request: &SearchRequest) -> Result<SearchResults> {
        let _span = tracing::debug_span!(
            "memory_execute_vertical_query",
            sequence = request.sequence,
            vertical = %request.vertical,
            query = ?request.query,
            filters = request.static_filters.len()
        )
        .entered();

        let tokens: Vec<String> = request
            .query
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let active_filters: Vec<&StaticFilter> =
            request.static_filters.iter().filter(|f| f.selected).collect();
        let near = active_filters
            .iter()
            .filter(|f| f.matcher == Matcher::Near)
            .find_map(|f| f.value.as_near());

        let candidates: Vec<Candidate<'_>> = self
            .data
            .locations
            .iter()
            .filter_map(|record| {
                let score = self.text_score(record, &tokens)?;

                let distance =
                    near.map(|n| record.coordinate().distance_to(&GeoPoint::new(n.lat, n.lng)));
                if let (Some(n), Some(d)) = (near, distance) {
                    if d > n.radius {
                        return None;
                    }
                }

                active_filters
                    .iter()
                    .filter(|f| f.matcher != Matcher::Near)
                    .all(|f| field_filter_matches(record, f))
                    .then_some(Candidate { record, score, distance })
            })
            .collect();

        let facets = self.compute_facets(&candidates, request);

        let mut selections: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for (field_id, value) in request.selected_facet_options() {
            selections.entry(field_id).or_default().insert(value);
        }

        let mut matched: Vec<Candidate<'_>> = candidates
            .into_iter()
            .filter(|c| Self::facet_options_match(c.record, &selections))
            .collect();

        if near.is_some() {
            matched.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.record.name.cmp(&b.record.name))
            });
        } else {
            matched.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.record.name.cmp(&b.record.name)));
        }

        let result_count = matched.len();
        let locations = matched
            .iter()
            .skip(request.offset)
            .take(request.limit)
            .map(|c| c.record.to_location(c.distance))
            .collect();

        tracing::debug!(result_count, "vertical query answered");

        Ok(SearchResults {
            locations,
            facets,
            result_count,
        })
    }

    fn location_count(&self) -> usize {
        self.data.locations.len()
    }
}
