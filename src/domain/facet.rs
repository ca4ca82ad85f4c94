//! Facet model returned alongside search results.
//!
//! Facets are owned by the search service; the coordinator reads them and only
//! flips the `selected` flag of individual options before the next query.

use serde::{Deserialize, Serialize};

/// A selectable value of a facet field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub count: usize,
}

impl FacetOption {
    /// Identity used for color mapping and highlighting: `display_name ?? value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::domain::FacetOption;
    ///
    /// let option = FacetOption {
    ///     value: "wheelchair".to_string(),
    ///     display_name: Some("Wheelchair Accessible".to_string()),
    ///     selected: false,
    ///     count: 3,
    /// };
    /// assert_eq!(option.identity(), "Wheelchair Accessible");
    /// ```
    #[must_use]
    pub fn identity(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.value)
    }
}

/// A field exposing selectable options derived from the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub field_id: String,
    pub display_name: String,
    #[serde(default)]
    pub options: Vec<FacetOption>,
}

impl Facet {
    /// Icon asset path shown on the facet tile.
    ///
    /// Lowercases the display name and replaces each whitespace character
    /// with a dash: `"Drive Thru"` becomes `/icons/drive-thru.svg`.
    #[must_use]
    pub fn icon_path(&self) -> String {
        let slug: String = self
            .display_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        format!("/icons/{slug}.svg")
    }

    /// Whether any option of this facet is currently selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.options.iter().any(|o| o.selected)
    }
}
