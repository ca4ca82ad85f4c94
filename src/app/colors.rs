//! Deterministic facet-option colors.
//!
//! Colors are picked from a fixed palette by the identity's length (counted in
//! UTF-16 code units, like a browser string) modulo the palette size. The
//! mapping is pure: equal identities always yield equal colors. It is not
//! injective, so options of equal length share a color.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Palette used when the theme does not provide one.
pub const DEFAULT_FACET_PALETTE: [&str; 8] = [
    "#027da5", "#e4572e", "#29335c", "#f3a712", "#669bbc", "#a8c686", "#c1292e", "#8e6c8a",
];

/// A hex color string such as `#027da5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps facet-option identities to palette colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetColorMapper {
    palette: Vec<Color>,
}

impl Default for FacetColorMapper {
    fn default() -> Self {
        Self {
            palette: DEFAULT_FACET_PALETTE.iter().map(|hex| Color::new(*hex)).collect(),
        }
    }
}

impl FacetColorMapper {
    /// Creates a mapper over `palette`, falling back to the default palette
    /// when it is empty.
    #[must_use]
    pub fn with_palette<I, S>(palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let palette: Vec<Color> = palette.into_iter().map(Color::new).collect();
        if palette.is_empty() {
            tracing::debug!("empty facet palette, using default");
            return Self::default();
        }
        Self { palette }
    }

    /// Color for an option identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefinder::app::FacetColorMapper;
    ///
    /// let mapper = FacetColorMapper::with_palette(["#111111", "#222222", "#333333"]);
    /// assert_eq!(mapper.color_for("abcd").as_hex(), "#222222");
    /// assert_eq!(mapper.color_for("abcd"), mapper.color_for("wxyz"));
    /// ```
    #[must_use]
    pub fn color_for(&self, identity: &str) -> Color {
        let index = identity.encode_utf16().count() % self.palette.len();
        self.palette[index].clone()
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}
