//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Three are compiled in; custom ones are loaded
//! from disk through [`Theme::from_file`]. Besides the chrome colors a theme may
//! carry the facet palette used to color highlighted options on cards and
//! pins. A theme without a palette falls back to the built-in one.
//!
//! # Built-in Themes
//!
//! - `storefinder`: light theme matching the locator brand colors (default)
//! - `catppuccin-latte`: light pastel theme
//! - `catppuccin-mocha`: dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#29335c"
//! text_normal = "#1f2933"
//! text_dim = "#7b8794"
//! border = "#d9dee3"
//! search_bar_border = "#027da5"
//! selection_fg = "#ffffff"
//! selection_bg = "#027da5"
//! chip_fg = "#ffffff"
//! chip_bg = "#29335c"
//! loader_fg = "#027da5"
//! empty_state_fg = "#027da5"
//! error_fg = "#c1292e"
//! facet_palette = ["#027da5", "#e4572e"]
//! ```
//!
//! # Example
//!
//! ```
//! use storefinder::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! let line = format!("{}Stores{}", Theme::fg(&theme.colors.header_fg), Theme::reset());
//! assert!(line.starts_with("\u{1b}[38;2;"));
//! ```

use crate::app::FacetColorMapper;
use crate::domain::{LocatorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "storefinder";

/// Color scheme for the locator UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Theme identifier, used for logging only.
    pub name: String,

    pub colors: ThemeColors,
}

/// Hex color values (`#rrggbb`) for each UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title and result count.
    pub header_fg: String,

    pub text_normal: String,

    /// Addresses, distances and hints.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,

    /// Selected card.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Applied filter chips.
    pub chip_fg: String,
    pub chip_bg: String,

    pub loader_fg: String,

    pub empty_state_fg: String,

    pub error_fg: String,

    /// Colors assigned to highlighted facet options.
    #[serde(default)]
    pub facet_palette: Vec<String>,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "storefinder" => include_str!("../../themes/storefinder.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a custom theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Theme`] when the file cannot be read or is not a
    /// valid theme document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| LocatorError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| LocatorError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Color mapper over this theme's facet palette.
    #[must_use]
    pub fn color_mapper(&self) -> FacetColorMapper {
        FacetColorMapper::with_palette(self.colors.facet_palette.iter().cloned())
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#29335c".to_string(),
                text_normal: "#1f2933".to_string(),
                text_dim: "#7b8794".to_string(),
                border: "#d9dee3".to_string(),
                search_bar_border: "#027da5".to_string(),
                selection_fg: "#ffffff".to_string(),
                selection_bg: "#027da5".to_string(),
                chip_fg: "#ffffff".to_string(),
                chip_bg: "#29335c".to_string(),
                loader_fg: "#027da5".to_string(),
                empty_state_fg: "#027da5".to_string(),
                error_fg: "#c1292e".to_string(),
                facet_palette: Vec::new(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::colors::DEFAULT_FACET_PALETTE;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["storefinder", "catppuccin-latte", "catppuccin-mocha"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn theme_without_palette_uses_default_colors() {
        let mapper = Theme::default().color_mapper();
        assert_eq!(mapper.palette().len(), DEFAULT_FACET_PALETTE.len());
    }

    #[test]
    fn theme_palette_drives_mapper() {
        let theme = Theme::from_name("catppuccin-mocha").unwrap();
        let mapper = theme.color_mapper();
        assert_eq!(mapper.palette()[0].as_hex(), "#f38ba8");
    }

    #[test]
    fn loads_custom_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let source = include_str!("../../themes/storefinder.toml").replace("storefinder", "custom");
        file.write_all(source.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(LocatorError::Theme(_))));
    }

    #[test]
    fn escapes_fall_back_to_white_on_bad_hex() {
        assert_eq!(Theme::fg("#zz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#027da5"), "\u{1b}[48;2;2;125;165m");
    }
}
