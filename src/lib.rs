//! Storefinder: a headless geo-search state coordinator for store locators.
//!
//! Storefinder keeps a searchable, filterable list of locations synchronized
//! with an interactive map and a facet panel:
//! - The free-text query follows the `query` parameter of the page's
//!   navigation state, in both directions
//! - Map drags and device geolocation become a single radius filter
//! - Toggling a facet highlights it in one color, shared by cards and pins
//! - Overlapping queries are ordered by sequence number, stale ones dropped
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Host entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, query sync, filters              │
//! │  - Sequenced search execution                       │
//! │  - Highlight colors and cross-view bridge           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Backend Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (backend/)    │   │ (worker/)     │
//! │ - View models │   │ - JSON index  │   │ - Messages    │
//! │ - Theming     │   │ - Fuzzy match │   │ - Trace ctx   │
//! │ - Components  │   │ - Facets      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Geo types, filters, facets, errors (domain/)     │
//! │  - Paths, navigation state (infrastructure/)        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config`] is read from a string map or from the `YEXT_PUBLIC_*`
//! environment variables the hosted locator page is deployed with:
//!
//! ```text
//! YEXT_PUBLIC_API_KEY=...              search_api_key
//! YEXT_PUBLIC_EXP_KEY=locator          experience_key
//! YEXT_PUBLIC_ACCOUNTTYPE=SANDBOX      account_type → environment
//! YEXT_PUBLIC_MAP_API_KEY=...          map_api_key
//! YEXT_PUBLIC_ARE_FACETS_ENABLED=true  facets_enabled
//! ```
//!
//! # Example
//!
//! ```rust
//! use storefinder::{initialize, Config, Locator};
//! use storefinder::backend::{LocationRecord, MemoryBackend};
//! use storefinder::infrastructure::MemoryNavigation;
//! use storefinder::worker::SearchWorker;
//!
//! let backend = MemoryBackend::new(
//!     vec![LocationRecord::new("duomo", "Coffee Duomo", 45.4642, 9.1900)],
//!     vec![],
//! );
//! let mut locator = Locator::new(
//!     initialize(&Config::default()),
//!     SearchWorker::with_backend(Box::new(backend)),
//!     Box::new(MemoryNavigation::new("?query=coffee")),
//! );
//!
//! locator.mount()?;
//! locator.deliver_all()?;
//! assert_eq!(locator.state().result_count, 1);
//! # Ok::<(), storefinder::LocatorError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod backend;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, LoadingState, PanelMode};
pub use domain::{LocatorError, Result};
pub use runtime::Locator;
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Vertical queried when none is configured.
pub const DEFAULT_VERTICAL: &str = "locations";

/// Locale of the search experience when none is configured.
pub const DEFAULT_LOCALE: &str = "it";

/// Environment variables mapped onto configuration keys.
const ENV_KEYS: &[(&str, &str)] = &[
    ("YEXT_PUBLIC_API_KEY", "search_api_key"),
    ("YEXT_PUBLIC_EXP_KEY", "experience_key"),
    ("YEXT_PUBLIC_ACCOUNTTYPE", "account_type"),
    ("YEXT_PUBLIC_MAP_API_KEY", "map_api_key"),
    ("YEXT_PUBLIC_ARE_FACETS_ENABLED", "facets_enabled"),
    ("YEXT_PUBLIC_VERTICAL_KEY", "vertical_key"),
    ("YEXT_PUBLIC_LOCALE", "locale"),
    ("STOREFINDER_PAGE_SIZE", "page_size"),
    ("STOREFINDER_THEME", "theme"),
    ("STOREFINDER_THEME_FILE", "theme_file"),
    ("STOREFINDER_TRACE_LEVEL", "trace_level"),
];

/// Search service environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Prod,
    Sandbox,
}

impl Environment {
    /// Derives the environment from the account type.
    ///
    /// Sandbox accounts are served from production and every other account
    /// type from the sandbox, matching how the hosted page is deployed.
    #[must_use]
    pub fn from_account_type(account_type: Option<&str>) -> Self {
        if account_type == Some("SANDBOX") {
            Self::Prod
        } else {
            Self::Sandbox
        }
    }
}

/// Locator configuration.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use storefinder::{Config, Environment};
///
/// let mut map = BTreeMap::new();
/// map.insert("vertical_key".to_string(), "stores".to_string());
/// map.insert("facets_enabled".to_string(), "true".to_string());
/// map.insert("account_type".to_string(), "SANDBOX".to_string());
/// map.insert("page_size".to_string(), "ten".to_string());
///
/// let config = Config::from_map(&map);
/// assert_eq!(config.vertical_key, "stores");
/// assert!(config.facets_enabled);
/// assert_eq!(config.environment, Environment::Prod);
/// assert_eq!(config.page_size, 20);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Vertical every query targets. Default: `"locations"`
    pub vertical_key: String,

    /// Whether the facet panel is offered. Only the literal `"true"` enables it.
    pub facets_enabled: bool,

    /// Access token for the map tiles.
    pub map_api_key: Option<String>,

    /// Search service API key.
    pub search_api_key: Option<String>,

    /// Search experience key.
    pub experience_key: Option<String>,

    /// Default: `"it"`
    pub locale: String,

    pub environment: Environment,

    /// Results per page. Default: 20
    pub page_size: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, `~` expanded.
    pub theme_file: Option<PathBuf>,

    /// Filter directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vertical_key: DEFAULT_VERTICAL.to_string(),
            facets_enabled: false,
            map_api_key: None,
            search_api_key: None,
            experience_key: None,
            locale: DEFAULT_LOCALE.to_string(),
            environment: Environment::from_account_type(None),
            page_size: app::DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a key/value map.
    ///
    /// Missing keys and unparsable numbers fall back to their defaults.
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(app::DEFAULT_PAGE_SIZE);

        Self {
            vertical_key: non_empty("vertical_key").unwrap_or_else(|| DEFAULT_VERTICAL.to_string()),
            facets_enabled: config.get("facets_enabled").is_some_and(|v| v.trim() == "true"),
            map_api_key: non_empty("map_api_key"),
            search_api_key: non_empty("search_api_key"),
            experience_key: non_empty("experience_key"),
            locale: non_empty("locale").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            environment: Environment::from_account_type(config.get("account_type").map(|s| s.trim())),
            page_size,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Parses configuration from environment-style variables.
    ///
    /// Unknown variables are ignored.
    #[must_use]
    pub fn from_env_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let map: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                ENV_KEYS
                    .iter()
                    .find(|(env, _)| *env == name.as_ref())
                    .map(|(_, key)| ((*key).to_string(), value.into()))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(std::env::vars())
    }
}

/// Builds the initial application state from configuration.
///
/// The theme comes from `theme_file` when set, then `theme_name`, then the
/// default. A theme that fails to load is logged and replaced by the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(vertical = %config.vertical_key, locale = %config.locale, environment = ?config.environment, "initializing locator");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file.display(), error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.vertical_key.clone(), theme)
        .with_facets_enabled(config.facets_enabled)
        .with_page_size(config.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_follows_account_type() {
        assert_eq!(Environment::from_account_type(Some("SANDBOX")), Environment::Prod);
        assert_eq!(Environment::from_account_type(Some("PRODUCTION")), Environment::Sandbox);
        assert_eq!(Environment::from_account_type(None), Environment::Sandbox);
    }

    #[test]
    fn env_vars_map_onto_config() {
        let config = Config::from_env_vars([
            ("YEXT_PUBLIC_API_KEY", "key-123"),
            ("YEXT_PUBLIC_EXP_KEY", "locator"),
            ("YEXT_PUBLIC_ARE_FACETS_ENABLED", "true"),
            ("STOREFINDER_PAGE_SIZE", "5"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(config.search_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.experience_key.as_deref(), Some("locator"));
        assert!(config.facets_enabled);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.locale, "it");
        assert_eq!(config.vertical_key, DEFAULT_VERTICAL);
    }

    #[test]
    fn facets_need_literal_true() {
        let config = Config::from_env_vars([("YEXT_PUBLIC_ARE_FACETS_ENABLED", "yes")]);
        assert!(!config.facets_enabled);
    }

    #[test]
    fn zero_page_size_falls_back() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "0".to_string());
        assert_eq!(Config::from_map(&map).page_size, app::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config {
            vertical_key: "stores".to_string(),
            facets_enabled: true,
            page_size: 7,
            theme_name: Some("catppuccin-mocha".to_string()),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.vertical, "stores");
        assert!(state.facets_enabled);
        assert_eq!(state.executor.page_size(), 7);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }

    #[test]
    fn broken_theme_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let config = Config {
            theme_file: Some(path),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, ui::theme::DEFAULT_THEME);
    }
}
