//! Terminal rendering layer.
//!
//! The locator renders to ANSI text through composable components:
//!
//! ```text
//! AppState → compute_viewmodel → LocatorViewModel → components → frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable component renderers
//! - [`helpers`]: Cursor, truncation and distance formatting
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    CardItem, EmptyState, FacetPanel, FacetTile, FilterChip, FooterInfo, HeaderInfo,
    LocatorViewModel, PaginationInfo, SearchBarInfo,
};
