//! Infrastructure for filesystem and host environment interactions.

pub mod navigation;
pub mod paths;

pub use navigation::{MemoryNavigation, NavigationState};
pub use paths::{expand_tilde, get_data_dir};
