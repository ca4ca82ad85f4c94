//! Filesystem locations used by the locator.

use std::path::PathBuf;

/// Application directory name under the platform data directory.
pub const APP_DIR: &str = "storefinder";

/// Returns the data directory holding the location index and trace files.
///
/// Resolves to `dirs::data_local_dir()/storefinder` (for example
/// `~/.local/share/storefinder` on Linux), or `./.storefinder` when the
/// platform exposes no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")), |dir| dir.join(APP_DIR))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and all paths when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use storefinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/etc/storefinder/theme.toml").to_str(), Some("/etc/storefinder/theme.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
