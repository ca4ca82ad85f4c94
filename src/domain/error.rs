//! Error types for the store locator coordinator.
//!
//! This module defines the centralized error type [`LocatorError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for store locator operations.
///
/// Consolidates the error conditions of the coordinator and its collaborators:
/// search execution, navigation state, theme loading and configuration. Variants
/// wrapping external crate errors convert automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use storefinder::LocatorError;
///
/// fn run_query() -> Result<(), LocatorError> {
///     Err(LocatorError::Search("index unavailable".to_string()))
/// }
///
/// assert!(run_query().is_err());
/// ```
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Search execution failed.
    ///
    /// Raised by a search backend when a vertical query cannot be answered
    /// (network failure, unknown vertical, malformed request).
    #[error("Search error: {0}")]
    Search(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Location fixtures or worker payloads could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the search worker failed.
    ///
    /// Occurs when the worker has no backend attached or a message cannot be
    /// routed back to the coordinator.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for store locator operations.
pub type Result<T> = std::result::Result<T, LocatorError>;
