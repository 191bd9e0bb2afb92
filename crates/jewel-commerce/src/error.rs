//! Commerce error types.

use thiserror::Error;

/// Errors that can occur while loading a catalog or configuring search.
///
/// Matching itself never fails; these cover the data and settings that feed it.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {message}")]
    CatalogRead { path: String, message: String },

    /// Catalog file extension is not understood.
    #[error("Unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// The same category appears twice in the category list.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid search settings.
    #[error("Invalid search config: {0}")]
    InvalidConfig(String),

    /// Debouncer task has stopped.
    #[error("Debouncer is closed")]
    DebouncerClosed,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
