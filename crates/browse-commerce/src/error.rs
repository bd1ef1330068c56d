//! Commerce error types.

use thiserror::Error;

/// Errors raised at the edges of the browse core.
///
/// Filtering and sorting are total; these only surface when parsing
/// user-supplied names, loading an alternate catalog, or reading an
/// interaction script.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Condition name outside the fixed set.
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    /// Sort option name outside the fixed set.
    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),

    /// Catalog could not be decoded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Two catalog entries share a product code.
    #[error("Duplicate product code: {0}")]
    DuplicateProduct(String),

    /// The browse session's driver task has stopped.
    #[error("Browse session closed")]
    SessionClosed,

    /// The browse session's driver task failed.
    #[error("Browse session error: {0}")]
    Session(String),

    /// Interaction script could not be decoded.
    #[error("Script error: {0}")]
    Script(String),
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Script(e.to_string())
    }
}
