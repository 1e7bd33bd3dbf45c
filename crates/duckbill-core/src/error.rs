//! Error types for the duckbill engine.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the duckbill crates.
///
/// Normal conversation flow never produces an error: unmatched input,
/// missing sessions on selection calls, and stage lookup misses all have
/// defined fallback replies. Errors here cover the task store collaborator
/// and programming mistakes in the static catalog, which fail fast at load.
#[derive(Error, Debug, Clone, Serialize)]
pub enum DuckbillError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Malformed scenario catalog (detected at load time, never at runtime)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid task state name or transition
    #[error("Invalid task state: {0}")]
    InvalidState(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DuckbillError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<toml::de::Error> for DuckbillError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, DuckbillError>`.
pub type Result<T> = std::result::Result<T, DuckbillError>;
