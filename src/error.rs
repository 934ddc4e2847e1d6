//! Error types for each domain of the hub.
//!
//! - [`AccessError`] - admin gate verification
//! - [`CatalogError`] - catalog construction and category lookup
//! - [`ModeError`] - browse/delete mode transitions
//! - [`BackendError`] - media storage collaborator failures
//! - [`ConfigError`] - settings file loading

use thiserror::Error;

use crate::model::{BrowserMode, ItemId};

/// Admin gate errors. Always recovered locally by redisplaying the gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Invalid key, please try again.")]
    InvalidCredential,
}

/// Catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Category is not part of the library's fixed enumeration
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Identifiers must be unique within one catalog
    #[error("Duplicate item id {0} in catalog")]
    DuplicateItem(ItemId),
}

/// Mode transition errors. Never fatal; callers treat them as a no-op.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
    #[error("Cannot switch to {requested:?} mode while in {from:?} mode")]
    InvalidTransition {
        from: BrowserMode,
        requested: BrowserMode,
    },
}

/// Failures reported by the media storage backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Media backend unavailable: {0}")]
    Unavailable(String),

    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Settings loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Admin key must not be empty")]
    MissingSecret,
}
