//! Model module - Application state and data types
//!
//! This module contains the library-view core and the screen state built on
//! top of it. It is organized into submodules by responsibility:
//!
//! - `catalog`: Media items and per-library catalogs
//! - `selection`: Selected item identifiers
//! - `mode`: Browse/delete mode state machine
//! - `bulk`: Bulk action availability and dispatch
//! - `access`: Admin gate and access levels
//! - `route`: Screen routes
//! - `types`: UI state (dialogs, menu, notices)
//! - `library`: State of an open library screen
//! - `app_model`: Main application model with state management methods

mod catalog;
mod selection;
mod mode;
mod bulk;
mod access;
mod route;
mod types;
mod library;
mod app_model;

// Re-export all public types for convenient access
pub use catalog::{
    ItemId, LibraryKind, MediaCatalog, MediaItem, MediaType,
    ALL_CATEGORY, CLIP_CATEGORIES,
};

pub use selection::SelectionSet;

pub use mode::{BrowserMode, BrowserModeController, ModeSnapshot};

pub use bulk::{apply_delete_report, available_actions, BulkAction, BulkActionCoordinator};

pub use access::{AccessAttempt, AccessGate, AccessLevel};

pub use route::{Route, Screen};

pub use types::{GateDialog, LandingCard, MenuEntry, Notice, UiState};

pub use library::LibraryView;

pub use app_model::AppModel;
