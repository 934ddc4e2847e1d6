//! HC7 TikTok Editing Hub
//!
//! Terminal hub for browsing and managing the editing media libraries
//! (player clips, overlays, audios) behind a shared admin key.
//!
//! - `model`: Library-view core (selection, modes, catalogs, gate, bulk actions) and screen state
//! - `controller`: Input handling and orchestration of the collaborators
//! - `view`: ratatui rendering
//! - `backend`: Media storage and file picker collaborators
//! - `config`, `logging`, `error`: Ambient plumbing

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;
