//! State of an open library screen

use std::collections::BTreeSet;

use crate::error::CatalogError;

use super::bulk::{self, BulkAction};
use super::catalog::{LibraryKind, MediaCatalog, MediaItem};
use super::mode::{BrowserMode, BrowserModeController, ModeSnapshot};

pub struct LibraryView {
    pub kind: LibraryKind,
    pub modes: BrowserModeController,
    pub catalog: MediaCatalog,
    pub cursor: usize,
    pub is_loading: bool,
    /// Bulk action waiting on the backend
    pub pending: Option<BulkAction>,
    /// Bumped each time a library screen is opened; late results from an
    /// older session are dropped
    pub session: u64,
}

impl LibraryView {
    pub fn new(kind: LibraryKind, session: u64) -> Self {
        Self {
            kind,
            modes: BrowserModeController::new(kind),
            catalog: MediaCatalog::empty(kind),
            cursor: 0,
            is_loading: true,
            pending: None,
            session,
        }
    }

    pub fn set_catalog(&mut self, catalog: MediaCatalog) {
        self.catalog = catalog;
        self.is_loading = false;
        self.clamp_cursor();
    }

    pub fn mode(&self) -> BrowserMode {
        self.modes.mode()
    }

    pub fn category(&self) -> &'static str {
        self.modes.category()
    }

    /// Items of the visible category
    pub fn visible_items(&self) -> &[MediaItem] {
        self.catalog.items_for(self.category()).unwrap_or(&[])
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.visible_items().get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.visible_items().len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    pub fn next_category(&mut self) -> Result<ModeSnapshot, CatalogError> {
        self.shift_category(1)
    }

    pub fn prev_category(&mut self) -> Result<ModeSnapshot, CatalogError> {
        let len = self.kind.categories().len();
        self.shift_category(len.saturating_sub(1))
    }

    pub fn select_category(&mut self, label: &str) -> Result<ModeSnapshot, CatalogError> {
        self.cursor = 0;
        self.modes.change_category(label)
    }

    /// Toggle the item under the cursor. Only in delete mode, and not while
    /// a bulk action is running.
    pub fn toggle_current(&mut self) -> Option<ModeSnapshot> {
        if self.mode() != BrowserMode::Delete || self.pending.is_some() {
            return None;
        }
        let id = self.current_item()?.id;
        Some(self.modes.toggle(id))
    }

    /// A delete is waiting on the backend. The screen must stay open until
    /// its result has been applied.
    pub fn delete_in_flight(&self) -> bool {
        self.pending == Some(BulkAction::DeleteSelected)
    }

    pub fn available_actions(&self) -> BTreeSet<BulkAction> {
        bulk::available_actions(self.mode(), self.modes.selection(), self.visible_items().len())
    }

    fn shift_category(&mut self, step: usize) -> Result<ModeSnapshot, CatalogError> {
        let categories = self.kind.categories();
        let index = categories
            .iter()
            .position(|c| *c == self.category())
            .unwrap_or(0);
        let next = categories[(index + step) % categories.len()];
        self.select_category(next)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_items().len().saturating_sub(1));
    }
}
