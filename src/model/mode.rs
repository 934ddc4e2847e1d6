//! Browse/delete mode state machine shared by every library view

use tokio::sync::watch;

use crate::error::{CatalogError, ModeError};

use super::catalog::{ItemId, LibraryKind};
use super::selection::SelectionSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrowserMode {
    /// Activating an item previews it
    #[default]
    Browse,
    /// Activating an item toggles its selection
    Delete,
}

/// State published to the presentation layer after every transition
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeSnapshot {
    pub mode: BrowserMode,
    pub selection: SelectionSet,
}

/// Owns the mode, the visible category and the selection of one library view.
///
/// The selection is category-scoped: entering or leaving delete mode and
/// switching category all clear it.
pub struct BrowserModeController {
    kind: LibraryKind,
    mode: BrowserMode,
    category: &'static str,
    selection: SelectionSet,
    updates: watch::Sender<ModeSnapshot>,
}

impl BrowserModeController {
    pub fn new(kind: LibraryKind) -> Self {
        let (updates, _) = watch::channel(ModeSnapshot::default());
        Self {
            kind,
            mode: BrowserMode::Browse,
            category: kind.default_category(),
            selection: SelectionSet::new(),
            updates,
        }
    }

    pub fn kind(&self) -> LibraryKind {
        self.kind
    }

    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            mode: self.mode,
            selection: self.selection.clone(),
        }
    }

    /// Receive a snapshot after every transition
    pub fn subscribe(&self) -> watch::Receiver<ModeSnapshot> {
        self.updates.subscribe()
    }

    pub fn enter_delete_mode(&mut self) -> Result<ModeSnapshot, ModeError> {
        self.transition(BrowserMode::Browse, BrowserMode::Delete)
    }

    pub fn exit_delete_mode(&mut self) -> Result<ModeSnapshot, ModeError> {
        self.transition(BrowserMode::Delete, BrowserMode::Browse)
    }

    /// Header toggle: enter delete mode from browse and vice versa
    pub fn toggle_delete_mode(&mut self) -> ModeSnapshot {
        let requested = match self.mode {
            BrowserMode::Browse => BrowserMode::Delete,
            BrowserMode::Delete => BrowserMode::Browse,
        };
        self.mode = requested;
        self.selection.clear();
        self.publish()
    }

    /// Switch the visible category. The selection is cleared even when the
    /// label is rejected, and subscribers receive a snapshot (with the old
    /// category and an empty selection) before the error is returned.
    pub fn change_category(&mut self, label: &str) -> Result<ModeSnapshot, CatalogError> {
        self.selection.clear();
        match self.kind.category(label) {
            Ok(category) => {
                self.category = category;
                Ok(self.publish())
            }
            Err(e) => {
                self.publish();
                Err(e)
            }
        }
    }

    pub fn toggle(&mut self, id: ItemId) -> ModeSnapshot {
        self.selection.toggle(id);
        self.publish()
    }

    /// Apply a delete outcome: a full success returns to browse mode with an
    /// empty selection, otherwise only the failed ids stay selected.
    pub fn finish_delete(&mut self, failed: &[ItemId]) -> ModeSnapshot {
        if failed.is_empty() {
            self.mode = BrowserMode::Browse;
            self.selection.clear();
        } else {
            self.selection.retain(|id| failed.contains(&id));
        }
        self.publish()
    }

    fn transition(&mut self, from: BrowserMode, to: BrowserMode) -> Result<ModeSnapshot, ModeError> {
        if self.mode != from {
            return Err(ModeError::InvalidTransition {
                from: self.mode,
                requested: to,
            });
        }
        self.mode = to;
        self.selection.clear();
        Ok(self.publish())
    }

    fn publish(&self) -> ModeSnapshot {
        let snapshot = self.snapshot();
        self.updates.send_replace(snapshot.clone());
        snapshot
    }
}
