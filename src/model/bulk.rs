//! Bulk actions over a library: download everything, delete the selection

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::backend::{ArchiveRef, BackendResult, DeleteReport, MediaBackend};
use crate::error::BackendError;

use super::catalog::{ItemId, LibraryKind, MediaCatalog};
use super::mode::{BrowserMode, BrowserModeController};
use super::selection::SelectionSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BulkAction {
    DownloadAll,
    DeleteSelected,
}

/// Download-all needs something to download; delete-selected needs delete
/// mode and a non-empty selection.
pub fn available_actions(mode: BrowserMode, selection: &SelectionSet, catalog_size: usize) -> BTreeSet<BulkAction> {
    let mut actions = BTreeSet::new();
    if catalog_size > 0 {
        actions.insert(BulkAction::DownloadAll);
    }
    if mode == BrowserMode::Delete && !selection.is_empty() {
        actions.insert(BulkAction::DeleteSelected);
    }
    actions
}

/// Dispatches bulk actions to the media backend
#[derive(Clone)]
pub struct BulkActionCoordinator {
    backend: Arc<dyn MediaBackend>,
}

impl BulkActionCoordinator {
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self { backend }
    }

    pub async fn invoke_download_all(&self, kind: LibraryKind, items: Vec<ItemId>) -> BackendResult<ArchiveRef> {
        tracing::info!(kind = kind.segment(), count = items.len(), "Requesting archive");
        self.backend.create_archive(kind, items).await
    }

    pub async fn invoke_delete_selected(&self, kind: LibraryKind, selection: &SelectionSet) -> BackendResult<DeleteReport> {
        if selection.is_empty() {
            return Err(BackendError::Rejected("no items selected".to_string()));
        }
        let ids = selection.to_sorted_vec();
        tracing::info!(kind = kind.segment(), ids = ?ids, "Requesting delete");
        self.backend.delete_items(kind, ids).await
    }
}

/// Reconcile view state with a delete report and return the replacement
/// catalog. Ids the backend failed to delete stay selected.
pub fn apply_delete_report(
    controller: &mut BrowserModeController,
    catalog: &MediaCatalog,
    report: &DeleteReport,
) -> MediaCatalog {
    controller.finish_delete(&report.failed_ids());
    catalog.without(&report.deleted)
}
