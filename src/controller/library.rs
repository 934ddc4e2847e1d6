//! Library screen actions: loading, previews, bulk actions and uploads

use crate::backend::FileKind;
use crate::log_backend_result;
use crate::model::{apply_delete_report, BrowserMode, BulkAction, ItemId, LibraryKind, SelectionSet};
use super::AppController;

const BUSY_MESSAGE: &str = "Another action is still running.";
const DELETE_RUNNING_MESSAGE: &str = "Delete in progress. Wait for it to finish.";

/// Snapshot taken when a bulk action starts
struct BulkRequest {
    kind: LibraryKind,
    session: u64,
    category: &'static str,
    selection: SelectionSet,
    visible: Vec<ItemId>,
}

impl AppController {
    pub async fn load_library(&self, kind: LibraryKind, session: u64) {
        let result = self.backend.list_items(kind).await;
        log_backend_result!("list_items", result);

        let mut model = self.model.lock().await;
        match result {
            Ok(catalog) => {
                tracing::info!(kind = kind.segment(), items = catalog.len(), "Library loaded");
                if !model.set_catalog(session, catalog) {
                    tracing::debug!(kind = kind.segment(), "Library closed before catalog arrived");
                }
            }
            Err(e) => {
                if let Some(view) = model.library_for_session(session) {
                    view.is_loading = false;
                }
                model.set_error(Self::format_error(&e));
            }
        }
    }

    /// Enter/Space on an item: toggle it in delete mode, preview it otherwise
    pub async fn activate_current(&self) {
        let mut model = self.model.lock().await;
        let Some(view) = model.library.as_mut() else {
            return;
        };

        if view.mode() == BrowserMode::Delete {
            match view.toggle_current() {
                Some(snapshot) => tracing::debug!(selected = snapshot.selection.len(), "Selection changed"),
                None if view.pending.is_some() => tracing::debug!("Selection locked while a bulk action runs"),
                None => {}
            }
            return;
        }

        let Some(item) = view.current_item() else {
            return;
        };
        let verb = match view.kind {
            LibraryKind::Overlays => "Previewing",
            LibraryKind::Clips | LibraryKind::Audios => "Playing",
        };
        let message = format!("{} {}: {}", verb, view.kind.item_noun(), item.title);
        tracing::info!(id = %item.id, thumbnail = %item.thumbnail, "{}", message);
        model.set_status(message);
    }

    /// Archive just the item under the cursor
    pub async fn download_current(&self) {
        let (kind, id, title) = {
            let model = self.model.lock().await;
            let Some(view) = model.library.as_ref() else {
                return;
            };
            if view.mode() != BrowserMode::Browse {
                return;
            }
            let Some(item) = view.current_item() else {
                return;
            };
            (view.kind, item.id, item.title.clone())
        };

        tracing::info!(id = %id, title, "Downloading item");
        let result = self.backend.create_archive(kind, vec![id]).await;
        log_backend_result!("create_archive", result);

        let mut model = self.model.lock().await;
        match result {
            Ok(archive) => model.set_status(format!("Download ready: {} ({})", title, archive)),
            Err(e) => model.set_error(Self::format_error(&e)),
        }
    }

    /// Header delete toggle. Admin only.
    pub async fn toggle_delete_mode(&self) {
        let mut model = self.model.lock().await;
        if !model.access().is_admin() {
            tracing::debug!("Delete mode requires admin access");
            return;
        }
        if let Some(view) = model.library.as_mut() {
            if view.pending.is_some() {
                return;
            }
            let snapshot = view.modes.toggle_delete_mode();
            tracing::debug!(mode = ?snapshot.mode, "Delete mode toggled");
        }
    }

    /// Esc in delete mode
    pub async fn cancel_delete_mode(&self) -> bool {
        let mut model = self.model.lock().await;
        match model.library.as_mut() {
            Some(view) if view.mode() == BrowserMode::Delete && view.pending.is_none() => {
                view.modes.exit_delete_mode().is_ok()
            }
            _ => false,
        }
    }

    /// Esc/Backspace on a library screen. A running delete keeps the screen
    /// open so its outcome can be applied; any other bulk action is cancelled.
    pub async fn leave_library(&self) {
        {
            let mut model = self.model.lock().await;
            if model.library.as_ref().is_some_and(|view| view.delete_in_flight()) {
                tracing::debug!("Leave refused while delete runs");
                model.set_status(DELETE_RUNNING_MESSAGE.to_string());
                return;
            }
        }
        self.navigate_back().await;
    }

    pub async fn next_category(&self) {
        self.shift_category(true).await;
    }

    pub async fn prev_category(&self) {
        self.shift_category(false).await;
    }

    async fn shift_category(&self, forward: bool) {
        let mut model = self.model.lock().await;
        let Some(view) = model.library.as_mut() else {
            return;
        };
        if !view.kind.has_tabs() || view.pending.is_some() {
            return;
        }
        let result = if forward {
            view.next_category()
        } else {
            view.prev_category()
        };
        match result {
            Ok(_) => tracing::debug!(category = view.category(), "Category changed"),
            Err(e) => tracing::error!(error = %e, "Category change failed"),
        }
    }

    /// Run a bulk action in the background so the UI keeps rendering
    pub async fn spawn_bulk_action(&self, action: BulkAction) {
        let mut pending = self.pending_task.lock().await;
        if pending.as_ref().is_some_and(|handle| !handle.is_finished()) {
            drop(pending);
            self.model.lock().await.set_error(BUSY_MESSAGE.to_string());
            return;
        }

        let controller = self.clone();
        *pending = Some(tokio::spawn(async move {
            match action {
                BulkAction::DownloadAll => controller.download_all().await,
                BulkAction::DeleteSelected => controller.delete_selected().await,
            }
        }));
    }

    pub async fn download_all(&self) {
        let Some(request) = self.begin_bulk_action(BulkAction::DownloadAll).await else {
            return;
        };
        tracing::info!(
            kind = request.kind.segment(),
            category = request.category,
            "Downloading all items"
        );

        let result = self.bulk.invoke_download_all(request.kind, request.visible.clone()).await;
        log_backend_result!("download_all", result);

        let mut model = self.model.lock().await;
        let Some(view) = model.library_for_session(request.session) else {
            tracing::debug!("Library closed, dropping download result");
            return;
        };
        view.pending = None;
        match result {
            Ok(archive) => model.set_status(format!(
                "Download ready: {} {}s ({})",
                request.visible.len(),
                request.kind.item_noun(),
                archive
            )),
            Err(e) => model.set_error(Self::format_error(&e)),
        }
    }

    /// Delete the selection. Fully deleted: back to browse mode. Partially
    /// deleted: failed items stay selected. Failed: nothing changes.
    pub async fn delete_selected(&self) {
        let Some(request) = self.begin_bulk_action(BulkAction::DeleteSelected).await else {
            return;
        };

        let result = self.bulk.invoke_delete_selected(request.kind, &request.selection).await;
        log_backend_result!("delete_selected", result);

        let mut model = self.model.lock().await;
        let Some(view) = model.library_for_session(request.session) else {
            tracing::debug!("Library closed, dropping delete result");
            return;
        };
        view.pending = None;

        let notice = match result {
            Ok(report) => {
                let catalog = apply_delete_report(&mut view.modes, &view.catalog, &report);
                view.set_catalog(catalog);
                if report.is_complete() {
                    Ok(format!("Deleted {} {}(s)", report.deleted.len(), request.kind.item_noun()))
                } else {
                    for (id, e) in &report.failed {
                        tracing::warn!(id = %id, error = %e, "Item not deleted");
                    }
                    Err(format!(
                        "Could not delete {} of {} selected items. They are still selected.",
                        report.failed.len(),
                        request.selection.len()
                    ))
                }
            }
            Err(e) => Err(Self::format_error(&e)),
        };

        match notice {
            Ok(message) => model.set_status(message),
            Err(message) => model.set_error(message),
        }
    }

    async fn begin_bulk_action(&self, action: BulkAction) -> Option<BulkRequest> {
        let mut model = self.model.lock().await;
        let is_admin = model.access().is_admin();

        let refusal = match model.library.as_mut() {
            None => return None,
            Some(view) if view.pending.is_some() => BUSY_MESSAGE,
            Some(view) => {
                if !view.available_actions().contains(&action) {
                    tracing::debug!(action = ?action, "Bulk action not available");
                    return None;
                }
                if action == BulkAction::DeleteSelected && !is_admin {
                    return None;
                }
                view.pending = Some(action);
                return Some(BulkRequest {
                    kind: view.kind,
                    session: view.session,
                    category: view.category(),
                    selection: view.modes.selection().clone(),
                    visible: view.visible_items().iter().map(|item| item.id).collect(),
                });
            }
        };

        model.set_error(refusal.to_string());
        None
    }

    pub async fn open_upload_dialog(&self) {
        let mut model = self.model.lock().await;
        if model.access().is_admin() && model.library.is_some() {
            model.ui_state.show_upload_dialog = true;
        }
    }

    pub async fn close_upload_dialog(&self) {
        self.model.lock().await.ui_state.show_upload_dialog = false;
    }

    /// Ask the picker for files. Transfer itself is not implemented.
    pub async fn confirm_upload(&self) {
        let kind = {
            let mut model = self.model.lock().await;
            model.ui_state.show_upload_dialog = false;
            match model.library_kind() {
                Some(kind) => kind,
                None => return,
            }
        };

        let result = self.picker.pick_files(FileKind::accepted_by(kind)).await;
        let mut model = self.model.lock().await;
        match result {
            Ok(files) if files.is_empty() => model.set_status("No files selected".to_string()),
            Ok(files) => {
                tracing::info!(kind = kind.segment(), count = files.len(), "Files picked for upload");
                model.set_status(format!("{} file(s) picked. Upload is not available yet.", files.len()));
            }
            Err(e) => model.set_error(Self::format_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use crate::controller::test_support::{
        controller, controller_with, finish_pending, wait_until_pending, ScriptedBackend,
    };
    use crate::model::{AccessLevel, BrowserMode, BulkAction, ItemId, LibraryKind, Screen};

    async fn select_all_for_delete(controller: &crate::controller::AppController) {
        controller.toggle_delete_mode().await;
        let mut model = controller.model.lock().await;
        let view = model.library.as_mut().unwrap();
        for id in [1, 2] {
            view.modes.toggle(ItemId(id));
        }
    }

    #[tokio::test]
    async fn visitors_cannot_enter_delete_mode_or_upload() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Visitor).await;
        controller.toggle_delete_mode().await;
        controller.open_upload_dialog().await;

        let model = controller.model.lock().await;
        assert_eq!(model.library.as_ref().unwrap().mode(), BrowserMode::Browse);
        assert!(!model.ui_state.show_upload_dialog);
    }

    #[tokio::test]
    async fn successful_delete_clears_selection_and_mode() {
        let controller = controller_with(Arc::new(ScriptedBackend::new()));
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.delete_selected().await;

        let model = controller.model.lock().await;
        let view = model.library.as_ref().unwrap();
        assert_eq!(view.mode(), BrowserMode::Browse);
        assert!(view.modes.selection().is_empty());
        assert_eq!(view.visible_items().len(), 1);
        assert!(view.pending.is_none());
        assert!(model.ui_state.status.is_some());
    }

    #[tokio::test]
    async fn failed_delete_keeps_selection_and_reports_error() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.fail_deletes.store(true, Ordering::Relaxed);
        let controller = controller_with(backend);
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.delete_selected().await;

        let model = controller.model.lock().await;
        let view = model.library.as_ref().unwrap();
        assert_eq!(view.mode(), BrowserMode::Delete);
        assert_eq!(view.modes.selection().to_sorted_vec(), vec![ItemId(1), ItemId(2)]);
        assert_eq!(view.visible_items().len(), 3);
        assert!(model.has_error());
    }

    #[tokio::test]
    async fn delete_without_selection_does_nothing() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Admin).await;
        controller.toggle_delete_mode().await;
        controller.delete_selected().await;

        let model = controller.model.lock().await;
        assert_eq!(model.library.as_ref().unwrap().visible_items().len(), 6);
        assert!(!model.has_error());
    }

    #[tokio::test]
    async fn download_all_reports_archive() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Visitor).await;
        controller.download_all().await;

        let model = controller.model.lock().await;
        let status = model.ui_state.status.as_ref().unwrap();
        assert!(status.message.contains("archive://overlays/6-items"));
    }

    #[tokio::test]
    async fn download_all_is_unavailable_for_empty_library() {
        let controller = controller();
        controller.open_library(LibraryKind::Clips, AccessLevel::Admin).await;
        controller.download_all().await;

        let model = controller.model.lock().await;
        assert!(model.ui_state.status.is_none());
        assert!(!model.has_error());
    }

    #[tokio::test]
    async fn busy_library_refuses_second_bulk_action() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Admin).await;
        controller.model.lock().await.library.as_mut().unwrap().pending = Some(BulkAction::DownloadAll);

        controller.download_all().await;
        assert!(controller.model.lock().await.has_error());
    }

    #[tokio::test]
    async fn leaving_library_cancels_running_download() {
        let backend = Arc::new(ScriptedBackend::new().slow(Duration::from_millis(200)));
        let controller = controller_with(backend.clone());
        controller.open_library(LibraryKind::Audios, AccessLevel::Visitor).await;

        controller.spawn_bulk_action(BulkAction::DownloadAll).await;
        wait_until_pending(&controller).await;
        controller.leave_library().await;
        assert!(controller.pending_task.lock().await.is_none());
        assert_eq!(controller.model.lock().await.route().screen, Screen::Landing);

        controller.open_library(LibraryKind::Audios, AccessLevel::Visitor).await;
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(backend.completed.load(Ordering::SeqCst), 0);
        let model = controller.model.lock().await;
        assert!(model.ui_state.status.is_none());
        assert!(!model.has_error());
        let view = model.library.as_ref().unwrap();
        assert!(view.pending.is_none());
        assert_eq!(view.visible_items().len(), 3);
    }

    #[tokio::test]
    async fn leaving_is_refused_while_delete_runs() {
        let backend = Arc::new(ScriptedBackend::new().slow(Duration::from_millis(100)));
        let controller = controller_with(backend.clone());
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.spawn_bulk_action(BulkAction::DeleteSelected).await;
        wait_until_pending(&controller).await;
        controller.leave_library().await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.route().screen, Screen::Library(LibraryKind::Audios));
            assert_eq!(
                model.ui_state.status.as_ref().unwrap().message,
                "Delete in progress. Wait for it to finish."
            );
        }

        finish_pending(&controller).await;
        assert_eq!(backend.completed.load(Ordering::SeqCst), 1);
        let model = controller.model.lock().await;
        let view = model.library.as_ref().unwrap();
        assert_eq!(view.mode(), BrowserMode::Browse);
        assert_eq!(view.visible_items().len(), 1);
    }

    #[tokio::test]
    async fn partial_delete_keeps_only_failed_items_selected() {
        let controller = controller_with(Arc::new(ScriptedBackend::new().failing_ids(&[2])));
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.delete_selected().await;

        let model = controller.model.lock().await;
        assert_eq!(
            model.ui_state.error.as_ref().unwrap().message,
            "Could not delete 1 of 2 selected items. They are still selected."
        );
        let view = model.library.as_ref().unwrap();
        assert_eq!(view.mode(), BrowserMode::Delete);
        assert_eq!(view.modes.selection().to_sorted_vec(), vec![ItemId(2)]);
        let remaining: Vec<ItemId> = view.visible_items().iter().map(|item| item.id).collect();
        assert_eq!(remaining, vec![ItemId(2), ItemId(3)]);
        assert!(view.pending.is_none());
    }

    #[tokio::test]
    async fn selection_is_locked_while_delete_runs() {
        let backend = ScriptedBackend::new()
            .failing_ids(&[2])
            .slow(Duration::from_millis(100));
        let controller = controller_with(Arc::new(backend));
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.spawn_bulk_action(BulkAction::DeleteSelected).await;
        wait_until_pending(&controller).await;
        {
            let mut model = controller.model.lock().await;
            let view = model.library.as_mut().unwrap();
            view.move_down();
            view.move_down();
        }
        controller.activate_current().await;
        assert_eq!(
            controller.model.lock().await.library.as_ref().unwrap().modes.selection().to_sorted_vec(),
            vec![ItemId(1), ItemId(2)]
        );

        finish_pending(&controller).await;
        let model = controller.model.lock().await;
        assert_eq!(model.library.as_ref().unwrap().modes.selection().to_sorted_vec(), vec![ItemId(2)]);
    }

    #[tokio::test]
    async fn activating_item_in_browse_mode_previews_it() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Visitor).await;
        controller.activate_current().await;

        let model = controller.model.lock().await;
        assert_eq!(
            model.ui_state.status.as_ref().unwrap().message,
            "Previewing overlay: Fire Effect"
        );
    }

    #[tokio::test]
    async fn activating_item_in_delete_mode_toggles_it() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Admin).await;
        controller.toggle_delete_mode().await;
        controller.activate_current().await;
        assert!(controller.model.lock().await.library.as_ref().unwrap().modes.selection().contains(ItemId(1)));
        controller.activate_current().await;
        assert!(controller.model.lock().await.library.as_ref().unwrap().modes.selection().is_empty());
    }

    #[tokio::test]
    async fn single_item_download_uses_backend_archive() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Visitor).await;
        controller.download_current().await;

        let model = controller.model.lock().await;
        let status = &model.ui_state.status.as_ref().unwrap().message;
        assert!(status.contains("Fire Effect"));
        assert!(status.contains("archive://overlays/1-items"));
    }

    #[tokio::test]
    async fn upload_dialog_uses_placeholder_picker() {
        let controller = controller();
        controller.open_library(LibraryKind::Clips, AccessLevel::Admin).await;
        controller.open_upload_dialog().await;
        assert!(controller.model.lock().await.ui_state.show_upload_dialog);

        controller.confirm_upload().await;
        let model = controller.model.lock().await;
        assert!(!model.ui_state.show_upload_dialog);
        assert_eq!(model.ui_state.status.as_ref().unwrap().message, "No files selected");
    }

    #[tokio::test]
    async fn spawned_delete_completes_in_background() {
        let controller = controller_with(Arc::new(ScriptedBackend::new()));
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        select_all_for_delete(&controller).await;

        controller.spawn_bulk_action(BulkAction::DeleteSelected).await;
        finish_pending(&controller).await;

        let model = controller.model.lock().await;
        assert_eq!(model.library.as_ref().unwrap().visible_items().len(), 1);
    }

    #[tokio::test]
    async fn clips_tabs_cycle_in_both_directions() {
        let controller = controller();
        controller.open_library(LibraryKind::Clips, AccessLevel::Admin).await;
        controller.next_category().await;
        controller.next_category().await;
        assert_eq!(controller.model.lock().await.library.as_ref().unwrap().category(), "Neymar");
        controller.prev_category().await;
        assert_eq!(controller.model.lock().await.library.as_ref().unwrap().category(), "Messi");
    }
}
