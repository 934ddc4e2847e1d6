//! Access gate, menu and screen transitions

use crate::model::{AccessAttempt, AccessLevel, LibraryKind, Route, Screen};
use super::AppController;

impl AppController {
    pub async fn continue_as_visitor(&self) {
        let access = self.gate.continue_as_visitor();
        tracing::info!(access = access.query_value(), "Entering as visitor");
        self.navigate_to(Route::menu(access)).await;
    }

    pub async fn open_gate_dialog(&self) {
        let mut model = self.model.lock().await;
        model.ui_state.gate.open = true;
        model.ui_state.gate.reset();
    }

    pub async fn close_gate_dialog(&self) {
        let mut model = self.model.lock().await;
        model.ui_state.gate.open = false;
        model.ui_state.gate.reset();
    }

    /// Check the typed key. On success the dialog closes and the admin menu
    /// opens; on failure the dialog stays up with an error message.
    pub async fn submit_admin_key(&self) -> Option<AccessLevel> {
        let submitted = {
            let model = self.model.lock().await;
            model.ui_state.gate.key_input.clone()
        };

        let attempt = AccessAttempt::submit(&self.gate, submitted);
        tracing::info!(
            success = attempt.succeeded(),
            at = %attempt.submitted_at,
            "Admin key submitted"
        );

        if let Ok(access) = attempt.outcome {
            self.navigate_to(Route::menu(access)).await;
            return Some(access);
        }

        let mut model = self.model.lock().await;
        model.ui_state.gate.error = attempt.error_message();
        None
    }

    pub async fn navigate_to(&self, route: Route) {
        self.cancel_pending_task().await;
        tracing::debug!(path = %route.to_path(), "Navigating");

        let session = {
            let mut model = self.model.lock().await;
            model.navigate_to(route);
            model.library.as_ref().map(|view| view.session)
        };

        if let (Screen::Library(kind), Some(session)) = (route.screen, session) {
            self.load_library(kind, session).await;
        }
    }

    pub async fn navigate_back(&self) {
        self.cancel_pending_task().await;
        let mut model = self.model.lock().await;
        match model.navigate_back() {
            Some(route) => tracing::debug!(path = %route.to_path(), "Navigated back"),
            None => tracing::debug!("Already on the landing screen"),
        }
    }

    pub async fn open_selected_menu_entry(&self) {
        let (entry, access) = {
            let model = self.model.lock().await;
            (model.selected_menu_entry(), model.access())
        };
        match entry {
            Some(entry) if entry.enabled => self.open_library(entry.kind, access).await,
            Some(entry) => tracing::debug!(library = entry.kind.segment(), "Menu entry disabled"),
            None => {}
        }
    }

    pub async fn open_library(&self, kind: LibraryKind, access: AccessLevel) {
        self.navigate_to(Route::library(kind, access)).await;
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::test_support::{controller, KEY};
    use crate::model::{AccessLevel, LibraryKind, Route, Screen};

    #[tokio::test]
    async fn visitor_lands_on_visitor_menu() {
        let controller = controller();
        controller.continue_as_visitor().await;
        let model = controller.model.lock().await;
        assert_eq!(model.route(), Route::menu(AccessLevel::Visitor));
        assert_eq!(model.route().to_path(), "/menu?userType=visitor");
    }

    #[tokio::test]
    async fn correct_key_opens_admin_menu() {
        let controller = controller();
        controller.open_gate_dialog().await;
        controller.model.lock().await.ui_state.gate.key_input = KEY.to_string();

        assert_eq!(controller.submit_admin_key().await, Some(AccessLevel::Admin));
        let model = controller.model.lock().await;
        assert_eq!(model.route().to_path(), "/menu?userType=hc7");
        assert!(!model.ui_state.gate.open);
    }

    #[tokio::test]
    async fn wrong_key_keeps_dialog_open_with_message() {
        let controller = controller();
        controller.open_gate_dialog().await;
        controller.model.lock().await.ui_state.gate.key_input = "wrong".to_string();

        assert_eq!(controller.submit_admin_key().await, None);
        let model = controller.model.lock().await;
        assert_eq!(model.route().screen, Screen::Landing);
        assert!(model.ui_state.gate.open);
        assert_eq!(model.ui_state.gate.error.as_deref(), Some("Invalid key, please try again."));
        assert_eq!(model.ui_state.gate.key_input, "wrong");
    }

    #[tokio::test]
    async fn opening_library_loads_catalog() {
        let controller = controller();
        controller.open_library(LibraryKind::Overlays, AccessLevel::Visitor).await;
        let model = controller.model.lock().await;
        let view = model.library.as_ref().unwrap();
        assert!(!view.is_loading);
        assert_eq!(view.visible_items().len(), 6);
    }

    #[tokio::test]
    async fn menu_entry_routes_with_access_level() {
        let controller = controller();
        controller.navigate_to(Route::menu(AccessLevel::Admin)).await;
        controller.model.lock().await.menu_move_down();
        controller.open_selected_menu_entry().await;

        let model = controller.model.lock().await;
        assert_eq!(model.route(), Route::library(LibraryKind::Overlays, AccessLevel::Admin));
    }
}
