//! Main application model with state management

use super::access::AccessLevel;
use super::catalog::{LibraryKind, MediaCatalog};
use super::library::LibraryView;
use super::route::{Route, Screen};
use super::types::{MenuEntry, Notice, UiState};

const NOTICE_TTL_SECS: u64 = 5;

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: UiState,
    pub library: Option<LibraryView>,
    navigation_stack: Vec<Route>,
    library_sessions: u64,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: UiState::default(),
            library: None,
            navigation_stack: Vec::new(),
            library_sessions: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn route(&self) -> Route {
        self.ui_state.route
    }

    pub fn access(&self) -> AccessLevel {
        self.ui_state.route.access
    }

    pub fn can_go_back(&self) -> bool {
        !self.navigation_stack.is_empty()
    }

    /// Push `route` and enter it
    pub fn navigate_to(&mut self, route: Route) {
        let previous = self.ui_state.route;
        self.navigation_stack.push(previous);
        self.enter(route);
    }

    /// Pop back to the previous route. Returns `None` on the landing screen.
    pub fn navigate_back(&mut self) -> Option<Route> {
        let route = self.navigation_stack.pop()?;
        self.enter(route);
        Some(route)
    }

    fn enter(&mut self, route: Route) {
        self.ui_state.route = route;
        self.ui_state.show_upload_dialog = false;
        self.ui_state.gate.open = false;
        self.ui_state.gate.reset();

        self.library = match route.screen {
            Screen::Library(kind) => {
                self.library_sessions += 1;
                Some(LibraryView::new(kind, self.library_sessions))
            }
            Screen::Landing | Screen::Menu => None,
        };
    }

    // ========================================================================
    // Menu
    // ========================================================================

    pub fn menu_move_up(&mut self) {
        self.ui_state.menu_selected = self.ui_state.menu_selected.saturating_sub(1);
    }

    pub fn menu_move_down(&mut self) {
        if self.ui_state.menu_selected < self.ui_state.menu_entries.len().saturating_sub(1) {
            self.ui_state.menu_selected += 1;
        }
    }

    pub fn selected_menu_entry(&self) -> Option<MenuEntry> {
        self.ui_state.menu_entries.get(self.ui_state.menu_selected).copied()
    }

    // ========================================================================
    // Library
    // ========================================================================

    /// Library view of `session`, if it is still the open one
    pub fn library_for_session(&mut self, session: u64) -> Option<&mut LibraryView> {
        self.library.as_mut().filter(|view| view.session == session)
    }

    pub fn set_catalog(&mut self, session: u64, catalog: MediaCatalog) -> bool {
        match self.library_for_session(session) {
            Some(view) if view.kind == catalog.kind() => {
                view.set_catalog(catalog);
                true
            }
            _ => false,
        }
    }

    pub fn library_kind(&self) -> Option<LibraryKind> {
        self.library.as_ref().map(|view| view.kind)
    }

    // ========================================================================
    // Notices & popups
    // ========================================================================

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error = Some(Notice::new(message));
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error.is_some()
    }

    pub fn set_status(&mut self, message: String) {
        self.ui_state.status = Some(Notice::new(message));
    }

    pub fn auto_clear_old_notices(&mut self) {
        let expired = |notice: &Option<Notice>| {
            notice
                .as_ref()
                .is_some_and(|n| n.timestamp.elapsed().as_secs() > NOTICE_TTL_SECS)
        };
        if expired(&self.ui_state.error) {
            self.ui_state.error = None;
        }
        if expired(&self.ui_state.status) {
            self.ui_state.status = None;
        }
    }

    pub fn show_help_popup(&mut self) {
        self.ui_state.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
