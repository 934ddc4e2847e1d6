//! UI state shared by the screens

use std::time::Instant;

use super::catalog::LibraryKind;
use super::route::Route;

/// Access cards on the landing screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandingCard {
    #[default]
    Admin,
    Visitor,
}

impl LandingCard {
    pub fn other(self) -> Self {
        match self {
            LandingCard::Admin => LandingCard::Visitor,
            LandingCard::Visitor => LandingCard::Admin,
        }
    }
}

/// Admin key dialog on the landing screen
#[derive(Clone, Debug, Default)]
pub struct GateDialog {
    pub open: bool,
    pub key_input: String,
    pub error: Option<String>,
}

impl GateDialog {
    pub fn reset(&mut self) {
        self.key_input.clear();
        self.error = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.key_input.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.key_input.pop();
        self.error = None;
    }
}

/// An entry of the main menu
#[derive(Clone, Copy, Debug)]
pub struct MenuEntry {
    pub kind: LibraryKind,
    pub enabled: bool,
}

/// A timed message shown over the screen
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub timestamp: Instant,
}

impl Notice {
    pub fn new(message: String) -> Self {
        Self {
            message,
            timestamp: Instant::now(),
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub route: Route,
    pub landing_card: LandingCard,
    pub gate: GateDialog,
    pub menu_entries: Vec<MenuEntry>,
    pub menu_selected: usize,
    pub error: Option<Notice>,
    pub status: Option<Notice>,
    pub show_help_popup: bool,
    pub show_upload_dialog: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            route: Route::landing(),
            landing_card: LandingCard::default(),
            gate: GateDialog::default(),
            menu_entries: LibraryKind::ALL
                .into_iter()
                .map(|kind| MenuEntry { kind, enabled: true })
                .collect(),
            menu_selected: 0,
            error: None,
            status: None,
            show_help_popup: false,
            show_upload_dialog: false,
        }
    }
}
