//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by screen and component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists, popups)
//! - `layout`: Top bar and footer
//! - `landing`: Access cards and admin key dialog
//! - `menu`: Section menu
//! - `library`: Clips, overlays and audios screens
//! - `overlays`: Modal overlays (error, upload, help)

mod utils;
mod layout;
mod landing;
mod menu;
mod library;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppModel, Screen};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + access badge
                Constraint::Min(0),    // Screen content
                Constraint::Length(3), // Status / key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], model);

        let ui_state = &model.ui_state;
        match ui_state.route.screen {
            Screen::Landing => landing::render_landing(frame, chunks[1], ui_state),
            Screen::Menu => menu::render_menu(frame, chunks[1], ui_state),
            Screen::Library(_) => {
                if let Some(view) = model.library.as_ref() {
                    library::render_library(frame, chunks[1], view, model.access());
                }
            }
        }

        layout::render_footer(frame, chunks[2], model);

        // Upload dialog overlay (library screens only)
        if ui_state.show_upload_dialog {
            if let Some(kind) = model.library_kind() {
                overlays::render_upload_dialog(frame, kind);
            }
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Error notification overlay (if there's an error)
        if let Some(error) = &ui_state.error {
            overlays::render_error_notification(frame, error);
        }
    }
}
