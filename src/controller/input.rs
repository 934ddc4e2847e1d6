//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{BrowserMode, BulkAction, LandingCard, LibraryKind, Screen};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        // Handle help popup
        if model.ui_state.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        // Handle upload modal
        if model.ui_state.show_upload_dialog {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.confirm_upload().await;
                }
                KeyCode::Esc => {
                    drop(model);
                    self.close_upload_dialog().await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Handle admin key dialog (all characters are typed into the field)
        if model.ui_state.gate.open {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.submit_admin_key().await;
                }
                KeyCode::Esc => {
                    drop(model);
                    self.close_gate_dialog().await;
                }
                KeyCode::Backspace => model.ui_state.gate.backspace(),
                KeyCode::Char(c) => model.ui_state.gate.push_char(c),
                _ => {}
            }
            return Ok(());
        }

        let screen = model.route().screen;
        drop(model);

        let handled = match screen {
            Screen::Landing => self.handle_landing_key(key).await,
            Screen::Menu => self.handle_menu_key(key).await,
            Screen::Library(kind) => self.handle_library_key(key, kind).await,
        };
        if handled {
            return Ok(());
        }

        // Global keybindings
        let mut model = self.model.lock().await;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
            KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_landing_key(&self, key: KeyEvent) -> bool {
        let mut model = self.model.lock().await;
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                model.ui_state.landing_card = model.ui_state.landing_card.other();
            }
            KeyCode::Enter => {
                let card = model.ui_state.landing_card;
                drop(model);
                match card {
                    LandingCard::Admin => self.open_gate_dialog().await,
                    LandingCard::Visitor => self.continue_as_visitor().await,
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                drop(model);
                self.open_gate_dialog().await;
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                drop(model);
                self.continue_as_visitor().await;
            }
            _ => return false,
        }
        true
    }

    async fn handle_menu_key(&self, key: KeyEvent) -> bool {
        let mut model = self.model.lock().await;
        match key.code {
            KeyCode::Up => model.menu_move_up(),
            KeyCode::Down => model.menu_move_down(),
            KeyCode::Enter => {
                drop(model);
                self.open_selected_menu_entry().await;
            }
            KeyCode::Char(c @ '1'..='3') => {
                let access = model.access();
                let index = c as usize - '1' as usize;
                drop(model);
                self.open_library(LibraryKind::ALL[index], access).await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                drop(model);
                self.navigate_back().await;
            }
            _ => return false,
        }
        true
    }

    async fn handle_library_key(&self, key: KeyEvent, kind: LibraryKind) -> bool {
        let mut model = self.model.lock().await;
        let is_admin = model.access().is_admin();
        let Some(mode) = model.library.as_ref().map(|view| view.mode()) else {
            return false;
        };

        match key.code {
            KeyCode::Up => model.library.iter_mut().for_each(|view| view.move_up()),
            KeyCode::Down => model.library.iter_mut().for_each(|view| view.move_down()),
            KeyCode::Right | KeyCode::Tab if kind.has_tabs() => {
                drop(model);
                self.next_category().await;
            }
            KeyCode::Left | KeyCode::BackTab if kind.has_tabs() => {
                drop(model);
                self.prev_category().await;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                drop(model);
                self.activate_current().await;
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                drop(model);
                self.download_current().await;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                drop(model);
                self.spawn_bulk_action(BulkAction::DownloadAll).await;
            }
            KeyCode::Char('d') | KeyCode::Char('D') if is_admin => {
                drop(model);
                self.toggle_delete_mode().await;
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete if mode == BrowserMode::Delete => {
                drop(model);
                self.spawn_bulk_action(BulkAction::DeleteSelected).await;
            }
            KeyCode::Char('u') | KeyCode::Char('U') if is_admin => {
                drop(model);
                self.open_upload_dialog().await;
            }
            KeyCode::Esc => {
                drop(model);
                if !self.cancel_delete_mode().await {
                    self.leave_library().await;
                }
            }
            KeyCode::Backspace => {
                drop(model);
                self.leave_library().await;
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::test_support::{
        controller, controller_with, finish_pending, wait_until_pending, ScriptedBackend, KEY,
    };
    use crate::controller::AppController;
    use crate::model::{AccessLevel, BrowserMode, ItemId, LibraryKind, Route, Screen};

    async fn press(controller: &AppController, code: KeyCode) {
        controller
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .await
            .unwrap();
    }

    async fn type_text(controller: &AppController, text: &str) {
        for c in text.chars() {
            press(controller, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn admin_flow_from_landing_to_library() {
        let controller = controller();
        press(&controller, KeyCode::Enter).await;
        assert!(controller.model.lock().await.ui_state.gate.open);

        // 'q' inside the dialog is typed, not a quit
        type_text(&controller, "q").await;
        press(&controller, KeyCode::Backspace).await;
        assert!(!controller.model.lock().await.should_quit());

        type_text(&controller, KEY).await;
        press(&controller, KeyCode::Enter).await;
        assert_eq!(controller.model.lock().await.route(), Route::menu(AccessLevel::Admin));

        press(&controller, KeyCode::Char('2')).await;
        assert_eq!(
            controller.model.lock().await.route(),
            Route::library(LibraryKind::Overlays, AccessLevel::Admin)
        );
    }

    #[tokio::test]
    async fn escape_closes_gate_dialog() {
        let controller = controller();
        press(&controller, KeyCode::Char('a')).await;
        type_text(&controller, "abc").await;
        press(&controller, KeyCode::Esc).await;

        let model = controller.model.lock().await;
        assert!(!model.ui_state.gate.open);
        assert!(model.ui_state.gate.key_input.is_empty());
        assert_eq!(model.route().screen, Screen::Landing);
    }

    #[tokio::test]
    async fn visitor_cannot_toggle_delete_mode_by_key() {
        let controller = controller();
        press(&controller, KeyCode::Char('v')).await;
        press(&controller, KeyCode::Down).await;
        press(&controller, KeyCode::Enter).await;
        press(&controller, KeyCode::Char('d')).await;

        let model = controller.model.lock().await;
        assert_eq!(model.library.as_ref().unwrap().mode(), BrowserMode::Browse);
    }

    #[tokio::test]
    async fn escape_leaves_delete_mode_before_leaving_screen() {
        let controller = controller();
        controller.navigate_to(Route::menu(AccessLevel::Admin)).await;
        controller.open_library(LibraryKind::Overlays, AccessLevel::Admin).await;
        press(&controller, KeyCode::Char('d')).await;
        press(&controller, KeyCode::Char(' ')).await;
        assert!(controller.model.lock().await.library.as_ref().unwrap().modes.selection().contains(ItemId(1)));

        press(&controller, KeyCode::Esc).await;
        {
            let model = controller.model.lock().await;
            let view = model.library.as_ref().unwrap();
            assert_eq!(view.mode(), BrowserMode::Browse);
            assert!(view.modes.selection().is_empty());
        }

        press(&controller, KeyCode::Esc).await;
        assert_eq!(controller.model.lock().await.route().screen, Screen::Menu);
    }

    #[tokio::test]
    async fn escape_waits_for_running_delete() {
        let controller = controller_with(Arc::new(ScriptedBackend::new().slow(Duration::from_millis(100))));
        controller.navigate_to(Route::menu(AccessLevel::Admin)).await;
        controller.open_library(LibraryKind::Audios, AccessLevel::Admin).await;
        press(&controller, KeyCode::Char('d')).await;
        press(&controller, KeyCode::Char(' ')).await;
        press(&controller, KeyCode::Char('x')).await;
        wait_until_pending(&controller).await;

        press(&controller, KeyCode::Esc).await;
        press(&controller, KeyCode::Backspace).await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.route().screen, Screen::Library(LibraryKind::Audios));
            assert_eq!(model.library.as_ref().unwrap().mode(), BrowserMode::Delete);
        }

        finish_pending(&controller).await;
        {
            let model = controller.model.lock().await;
            let view = model.library.as_ref().unwrap();
            assert_eq!(view.mode(), BrowserMode::Browse);
            assert_eq!(view.visible_items().len(), 2);
        }

        press(&controller, KeyCode::Esc).await;
        assert_eq!(controller.model.lock().await.route().screen, Screen::Menu);
    }

    #[tokio::test]
    async fn error_blocks_input_until_dismissed() {
        let controller = controller();
        controller.model.lock().await.set_error("boom".to_string());
        press(&controller, KeyCode::Char('v')).await;
        assert_eq!(controller.model.lock().await.route().screen, Screen::Landing);

        press(&controller, KeyCode::Esc).await;
        press(&controller, KeyCode::Char('v')).await;
        assert_eq!(controller.model.lock().await.route().screen, Screen::Menu);
    }

    #[tokio::test]
    async fn help_popup_and_quit() {
        let controller = controller();
        press(&controller, KeyCode::Char('h')).await;
        assert!(controller.model.lock().await.ui_state.show_help_popup);
        press(&controller, KeyCode::Char('q')).await;
        assert!(!controller.model.lock().await.should_quit());

        press(&controller, KeyCode::Esc).await;
        press(&controller, KeyCode::Char('q')).await;
        assert!(controller.model.lock().await.should_quit());
    }
}
