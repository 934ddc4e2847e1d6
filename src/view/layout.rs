//! Layout rendering (top bar, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{AccessLevel, AppModel, BrowserMode, Screen};

pub const APP_TITLE: &str = "HC7 TikTok Editing Hub";

pub fn badge_style(access: AccessLevel) -> Style {
    match access {
        AccessLevel::Admin => Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        AccessLevel::Visitor => Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
    }
}

pub fn render_top_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Screen title
            Constraint::Length(16), // Access badge
        ])
        .split(area);

    let route = model.route();
    let title = match route.screen {
        Screen::Landing => APP_TITLE.to_string(),
        Screen::Menu => "Main Menu".to_string(),
        Screen::Library(kind) => format!("{} · {}", kind.title(), kind.subtitle()),
    };
    let back_hint = if model.can_go_back() { "← " } else { "" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(back_hint, Style::default().fg(Color::DarkGray)),
        Span::styled(title, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, chunks[0]);

    // The landing screen has no access level yet
    if route.screen != Screen::Landing {
        let badge = Paragraph::new(Span::styled(format!(" {} ", route.access.badge()), badge_style(route.access)))
            .centered()
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(badge, chunks[1]);
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, model: &AppModel) {
    let line = match &model.ui_state.status {
        Some(status) => Line::from(Span::styled(status.message.clone(), Style::default().fg(Color::Green))),
        None => Line::from(Span::styled(key_hints(model), Style::default().fg(Color::DarkGray))),
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(footer, area);
}

fn key_hints(model: &AppModel) -> String {
    match model.route().screen {
        Screen::Landing => "←/→ switch card · Enter choose · A admin · V visitor · H help · Q quit".to_string(),
        Screen::Menu => "↑/↓ move · Enter open · 1-3 jump · Esc back · H help".to_string(),
        Screen::Library(kind) => {
            let is_admin = model.access().is_admin();
            let mode = model.library.as_ref().map(|view| view.mode()).unwrap_or_default();
            let mut hints = vec!["↑/↓ move"];
            if kind.has_tabs() {
                hints.push("←/→ category");
            }
            match mode {
                BrowserMode::Browse => {
                    hints.extend(["Enter preview", "W download", "A download all"]);
                    if is_admin {
                        hints.extend(["D delete mode", "U upload"]);
                    }
                    hints.push("Esc back");
                }
                BrowserMode::Delete => hints.extend(["Space select", "X delete selected", "Esc cancel"]),
            }
            hints.join(" · ")
        }
    }
}
