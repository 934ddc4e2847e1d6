//! Landing screen: access cards and the admin key dialog

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{GateDialog, LandingCard, UiState};
use super::layout::APP_TITLE;
use super::utils::{centered_popup, mask_secret};

pub fn render_landing(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Length(7), // Cards
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Choose your access level to continue",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Length(24)])
        .flex(Flex::Center)
        .spacing(4)
        .split(rows[1]);

    render_card(frame, cards[0], "HC7", "Admin Access", Color::Cyan, ui_state.landing_card == LandingCard::Admin);
    render_card(
        frame,
        cards[1],
        "Visitor",
        "Guest Access",
        Color::Magenta,
        ui_state.landing_card == LandingCard::Visitor,
    );

    if ui_state.gate.open {
        render_gate_dialog(frame, &ui_state.gate);
    }
}

fn render_card(frame: &mut Frame, area: Rect, name: &str, subtitle: &str, accent: Color, focused: bool) {
    let (border_type, border_style) = if focused {
        (BorderType::Thick, Style::default().fg(accent))
    } else {
        (BorderType::Rounded, Style::default().fg(Color::DarkGray))
    };

    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn render_gate_dialog(frame: &mut Frame, gate: &GateDialog) {
    let popup_area = centered_popup(frame.area(), 44, 9);

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let input = if gate.key_input.is_empty() {
        Span::styled("Enter admin key", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(mask_secret(&gate.key_input), Style::default().fg(Color::White))
    };

    let mut lines = vec![
        Line::from(Span::styled("Enter the admin key to continue", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![Span::raw("> "), input]),
        Line::from(""),
    ];
    if let Some(error) = &gate.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
    }

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Admin Access (Enter submit, Esc cancel) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(dialog, popup_area);
}
