//! Main menu screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{AccessLevel, UiState};
use super::layout::badge_style;
use super::utils::render_scrollable_list;

pub fn render_menu(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(0),    // Entries
        ])
        .split(area);

    let access = ui_state.route.access;
    let label = match access {
        AccessLevel::Admin => "HC7",
        AccessLevel::Visitor => "VISITOR",
    };
    let heading = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!(" {} ", label), badge_style(access)),
            Span::raw("  "),
            Span::styled("Choose a section to explore", Style::default().fg(Color::Gray)),
        ]),
    ])
    .block(Block::default().padding(Padding::uniform(1)));
    frame.render_widget(heading, chunks[0]);

    let items: Vec<ListItem> = ui_state
        .menu_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == ui_state.menu_selected;
            let title_style = if !entry.enabled {
                Style::default().fg(Color::DarkGray)
            } else if is_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let marker = if is_selected { "▶ " } else { "  " };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, title_style),
                    Span::styled(format!("{}. {}", i + 1, entry.kind.title()), title_style),
                ]),
                Line::from(Span::styled(
                    format!("     {}", entry.kind.subtitle()),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    render_scrollable_list(
        frame,
        chunks[1],
        items,
        ui_state.menu_selected,
        Block::default()
            .borders(Borders::ALL)
            .title(" Sections ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green)),
    );
}
