//! Library screens (clips, overlays, audios)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{AccessLevel, BrowserMode, BulkAction, LibraryKind, LibraryView, MediaItem};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_library(frame: &mut Frame, area: Rect, view: &LibraryView, access: AccessLevel) {
    let mut constraints = Vec::with_capacity(3);
    if view.kind.has_tabs() {
        constraints.push(Constraint::Length(3)); // Category tabs
    }
    constraints.push(Constraint::Length(3)); // Action bar
    constraints.push(Constraint::Min(0)); // Items

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let (action_area, list_area) = (chunks[chunks.len() - 2], chunks[chunks.len() - 1]);

    if view.kind.has_tabs() {
        render_category_tabs(frame, chunks[0], view);
    }
    render_action_bar(frame, action_area, view, access);

    if view.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(list_title(view)));
        frame.render_widget(loading, list_area);
        return;
    }

    let items = view.visible_items();
    if items.is_empty() {
        render_empty_state(frame, list_area, view, access);
        return;
    }

    let border_style = match view.mode() {
        BrowserMode::Browse => Style::default().fg(Color::Green),
        BrowserMode::Delete => Style::default().fg(Color::Red),
    };
    let content_width = list_area.width.saturating_sub(4) as usize;
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| render_item(view, i, item, content_width, items.len()))
        .collect();

    render_scrollable_list(
        frame,
        list_area,
        list_items,
        view.cursor,
        Block::default()
            .borders(Borders::ALL)
            .title(list_title(view))
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
}

fn list_title(view: &LibraryView) -> String {
    match view.mode() {
        BrowserMode::Browse => format!(" {} ({}) ", view.kind.title(), view.visible_items().len()),
        BrowserMode::Delete => format!(
            " Select {}s to delete ({} selected) ",
            view.kind.item_noun(),
            view.modes.selection().len()
        ),
    }
}

fn render_category_tabs(frame: &mut Frame, area: Rect, view: &LibraryView) {
    let spans: Vec<Span> = view
        .kind
        .categories()
        .iter()
        .flat_map(|category| {
            let style = if *category == view.category() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(format!(" {} ", category), style), Span::raw("  ")]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Players (←/→ to switch) "),
    );
    frame.render_widget(tabs, area);
}

fn render_action_bar(frame: &mut Frame, area: Rect, view: &LibraryView, access: AccessLevel) {
    let actions = view.available_actions();
    let mut spans = Vec::new();

    if let Some(action) = view.pending {
        let label = match action {
            BulkAction::DownloadAll => "Preparing download...",
            BulkAction::DeleteSelected => "Deleting...",
        };
        spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
    } else {
        if actions.contains(&BulkAction::DownloadAll) {
            spans.push(Span::styled(
                format!("[A] Download All ({})", view.visible_items().len()),
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
        }
        if actions.contains(&BulkAction::DeleteSelected) {
            spans.push(Span::styled(
                format!("[X] Delete Selected ({})", view.modes.selection().len()),
                Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("  "));
        }
    }

    // Header controls are admin only
    if access.is_admin() {
        let toggle = match view.mode() {
            BrowserMode::Browse => "[D] Delete",
            BrowserMode::Delete => "[D] Cancel",
        };
        spans.push(Span::styled("[U] Upload", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(toggle, Style::default().fg(Color::Red)));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(bar, area);
}

fn render_item<'a>(view: &LibraryView, index: usize, item: &'a MediaItem, width: usize, count: usize) -> ListItem<'a> {
    let is_cursor = index == view.cursor;
    let is_selected = view.modes.selection().contains(item.id);

    let glyph = match view.mode() {
        BrowserMode::Browse => "▶",
        BrowserMode::Delete if is_selected => "[x]",
        BrowserMode::Delete => "[ ]",
    };

    let num_width = calculate_num_width(count);
    let mut details: Vec<&str> = Vec::new();
    if let Some(subtitle) = item.subtitle.as_deref() {
        details.push(subtitle);
    }
    if let Some(duration) = item.duration_label() {
        details.push(duration);
    }
    if let Some(media_type) = item.media_type {
        details.push(media_type.label());
    }
    let detail_text = details.join(" · ");
    let title_width = width
        .saturating_sub(num_width + glyph.chars().count() + 4)
        .saturating_sub(detail_text.chars().count());

    let style = if is_cursor {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{:>w$} ", index + 1, w = num_width), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} ", glyph), style),
        Span::styled(truncate_string(&item.title, title_width.max(8)), style),
        Span::raw(" "),
        Span::styled(detail_text, Style::default().fg(Color::Gray)),
    ]))
}

/// Text shown when the visible category has no items
pub fn empty_state_lines(kind: LibraryKind, category: &str, access: AccessLevel) -> (String, String, &'static str) {
    let headline = match kind {
        LibraryKind::Clips => format!("No clips for {} yet", category),
        LibraryKind::Overlays => "No overlays yet".to_string(),
        LibraryKind::Audios => "No audio files yet".to_string(),
    };
    let call_to_action = match (kind, access.is_admin()) {
        (LibraryKind::Clips, true) => "Upload some clips to get started",
        (LibraryKind::Overlays, true) => "Upload some overlays to get started",
        (LibraryKind::Audios, true) => "Upload some audio files to get started",
        (LibraryKind::Audios, false) => "Check back later for audio content",
        (_, false) => "Check back later for new content",
    };
    let hint = match kind {
        LibraryKind::Clips => "Football player clips",
        LibraryKind::Overlays => "Video overlays & effects",
        LibraryKind::Audios => "Background music & sound effects",
    };
    (headline, call_to_action.to_string(), hint)
}

fn render_empty_state(frame: &mut Frame, area: Rect, view: &LibraryView, access: AccessLevel) {
    let (headline, call_to_action, hint) = empty_state_lines(view.kind, view.category(), access);

    let panel = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(call_to_action, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(list_title(view)));
    frame.render_widget(panel, area);
}
