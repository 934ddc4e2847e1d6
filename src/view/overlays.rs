//! Overlay rendering (error notification, upload dialog, help popup)

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::backend::FileKind;
use crate::model::{LibraryKind, Notice};
use super::utils::centered_popup;

pub fn render_error_notification(frame: &mut Frame, error: &Notice) {
    let area = frame.area();

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

    // Calculate how many lines the error message will take when wrapped
    let error_line_count = error.message.chars().count().div_ceil(inner_width) as u16;

    // Height: top border (1) + error lines + bottom border (1)
    let popup_area = centered_popup(area, popup_width, 2 + error_line_count.max(1));

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error.message.clone())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(error_widget, popup_area);
}

/// Placeholder text of the upload dialog
pub fn upload_dialog_text(kind: LibraryKind) -> String {
    let accepted: Vec<&str> = FileKind::accepted_by(kind).iter().map(|k| k.label()).collect();
    match accepted.as_slice() {
        [single] => format!("Upload functionality will be implemented with file picker ({} files)", single),
        _ => format!(
            "Upload functionality will be implemented with file picker for {}s",
            accepted.join("s and ")
        ),
    }
}

pub fn render_upload_dialog(frame: &mut Frame, kind: LibraryKind) {
    let popup_area = centered_popup(frame.area(), 50, 9);

    frame.render_widget(Clear, popup_area);

    let title = match kind {
        LibraryKind::Clips => " Upload Clip ",
        LibraryKind::Overlays => " Upload Overlay ",
        LibraryKind::Audios => " Upload Audio ",
    };

    let dialog = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(upload_dialog_text(kind), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" pick files   "),
            Span::styled("Esc", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" close"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by screen
    let keybindings = vec![
        ("", "── Landing ──"),
        ("← / → / Tab", "Switch access card"),
        ("Enter", "Choose card"),
        ("A / V", "Admin key / Visitor"),
        ("", ""),
        ("", "── Menu ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter / 1-3", "Open section"),
        ("Esc / Backspace", "Go back"),
        ("", ""),
        ("", "── Library ──"),
        ("← / →", "Switch player (clips)"),
        ("Enter / Space", "Preview / select"),
        ("W", "Download item"),
        ("A", "Download all"),
        ("D", "Toggle delete mode (admin)"),
        ("X / Delete", "Delete selected"),
        ("U", "Upload (admin)"),
        ("Esc", "Cancel delete / go back"),
        ("Esc (busy)", "Waits for a delete, cancels a download"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_area = centered_popup(area, 62, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_text_names_accepted_kinds() {
        assert_eq!(
            upload_dialog_text(LibraryKind::Overlays),
            "Upload functionality will be implemented with file picker for images and videos"
        );
        assert!(upload_dialog_text(LibraryKind::Audios).contains("audio files"));
    }
}
