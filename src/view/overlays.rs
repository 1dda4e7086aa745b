//! Overlay rendering (track dialog, help popup)

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::TrackDialog;
use super::utils::{centered_popup, truncate_string};

pub fn render_track_dialog(frame: &mut Frame, dialog: &TrackDialog) {
    let area = frame.area();

    let popup_width: u16 = 50;
    let inner_width = popup_width.saturating_sub(4) as usize;
    let wrapped = |text: &str| (text.chars().count().div_ceil(inner_width.max(1))).max(1) as u16;
    let mut text_lines = wrapped(&dialog.artist);
    if !dialog.details.is_empty() {
        text_lines += wrapped(&dialog.details);
    }

    // Borders + text + blank line + button
    let popup_area = centered_popup(area, popup_width, text_lines + 4);

    frame.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from(Span::styled(
        dialog.artist.clone(),
        Style::default().fg(Color::White),
    ))];
    if !dialog.details.is_empty() {
        lines.push(Line::from(Span::styled(
            dialog.details.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "[ Close ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
    ]);

    let title = truncate_string(&dialog.title, popup_area.width.saturating_sub(4) as usize);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Search box ──"),
        ("Type", "Edit the query"),
        ("Backspace", "Delete a character"),
        ("Esc", "Clear the query"),
        ("Tab / ↓", "Focus results"),
        ("Ctrl+Q", "Quit"),
        ("", ""),
        ("", "── Results ──"),
        ("↑ / ↓", "Move within a column"),
        ("← / →", "Jump to the next column"),
        ("Enter", "Play preview"),
        ("Tab / / / Esc", "Focus search box"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
        ("", ""),
        ("", "── Track dialog ──"),
        ("Enter / Esc", "Close and stop preview"),
    ];

    let popup_area = centered_popup(area, 52, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^48}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>15}", key),
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
