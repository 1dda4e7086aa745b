//! Layout rendering (search bar, status line)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ToastKind, UiState};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    is_loading: bool,
    spinner_frame: usize,
) {
    let is_focused = ui_state.active_section == ActiveSection::Search;

    let title = if is_loading {
        format!(" Search {} ", SPINNER[spinner_frame % SPINNER.len()])
    } else {
        " Search ".to_string()
    };

    let (search_text, text_style) = if ui_state.search_query.is_empty() {
        ("Type to search...", Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (ui_state.search_query.as_str(), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_query.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(if is_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, area);

    if is_focused {
        // Border plus padding on the left
        let typed = ui_state.search_query.chars().count() as u16;
        let x = (area.x + 2 + typed).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// One line at the bottom: the current toast, or key hints
pub fn render_status_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let line = match &ui_state.toast {
        Some(toast) => {
            let style = match toast.kind {
                ToastKind::Info => Style::default().fg(Color::Black).bg(Color::Cyan),
                ToastKind::Error => Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            };
            Line::from(Span::styled(format!(" {} ", toast.message), style))
        }
        None => {
            let hints = match ui_state.active_section {
                ActiveSection::Search => "Type to search · Tab results · Ctrl+Q quit",
                ActiveSection::Results => "←↑↓→ move · Enter play · / search · H help · Q quit",
            };
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        }
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
