//! Main content area rendering (result grid or help text)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::config::span_count;
use crate::model::{
    card_title_lines, ActiveSection, ContentState, GridCard, ResultItem, UiState,
    VisibleElement, WaterfallLayout,
};
use super::utils::truncate_string;

const HELP_TEXT: &str = "Start typing to search for music.\n\n\
    Results show up as soon as you stop typing.\n\
    Pick one with the arrow keys and press Enter to hear a preview.";

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match content_state.visible_element() {
        VisibleElement::HelpText => {
            let help = Paragraph::new(HELP_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(help, area);
        }
        VisibleElement::ResultList => {
            render_results_grid(frame, area, content_state, is_focused, border_style);
        }
    }
}

fn render_results_grid(
    frame: &mut Frame,
    area: Rect,
    content_state: &ContentState,
    is_focused: bool,
    border_style: Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", content_state.results.len()))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = WaterfallLayout::new(
        &content_state.results,
        inner.width,
        span_count(area.width, area.height),
    );
    if layout.column_width < 3 {
        return;
    }

    let selected = content_state.selected_index;
    let offset = scroll_offset(&layout, selected, inner.height);

    for card in &layout.cards {
        let Some(slice) = visible_slice(card, offset, inner.height) else {
            continue;
        };
        let card_area = Rect {
            x: inner.x + card.column as u16 * layout.column_width,
            y: inner.y + slice.y,
            width: layout.column_width,
            height: slice.height,
        };
        let Some(item) = content_state.results.get(card.index) else {
            continue;
        };
        render_card(frame, card_area, slice, item, card.index == selected, is_focused);
    }
}

/// The rows of a card that fall inside the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CardSlice {
    /// Row inside the viewport
    y: u16,
    height: u16,
    /// Card rows scrolled off above the viewport
    hidden_top: u16,
    clipped_bottom: bool,
}

fn visible_slice(card: &GridCard, offset: u16, viewport_height: u16) -> Option<CardSlice> {
    let bottom = card.top.saturating_add(card.height);
    let viewport_bottom = offset.saturating_add(viewport_height);
    if bottom <= offset || card.top >= viewport_bottom {
        return None;
    }
    let first = card.top.max(offset);
    Some(CardSlice {
        y: first - offset,
        height: bottom.min(viewport_bottom) - first,
        hidden_top: first - card.top,
        clipped_bottom: bottom > viewport_bottom,
    })
}

/// First grid row to draw so the selected card is fully on screen
fn scroll_offset(layout: &WaterfallLayout, selected: usize, viewport_height: u16) -> u16 {
    let Some(card) = layout.card(selected) else {
        return 0;
    };
    let bottom = card.top.saturating_add(card.height);
    bottom.saturating_sub(viewport_height).min(card.top)
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    slice: CardSlice,
    item: &ResultItem,
    is_selected: bool,
    is_focused: bool,
) {
    let (border_style, title_style) = if is_selected && is_focused {
        (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else if is_selected {
        (
            Style::default().fg(Color::White),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
        )
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = card_title_lines(item, area.width)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, title_style)))
        .collect();
    lines.push(Line::from(Span::styled(
        truncate_string(item.artist(), inner_width),
        Style::default().fg(Color::Gray),
    )));

    let mut borders = Borders::ALL;
    if slice.hidden_top > 0 {
        borders.remove(Borders::TOP);
    }
    if slice.clipped_bottom {
        borders.remove(Borders::BOTTOM);
    }
    // The top border row is the first one to scroll away
    let scroll = slice.hidden_top.saturating_sub(1);

    let card = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(borders)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}
