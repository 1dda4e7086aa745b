//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, popup placement)
//! - `layout`: Screen structure (search bar, status line)
//! - `content`: Result grid or help text
//! - `overlays`: Modal overlays (track dialog, help)

mod utils;
mod layout;
mod content;
mod overlays;

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::model::AppModel;

pub struct AppView;

impl AppView {
    fn split(area: Rect) -> Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Results or help text
                Constraint::Length(1), // Toast / key hints
            ])
            .split(area)
    }

    /// Where the result grid goes on a screen of the given size
    pub fn results_area(screen: Rect) -> Rect {
        Self::split(screen)[1]
    }

    pub fn render(frame: &mut Frame, model: &AppModel, spinner_frame: usize) {
        let chunks = Self::split(frame.area());
        let ui_state = model.ui_state();
        let content_state = model.content_state();

        layout::render_search_bar(
            frame,
            chunks[0],
            ui_state,
            content_state.is_loading(),
            spinner_frame,
        );
        content::render_main_content(frame, chunks[1], ui_state, content_state);
        layout::render_status_bar(frame, chunks[2], ui_state);

        if let Some(dialog) = &ui_state.dialog {
            overlays::render_track_dialog(frame, dialog);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::{ResultItem, SearchError, SearchResponse, ToastKind};

    fn draw(model: &AppModel, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| AppView::render(f, model, 0)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn song(name: &str, artist: &str) -> ResultItem {
        ResultItem {
            track_name: Some(name.to_string()),
            artist_name: Some(artist.to_string()),
            preview_url: Some(format!("https://audio/{name}.m4a")),
            ..ResultItem::default()
        }
    }

    fn model_with_results(results: Vec<ResultItem>) -> AppModel {
        let mut model = AppModel::new();
        let generation = model.begin_search();
        let response = SearchResponse {
            result_count: results.len() as u32,
            results,
        };
        model.apply_search_result(generation, Ok(response), Instant::now());
        model
    }

    #[test]
    fn idle_screen_shows_help_text() {
        let screen = draw(&AppModel::new(), 80, 20);
        assert!(screen.contains("Type to search..."));
        assert!(screen.contains("Start typing to search for music."));
        assert!(!screen.contains("Results ("));
    }

    #[test]
    fn results_replace_help_text() {
        let model = model_with_results(vec![song("Yellow", "Coldplay"), song("Clocks", "Coldplay")]);
        let screen = draw(&model, 80, 20);
        assert!(screen.contains("Results (2)"));
        assert!(screen.contains("Yellow"));
        assert!(screen.contains("Clocks"));
        assert!(!screen.contains("Start typing"));
    }

    #[test]
    fn loading_keeps_previous_results_and_spins() {
        let mut model = model_with_results(vec![song("Yellow", "Coldplay")]);
        model.begin_search();
        let screen = draw(&model, 80, 20);
        assert!(screen.contains("Search ⠋"));
        assert!(screen.contains("Yellow"));
    }

    #[test]
    fn failure_shows_help_text_and_toast() {
        let mut model = model_with_results(vec![song("Yellow", "Coldplay")]);
        let generation = model.begin_search();
        model.apply_search_result(generation, Err(SearchError::EmptyBody), Instant::now());

        let screen = draw(&model, 80, 20);
        assert!(screen.contains("Start typing to search for music."));
        assert!(screen.contains("Something went wrong. Please try again."));
        assert!(!screen.contains("Yellow"));
    }

    #[test]
    fn dialog_shows_track_and_artist() {
        let mut model = model_with_results(vec![song("Yellow", "Coldplay")]);
        let item = song("Yellow", "Coldplay");
        model.open_dialog(&item);
        model.show_toast("Playing Yellow".to_string(), ToastKind::Info, Instant::now());

        let screen = draw(&model, 80, 20);
        assert!(screen.contains(" Yellow "));
        assert!(screen.contains("[ Close ]"));
        assert!(screen.contains("Playing Yellow"));
    }

    #[test]
    fn dialog_shows_album_genre_and_duration() {
        let item = ResultItem {
            collection_name: Some("Parachutes".into()),
            primary_genre_name: Some("Alternative".into()),
            track_time_millis: Some(266_773),
            ..song("Yellow", "Coldplay")
        };
        let mut model = model_with_results(vec![item.clone()]);
        model.open_dialog(&item);

        let screen = draw(&model, 80, 20);
        assert!(screen.contains("Coldplay"));
        assert!(screen.contains("Parachutes · Alternative · 4:26"));
    }

    #[test]
    fn help_popup_lists_keys() {
        let mut model = AppModel::new();
        model.toggle_help_popup();
        let screen = draw(&model, 80, 24);
        assert!(screen.contains("Help (H or Esc to close)"));
        assert!(screen.contains("Play preview"));
    }

    #[test]
    fn results_area_sits_between_bars() {
        let area = AppView::results_area(Rect::new(0, 0, 80, 20));
        assert_eq!(area, Rect::new(0, 3, 80, 16));
    }
}
