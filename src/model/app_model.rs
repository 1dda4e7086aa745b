//! Main application model with state management

use std::time::Instant;

use super::content::{ContentState, PresenterPhase, ResultItem, SearchResponse};
use super::grid::{Direction, WaterfallLayout};
use super::search_client::{ErrorKind, SearchError};
use super::types::{ActiveSection, Toast, ToastKind, TrackDialog, UiState};
use crate::config::{span_count, TOAST_DURATION};

pub const MESSAGE_NETWORK_ERROR: &str = "Network error. Check your connection.";
pub const MESSAGE_GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Tags each issued search so late responses can be told apart from current ones
pub type Generation = u64;

/// Main application model containing all UI state.
///
/// Owned by the event loop; nothing else mutates it.
#[derive(Debug, Default)]
pub struct AppModel {
    ui_state: UiState,
    content_state: ContentState,
    generation: Generation,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn content_state(&self) -> &ContentState {
        &self.content_state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Focus & search box
    // ========================================================================

    pub fn active_section(&self) -> ActiveSection {
        self.ui_state.active_section
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn search_query(&self) -> &str {
        &self.ui_state.search_query
    }

    pub fn append_to_search(&mut self, c: char) {
        self.ui_state.search_query.push(c);
    }

    /// Returns false when there was nothing to delete.
    pub fn backspace_search(&mut self) -> bool {
        self.ui_state.search_query.pop().is_some()
    }

    /// Returns false when the query was already empty.
    pub fn clear_search(&mut self) -> bool {
        let had_text = !self.ui_state.search_query.is_empty();
        self.ui_state.search_query.clear();
        had_text
    }

    // ========================================================================
    // Result presenter
    // ========================================================================

    /// Mark a new request as in flight and return its generation.
    pub fn begin_search(&mut self) -> Generation {
        self.generation += 1;
        self.content_state.phase = PresenterPhase::Loading;
        self.generation
    }

    /// Handle an empty effective query: no request, nothing displayed.
    ///
    /// Also invalidates any request still in flight.
    pub fn clear_results(&mut self) {
        self.generation += 1;
        self.content_state = ContentState::default();
    }

    /// Apply a finished search. Returns false if the response was superseded.
    pub fn apply_search_result(
        &mut self,
        generation: Generation,
        result: Result<SearchResponse, SearchError>,
        now: Instant,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Dropping superseded search response");
            return false;
        }

        match result {
            Ok(response) => self.set_search_results(response.results),
            Err(e) => {
                let message = match e.kind() {
                    ErrorKind::Network => MESSAGE_NETWORK_ERROR,
                    ErrorKind::Generic => MESSAGE_GENERIC_ERROR,
                };
                self.content_state.phase = PresenterPhase::Error;
                self.content_state.results.clear();
                self.content_state.selected_index = 0;
                self.show_toast(message.to_string(), ToastKind::Error, now);
            }
        }
        true
    }

    fn set_search_results(&mut self, results: Vec<ResultItem>) {
        let has_results = !results.is_empty();
        self.content_state = ContentState {
            phase: if has_results {
                PresenterPhase::Results
            } else {
                PresenterPhase::Empty
            },
            results,
            selected_index: 0,
        };
        if has_results {
            self.ui_state.active_section = ActiveSection::Results;
        }
    }

    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.content_state.selected_item()
    }

    // ========================================================================
    // Grid navigation
    // ========================================================================

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.ui_state.grid_area = (width, height);
    }

    /// Layout of the current results for the last known viewport
    pub fn waterfall(&self) -> WaterfallLayout {
        let (width, height) = self.ui_state.grid_area;
        WaterfallLayout::new(
            &self.content_state.results,
            width.saturating_sub(2),
            span_count(width, height),
        )
    }

    pub fn move_selection(&mut self, direction: Direction) {
        if self.content_state.results.is_empty() {
            return;
        }
        let layout = self.waterfall();
        self.content_state.selected_index = layout.neighbor(self.content_state.selected_index, direction);
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn show_toast(&mut self, message: String, kind: ToastKind, now: Instant) {
        self.ui_state.toast = Some(Toast {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn auto_clear_expired_toast(&mut self, now: Instant) {
        if self
            .ui_state
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(now, TOAST_DURATION))
        {
            self.ui_state.toast = None;
        }
    }

    pub fn open_dialog(&mut self, item: &ResultItem) {
        self.ui_state.dialog = Some(TrackDialog {
            title: item.title().to_string(),
            artist: item.artist().to_string(),
            details: item.details(),
        });
    }

    /// Returns true if a dialog was open.
    pub fn close_dialog(&mut self) -> bool {
        self.ui_state.dialog.take().is_some()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.ui_state.dialog.is_some()
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }
}
