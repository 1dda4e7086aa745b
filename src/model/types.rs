//! Core type definitions for the application

use std::time::{Duration, Instant};

/// Which section of the UI currently has input focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Short-lived message shown at the bottom of the screen
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= lifetime
    }
}

/// Track info shown in the modal dialog after a result is selected
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackDialog {
    pub title: String,
    pub artist: String,
    /// Album, genre and duration; empty when the API sent none
    pub details: String,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub toast: Option<Toast>,
    pub dialog: Option<TrackDialog>,
    pub show_help_popup: bool,
    /// Width and height of the result grid area from the last draw
    pub grid_area: (u16, u16),
}
