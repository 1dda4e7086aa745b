//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (focus, toasts, dialog, UI state)
//! - `content`: Search response types and result presenter state
//! - `grid`: Waterfall placement of result cards
//! - `debounce`: Keystroke debouncer
//! - `playback`: Playback session state
//! - `search_client`: Search API client
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod grid;
mod debounce;
mod playback;
mod search_client;
mod app_model;

pub use types::{ActiveSection, ToastKind, TrackDialog, UiState};

pub use content::{ContentState, ResultItem, SearchResponse, VisibleElement};
#[cfg(test)]
pub use content::PresenterPhase;

pub use grid::{card_title_lines, Direction, GridCard, WaterfallLayout};

pub use debounce::Debouncer;

pub use playback::{PlaybackSession, PlaybackState};

pub use search_client::{SearchClient, SearchError, SearchService};

pub use app_model::{AppModel, Generation};
#[cfg(test)]
pub use app_model::MESSAGE_NETWORK_ERROR;
