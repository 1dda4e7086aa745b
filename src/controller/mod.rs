//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives preview playback.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Debounced query submission and search responses
//! - `playback`: Player lifecycle and result selection

mod input;
mod playback;
mod search;

#[cfg(test)]
mod fakes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use crate::audio::PlayerFactory;
use crate::model::{AppModel, Debouncer, Generation, SearchError, SearchResponse, SearchService};

pub use playback::PlaybackController;

/// Events posted back to the event loop by background tasks
#[derive(Debug)]
pub enum AppEvent {
    SearchFinished {
        generation: Generation,
        result: Result<SearchResponse, SearchError>,
    },
}

pub struct AppController {
    pub(crate) model: AppModel,
    search: Arc<dyn SearchService>,
    playback: PlaybackController,
    debouncer: Debouncer<String>,
    events: UnboundedSender<AppEvent>,
}

impl AppController {
    pub fn new(
        search: Arc<dyn SearchService>,
        factory: Box<dyn PlayerFactory>,
        debounce: Duration,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            model: AppModel::new(),
            search,
            playback: PlaybackController::new(factory),
            debouncer: Debouncer::new(debounce),
            events,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.model.set_viewport(width, height);
    }

    pub fn should_quit(&self) -> bool {
        self.model.should_quit()
    }

    /// When the debouncer next needs a `tick`, if a query is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    #[cfg(test)]
    pub(crate) fn playback(&self) -> &PlaybackController {
        &self.playback
    }
}
