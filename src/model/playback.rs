//! Playback session state

use std::time::Duration;

/// What the playback controller believes should be playing
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing { url: String, position: Duration },
}

/// The single per-screen playback session
#[derive(Clone, Debug, Default)]
pub struct PlaybackSession {
    pub state: PlaybackState,
}

impl PlaybackSession {
    pub fn current_url(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::Playing { url, .. } => Some(url),
            PlaybackState::Idle => None,
        }
    }

    pub fn start(&mut self, url: String) {
        self.state = PlaybackState::Playing {
            url,
            position: Duration::ZERO,
        };
    }

    pub fn save_position(&mut self, new_position: Duration) {
        if let PlaybackState::Playing { position, .. } = &mut self.state {
            *position = new_position;
        }
    }

    pub fn clear(&mut self) {
        self.state = PlaybackState::Idle;
    }
}
