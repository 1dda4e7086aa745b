//! Preview audio playback
//!
//! `MediaPlayer` is the seam the playback controller drives. `PreviewPlayer`
//! is the real engine: a decoder thread downloads and decodes the clip and
//! feeds a cpal output stream through a lock-free ring buffer.

mod decoder;
mod error;
mod player;
mod resampler;
mod state;
mod worker;

use std::time::Duration;

pub use error::AudioError;
pub use player::PreviewPlayer;

const BUFFER_MS: usize = 150;
const PENDING_CAPACITY: usize = 8192;
const MAX_PROBE_PACKETS: usize = 10;
const BACKPRESSURE_WAIT: Duration = Duration::from_millis(5);

/// A single media player instance, owned exclusively by its controller
pub trait MediaPlayer {
    /// Start playing as soon as a prepared clip is ready.
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    /// Load `url`, replacing whatever was loaded, from position zero.
    fn prepare(&mut self, url: &str) -> error::Result<()>;

    fn seek_to(&mut self, position: Duration) -> error::Result<()>;

    fn stop(&mut self);

    fn position(&self) -> Duration;

    /// True once for a prepared clip that could not be fetched or decoded.
    fn take_load_failure(&mut self) -> bool;

    /// Free the device and background resources.
    fn release(self: Box<Self>);
}

/// Builds players whenever the screen becomes visible
pub trait PlayerFactory {
    fn create(&self) -> error::Result<Box<dyn MediaPlayer>>;
}

/// Factory for the default output device, or nothing with `--no-audio`
pub struct PreviewPlayerFactory {
    enabled: bool,
}

impl PreviewPlayerFactory {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl PlayerFactory for PreviewPlayerFactory {
    fn create(&self) -> error::Result<Box<dyn MediaPlayer>> {
        if !self.enabled {
            return Err(AudioError::Disabled);
        }
        Ok(Box::new(PreviewPlayer::new()?))
    }
}
