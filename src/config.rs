//! Command line configuration and application constants

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";
pub const SEARCH_DEBOUNCE_MS: u64 = 555;
pub const SPAN_COUNT_PORTRAIT: usize = 3;
pub const SPAN_COUNT_LANDSCAPE: usize = 4;
pub const TOAST_DURATION: Duration = Duration::from_secs(2);
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const LOG_DIR: &str = ".logs";

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug, Clone)]
#[command(name = "tunescout", version, about = "Search music and play preview clips from the terminal")]
pub struct Config {
    /// Base URL of the search API
    #[arg(long, env = "TUNESCOUT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Restrict results to one entity type (e.g. musicTrack)
    #[arg(long, env = "TUNESCOUT_ENTITY")]
    pub entity: Option<String>,

    /// Quiet interval after the last keystroke before a search is sent
    #[arg(long, default_value_t = SEARCH_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Directory for rolling log files
    #[arg(long, default_value = LOG_DIR)]
    pub log_dir: PathBuf,

    /// Do not open an audio device
    #[arg(long)]
    pub no_audio: bool,
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Number of grid columns for a terminal of the given size.
///
/// Terminal cells are roughly twice as tall as they are wide, so a window
/// counts as portrait when its width is less than twice its height.
pub fn span_count(width: u16, height: u16) -> usize {
    if (width as u32) < (height as u32) * 2 {
        SPAN_COUNT_PORTRAIT
    } else {
        SPAN_COUNT_LANDSCAPE
    }
}
