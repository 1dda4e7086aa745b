use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use cpal::{
    Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use crossbeam::channel;

use super::error::{AudioError, Result};
use super::state::SharedState;
use super::worker::{self, PlayerCommand};
use super::{BUFFER_MS, MediaPlayer};

/// Streams preview clips over HTTP to the default output device.
pub struct PreviewPlayer {
    state: Arc<SharedState>,
    commands: channel::Sender<PlayerCommand>,
    sps: f64,
    last_prepare: u64,
    _stream: Stream,
    _decoder_thread: JoinHandle<()>,
}

impl PreviewPlayer {
    /// Open the default output device with its default config
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Output("no output device found".into()))?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Output(e.to_string()))?;

        let output_rate = config.sample_rate().0;
        let output_channels = config.channels() as usize;
        let stream_config: StreamConfig = config.into();

        let buffer_size = (output_rate as usize * output_channels * BUFFER_MS) / 1000;
        let (producer, mut consumer) = rtrb::RingBuffer::new(buffer_size);

        let state = Arc::new(SharedState::default());
        let callback_state = Arc::clone(&state);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !callback_state.is_active() {
                        while consumer.pop().is_ok() {}
                        data.fill(0.0);
                        return;
                    }
                    if callback_state.is_paused() {
                        data.fill(0.0);
                        return;
                    }

                    let mut consumed = 0u64;
                    for sample in data.iter_mut() {
                        match consumer.pop() {
                            Ok(s) => {
                                *sample = s;
                                consumed += 1;
                            }
                            Err(_) => *sample = 0.0,
                        }
                    }
                    if consumed > 0 {
                        callback_state.add_samples(consumed);
                    }
                },
                |e| tracing::error!(error = %e, "Audio output stream error"),
                None,
            )
            .map_err(|e| AudioError::Output(e.to_string()))?;

        let (tx, rx) = channel::unbounded();
        let decoder_thread =
            worker::spawn(rx, producer, Arc::clone(&state), output_rate, output_channels);

        stream.play().map_err(|e| AudioError::Output(e.to_string()))?;

        tracing::info!(output_rate, output_channels, "Preview player initialized");

        Ok(Self {
            state,
            commands: tx,
            sps: output_rate as f64 * output_channels as f64,
            last_prepare: 0,
            _stream: stream,
            _decoder_thread: decoder_thread,
        })
    }

    fn send(&self, cmd: PlayerCommand) -> Result<()> {
        self.commands.send(cmd).map_err(|_| AudioError::ChannelClosed)
    }
}

impl MediaPlayer for PreviewPlayer {
    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.state.set_paused(!play_when_ready);
    }

    fn prepare(&mut self, url: &str) -> Result<()> {
        self.state.reset_samples();
        self.last_prepare += 1;
        self.send(PlayerCommand::Prepare {
            url: url.to_string(),
            id: self.last_prepare,
        })
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.send(PlayerCommand::Seek(position))
    }

    fn stop(&mut self) {
        // Silence right away; the decoder thread catches up on its own
        self.state.set_active(false);
        if let Err(e) = self.send(PlayerCommand::Stop) {
            tracing::warn!(error = %e, "Failed to stop preview player");
        }
    }

    fn position(&self) -> Duration {
        Duration::from_secs_f64(self.state.get_samples() as f64 / self.sps)
    }

    fn take_load_failure(&mut self) -> bool {
        // Only the latest clip counts; older failures were superseded
        self.state.take_failed_load(self.last_prepare)
    }

    fn release(self: Box<Self>) {
        tracing::debug!("Releasing preview player");
        drop(self);
    }
}

impl Drop for PreviewPlayer {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
    }
}
