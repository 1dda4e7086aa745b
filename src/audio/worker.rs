use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError};
use rtrb::Producer;

use super::decoder::{PreviewDecoder, extension_hint};
use super::error::{AudioError, Result};
use super::resampler::LinearResampler;
use super::state::SharedState;
use super::{BACKPRESSURE_WAIT, PENDING_CAPACITY};
use crate::config::USER_AGENT;

pub(crate) enum PlayerCommand {
    Prepare { url: String, id: u64 },
    Seek(Duration),
    Stop,
    Shutdown,
}

struct PlayerWorker {
    rx: Receiver<PlayerCommand>,
    producer: Producer<f32>,
    state: Arc<SharedState>,
    http: reqwest::blocking::Client,
    output_rate: u32,
    output_channels: usize,

    current: Option<PreviewDecoder>,
    resampler: Option<LinearResampler>,
    pending: VecDeque<f32>,
}

pub(crate) fn spawn(
    rx: Receiver<PlayerCommand>,
    producer: Producer<f32>,
    state: Arc<SharedState>,
    output_rate: u32,
    output_channels: usize,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // The blocking client owns a runtime, so it has to live on this thread
        let http = match reqwest::blocking::Client::builder().user_agent(USER_AGENT).build() {
            Ok(http) => http,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build preview HTTP client");
                return;
            }
        };
        let mut worker = PlayerWorker {
            rx,
            producer,
            state,
            http,
            output_rate,
            output_channels,
            current: None,
            resampler: None,
            pending: VecDeque::with_capacity(PENDING_CAPACITY),
        };
        match worker.run() {
            Ok(()) => tracing::debug!("Preview decoder thread stopped"),
            Err(e) => tracing::error!(error = %e, "Preview decoder thread failed"),
        }
    })
}

impl PlayerWorker {
    fn run(&mut self) -> Result<()> {
        loop {
            let keep_running = if self.current.is_some() || !self.pending.is_empty() {
                self.poll_commands()? && self.decode_step()?
            } else {
                match self.rx.recv() {
                    Ok(cmd) => self.handle_command(cmd)?,
                    Err(_) => return Err(AudioError::ChannelClosed),
                }
            };
            if !keep_running {
                return Ok(());
            }
        }
    }

    /// Returns false on shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> Result<bool> {
        match cmd {
            PlayerCommand::Prepare { url, id } => self.handle_prepare(url, id),
            PlayerCommand::Seek(position) => self.handle_seek(position),
            PlayerCommand::Stop => self.stop_playback(),
            PlayerCommand::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    fn poll_commands(&mut self) -> Result<bool> {
        while let Ok(cmd) = self.rx.try_recv() {
            if !self.handle_command(cmd)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ==========================
    //     Decode functions
    // ==========================

    fn decode_step(&mut self) -> Result<bool> {
        self.flush_pending();
        if !self.pending.is_empty() {
            // Ring buffer full: wait for the device, but stay responsive
            return match self.rx.recv_timeout(BACKPRESSURE_WAIT) {
                Ok(cmd) => self.handle_command(cmd),
                Err(RecvTimeoutError::Timeout) => Ok(true),
                Err(RecvTimeoutError::Disconnected) => Err(AudioError::ChannelClosed),
            };
        }

        let Some(decoder) = self.current.as_mut() else {
            return Ok(true);
        };

        let packet = match decoder.next_packet() {
            Ok(p) => p.map(|s| s.to_vec()),
            Err(e) => {
                tracing::warn!(error = %e, "Preview decode failed, stopping clip");
                None
            }
        };

        match packet {
            Some(samples) => self.process_samples(&samples),
            None => {
                tracing::debug!("Preview clip finished");
                self.current = None;
            }
        }
        Ok(true)
    }

    fn process_samples(&mut self, samples: &[f32]) {
        let input_channels = match &self.current {
            Some(d) => d.info.channels,
            None => return,
        };
        let output_channels = self.output_channels;
        let pending = &mut self.pending;

        let mut push_frame = |frame: &[f32]| {
            for out_ch in 0..output_channels {
                pending.push_back(get_mapped_sample(frame, out_ch, input_channels));
            }
        };

        match self.resampler.as_mut() {
            Some(r) => r.process(samples, push_frame),
            None => {
                for frame in samples.chunks_exact(input_channels.max(1)) {
                    push_frame(frame);
                }
            }
        }
        self.flush_pending();
    }

    fn flush_pending(&mut self) {
        while let Some(&sample) = self.pending.front() {
            if self.producer.push(sample).is_err() {
                break;
            }
            self.pending.pop_front();
        }
    }

    // ==========================
    //     Playback commands
    // ==========================

    fn handle_prepare(&mut self, url: String, id: u64) {
        self.stop_playback();
        tracing::info!(url = %url, "Preparing preview");

        let decoder = self
            .fetch(&url)
            .and_then(|bytes| PreviewDecoder::open(bytes, extension_hint(&url).as_deref()));

        match decoder {
            Ok(decoder) => {
                let info = decoder.info;
                tracing::debug!(
                    sample_rate = info.sample_rate,
                    channels = info.channels,
                    output_rate = self.output_rate,
                    "Preview opened"
                );
                let resampler = LinearResampler::new(info.sample_rate, self.output_rate, info.channels);
                self.resampler = (!resampler.is_passthrough()).then_some(resampler);
                self.current = Some(decoder);
                self.state.reset_samples();
                self.state.set_active(true);
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to open preview");
                self.state.set_active(false);
                self.state.set_failed_load(id);
            }
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |e: reqwest::Error| AudioError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let response = self
            .http
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;
        let bytes = response.bytes().map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }

    fn handle_seek(&mut self, position: Duration) {
        let Some(decoder) = self.current.as_mut() else {
            return;
        };

        match decoder.seek(position.as_secs_f64()) {
            Ok(landed) => {
                self.pending.clear();
                if let Some(r) = self.resampler.as_mut() {
                    r.reset();
                }
                let output_samples =
                    (landed * self.output_rate as f64 * self.output_channels as f64) as u64;
                self.state.set_samples(output_samples);
                tracing::debug!(requested = ?position, landed, "Preview seeked");
            }
            Err(e) => tracing::warn!(error = %e, "Preview seek failed"),
        }
    }

    fn stop_playback(&mut self) {
        self.state.set_active(false);
        self.state.reset_samples();
        self.current = None;
        self.resampler = None;
        self.pending.clear();
    }
}

/// Sample for output channel `out_ch` from one interleaved input frame.
/// Mono is duplicated to every output channel; missing channels are silent.
#[inline]
fn get_mapped_sample(frame: &[f32], out_ch: usize, input_channels: usize) -> f32 {
    if out_ch < input_channels {
        frame[out_ch]
    } else if input_channels == 1 {
        frame[0]
    } else {
        0.0
    }
}
