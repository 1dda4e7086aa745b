/// Streaming linear-interpolation resampler for interleaved audio.
///
/// Keeps the tail of the previous block so interpolation is continuous
/// across packet boundaries.
pub(crate) struct LinearResampler {
    ratio: f64,
    channels: usize,
    pos: f64,
    buffer: Vec<f32>,
    frame: Vec<f32>,
}

impl LinearResampler {
    pub fn new(input_rate: u32, output_rate: u32, channels: usize) -> Self {
        let channels = channels.max(1);
        LinearResampler {
            ratio: input_rate as f64 / output_rate.max(1) as f64,
            channels,
            pos: 0.0,
            buffer: Vec::new(),
            frame: vec![0.0; channels],
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.ratio == 1.0
    }

    pub fn reset(&mut self) {
        self.pos = 0.0;
        self.buffer.clear();
    }

    pub fn process(&mut self, input: &[f32], mut emit: impl FnMut(&[f32])) {
        let ch = self.channels;
        if self.is_passthrough() {
            for frame in input.chunks_exact(ch) {
                emit(frame);
            }
            return;
        }

        self.buffer.extend_from_slice(input);
        let frames = self.buffer.len() / ch;

        while self.pos + 1.0 < frames as f64 {
            let i = self.pos as usize;
            let frac = (self.pos - i as f64) as f32;
            for c in 0..ch {
                let a = self.buffer[i * ch + c];
                let b = self.buffer[(i + 1) * ch + c];
                self.frame[c] = a + (b - a) * frac;
            }
            emit(&self.frame);
            self.pos += self.ratio;
        }

        let keep_from = (self.pos as usize).min(frames.saturating_sub(1));
        self.buffer.drain(..keep_from * ch);
        self.pos -= keep_from as f64;
    }
}
