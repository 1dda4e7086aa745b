use std::io::{self, Cursor};

use symphonia::{
    core::{
        audio::SampleBuffer,
        codecs::{CODEC_TYPE_NULL, Decoder as SymphoniaDecoder, DecoderOptions},
        errors::Error as SymphError,
        formats::{FormatOptions, FormatReader, SeekMode, SeekTo},
        io::MediaSourceStream,
        meta::MetadataOptions,
        probe::Hint,
        units::{Time, TimeBase},
    },
    default::{get_codecs, get_probe},
};

use super::MAX_PROBE_PACKETS;
use super::error::{AudioError, Result};

#[derive(Debug, Clone, Copy)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: usize,
}

/// Decodes an in-memory preview clip to interleaved f32 samples
pub(crate) struct PreviewDecoder {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn SymphoniaDecoder>,
    track_id: u32,
    time_base: Option<TimeBase>,
    sample_buf: Option<SampleBuffer<f32>>,
    pub info: AudioInfo,
}

impl PreviewDecoder {
    pub fn open(bytes: Vec<u8>, extension: Option<&str>) -> Result<Self> {
        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
        let probed = get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| AudioError::Decoder(e.to_string()))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::Decoder("no audio track".into()))?;

        let codec_params = track.codec_params.clone();
        let track_id = track.id;

        let mut decoder = get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Decoder(e.to_string()))?;

        let info = match (codec_params.sample_rate, codec_params.channels) {
            (Some(sample_rate), Some(channels)) => AudioInfo {
                sample_rate,
                channels: channels.count(),
            },
            _ => {
                let info = probe_spec(format.as_mut(), decoder.as_mut(), track_id)?;
                rewind(format.as_mut(), track_id);
                decoder.reset();
                info
            }
        };

        Ok(PreviewDecoder {
            format,
            decoder,
            track_id,
            time_base: codec_params.time_base,
            sample_buf: None,
            info,
        })
    }

    /// Next block of interleaved samples, `None` at end of stream.
    pub fn next_packet(&mut self) -> Result<Option<&[f32]>> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphError::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Ok(None);
                }
                Err(SymphError::DecodeError(_)) => continue,
                Err(SymphError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(AudioError::Decoder(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphError::DecodeError(_)) => continue,
                Err(e) => return Err(AudioError::Decoder(e.to_string())),
            };

            let buf = self.sample_buf.get_or_insert_with(|| {
                SampleBuffer::new(decoded.capacity() as u64, *decoded.spec())
            });
            buf.copy_interleaved_ref(decoded);

            return Ok(Some(buf.samples()));
        }
    }

    /// Seek to `secs`, returning where the stream actually landed.
    pub fn seek(&mut self, secs: f64) -> Result<f64> {
        let seeked = self
            .format
            .seek(
                SeekMode::Coarse,
                SeekTo::Time {
                    time: Time::from(secs.max(0.0)),
                    track_id: Some(self.track_id),
                },
            )
            .map_err(|e| AudioError::Seek(e.to_string()))?;

        self.decoder.reset();
        self.sample_buf = None;

        let landed = match self.time_base {
            Some(tb) => {
                let time = tb.calc_time(seeked.actual_ts);
                time.seconds as f64 + time.frac
            }
            None => seeked.actual_ts as f64 / self.info.sample_rate as f64,
        };
        Ok(landed)
    }
}

fn probe_spec(
    format: &mut dyn FormatReader,
    decoder: &mut dyn SymphoniaDecoder,
    track_id: u32,
) -> Result<AudioInfo> {
    for _ in 0..MAX_PROBE_PACKETS {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(_) => break,
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                return Ok(AudioInfo {
                    sample_rate: spec.rate,
                    channels: spec.channels.count(),
                });
            }
            Err(SymphError::DecodeError(_)) => continue,
            Err(_) => break,
        }
    }
    Err(AudioError::Decoder(
        "could not determine sample rate and channels".into(),
    ))
}

/// Seek back to the first frame after probing consumed packets.
/// An unseekable reader plays on from wherever probing stopped.
fn rewind(format: &mut dyn FormatReader, track_id: u32) -> bool {
    let to = SeekTo::Time {
        time: Time::from(0.0),
        track_id: Some(track_id),
    };
    match format.seek(SeekMode::Coarse, to) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Rewind after probing failed, clip start is lost");
            false
        }
    }
}

/// File extension of a URL path, used as a probe hint
pub(crate) fn extension_hint(url: &str) -> Option<String> {
    let path = reqwest::Url::parse(url).ok()?.path().to_string();
    let (_, ext) = path.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use symphonia::core::{
        errors::SeekErrorKind,
        formats::{Cue, Packet, SeekedTo, Track},
        meta::{Metadata, MetadataLog},
    };

    use super::*;

    /// A reader over a live stream that cannot seek
    #[derive(Default)]
    struct UnseekableReader {
        metadata: MetadataLog,
    }

    impl FormatReader for UnseekableReader {
        fn try_new(_source: MediaSourceStream, _options: &FormatOptions) -> symphonia::core::errors::Result<Self> {
            Ok(Self::default())
        }

        fn cues(&self) -> &[Cue] {
            &[]
        }

        fn metadata(&mut self) -> Metadata<'_> {
            self.metadata.metadata()
        }

        fn seek(&mut self, _mode: SeekMode, _to: SeekTo) -> symphonia::core::errors::Result<SeekedTo> {
            Err(SymphError::SeekError(SeekErrorKind::Unseekable))
        }

        fn tracks(&self) -> &[Track] {
            &[]
        }

        fn next_packet(&mut self) -> symphonia::core::errors::Result<Packet> {
            Err(SymphError::IoError(io::ErrorKind::UnexpectedEof.into()))
        }

        fn into_inner(self: Box<Self>) -> MediaSourceStream {
            MediaSourceStream::new(Box::new(Cursor::new(Vec::new())), Default::default())
        }
    }

    #[test]
    fn failed_rewind_is_reported_not_fatal() {
        let mut reader = UnseekableReader::default();
        assert!(!rewind(&mut reader, 1));
    }

    #[test]
    fn extension_from_preview_url() {
        assert_eq!(
            extension_hint("https://audio-ssl.itunes.apple.com/a/b/mzaf_123.plus.aac.p.m4a"),
            Some("m4a".to_string())
        );
        assert_eq!(extension_hint("https://example.com/clip.MP3?x=1"), Some("mp3".to_string()));
        assert_eq!(extension_hint("https://example.com/v1.2/clip"), None);
        assert_eq!(extension_hint("not a url"), None);
    }

    #[test]
    fn garbage_bytes_do_not_decode() {
        let result = PreviewDecoder::open(vec![0u8; 64], Some("m4a"));
        assert!(matches!(result, Err(AudioError::Decoder(_))));
    }
}
