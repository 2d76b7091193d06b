//! WAV container probing.
//!
//! Extracts acoustic parameters from the container header without
//! decoding any audio. A corrupt or unsupported file degrades to an empty
//! probe; the file is treated as present but metadata-less.

use std::path::Path;

use chrono::NaiveDateTime;
use hound::WavReader;
use tracing::debug;

use crate::discovery::file_mtime;

/// Standard RIFF/WAVE header size, subtracted when estimating duration
/// from file size.
const WAV_HEADER_BYTES: u64 = 44;

/// Container-level metadata read from one WAV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WavProbe {
    pub sample_rate: Option<i64>,
    pub duration_seconds: Option<f64>,
    pub bit_depth: Option<i64>,
    pub channels: Option<u16>,
    /// File modification time, the fallback recording timestamp.
    pub timestamp: Option<NaiveDateTime>,
}

impl WavProbe {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Probe a WAV file for sample rate, duration, bit depth and channels.
///
/// Duration comes from the frame count when the header carries one;
/// otherwise it is estimated from the file size and frame geometry. Any
/// failure to open or parse yields an empty probe, never an error.
pub fn probe_wav(path: &Path) -> WavProbe {
    let reader = match WavReader::open(path) {
        Ok(reader) => reader,
        Err(error) => {
            debug!(path = %path.display(), %error, "wav probe failed");
            return WavProbe::default();
        }
    };

    let spec = reader.spec();
    let frames = u64::from(reader.duration());
    let sample_rate = i64::from(spec.sample_rate);
    let bytes_per_sample = u64::from(spec.bits_per_sample / 8);

    let duration_seconds = if sample_rate > 0 && frames > 0 {
        Some(frames as f64 / sample_rate as f64)
    } else {
        estimate_duration_from_size(path, bytes_per_sample, spec.channels, sample_rate)
    };

    WavProbe {
        sample_rate: (sample_rate > 0).then_some(sample_rate),
        duration_seconds,
        bit_depth: (spec.bits_per_sample > 0).then_some(i64::from(spec.bits_per_sample)),
        channels: Some(spec.channels),
        timestamp: file_mtime(path),
    }
}

/// `(file_size - header) / (sample_width × channels) / sample_rate`,
/// for containers whose frame count is absent or zero.
fn estimate_duration_from_size(
    path: &Path,
    bytes_per_sample: u64,
    channels: u16,
    sample_rate: i64,
) -> Option<f64> {
    if sample_rate <= 0 {
        return None;
    }
    let size = std::fs::metadata(path).ok()?.len();
    let data_bytes = size.saturating_sub(WAV_HEADER_BYTES);
    let bytes_per_frame = (bytes_per_sample * u64::from(channels)).max(1);
    let frames = data_bytes as f64 / bytes_per_frame as f64;
    Some(frames / sample_rate as f64)
}
