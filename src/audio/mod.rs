//! Audio decoding for synthesized speech
//!
//! The speech endpoint returns raw 16-bit signed little-endian PCM at a
//! fixed 24 kHz mono rate, base64-encoded. This module decodes that payload
//! into a normalized f32 sample buffer ready for playback or WAV export.

use crate::error::{NexusError, Result};
use base64::Engine;

pub mod playback;
pub mod wav;

/// Sample rate of the speech endpoint's PCM output, fixed by the service
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// A decoded mono audio buffer with normalized f32 samples
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Samples in [-1.0, 1.0)
    pub samples: Vec<f32>,
    /// Samples per second
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Nominal duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode a base64 PCM payload into an [`AudioBuffer`]
///
/// The payload must be an even number of bytes: each sample is two bytes,
/// 16-bit signed little-endian. Samples are normalized to [-1.0, 1.0) by
/// dividing by 32768.
///
/// # Errors
///
/// Fails on invalid base64, an empty payload, or an odd byte length. Any
/// failure is terminal for the invocation; no partial buffer is produced.
///
/// # Examples
///
/// ```
/// use base64::Engine;
/// use nexus::audio::decode_pcm;
///
/// // Two samples: 0 and -32768
/// let payload = base64::engine::general_purpose::STANDARD.encode([0u8, 0, 0, 0x80]);
/// let buffer = decode_pcm(&payload).unwrap();
/// assert_eq!(buffer.samples, vec![0.0, -1.0]);
/// ```
pub fn decode_pcm(payload_base64: &str) -> Result<AudioBuffer> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload_base64)
        .map_err(|e| NexusError::Audio(format!("invalid base64 audio payload: {}", e)))?;

    if bytes.is_empty() {
        return Err(NexusError::Audio("empty audio payload".to_string()).into());
    }
    if bytes.len() % 2 != 0 {
        return Err(NexusError::Audio("malformed audio payload: odd byte length".to_string()).into());
    }

    let samples: Vec<f32> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect();

    tracing::debug!(
        "Decoded {} PCM samples ({:.2}s at {} Hz)",
        samples.len(),
        samples.len() as f32 / SPEECH_SAMPLE_RATE as f32,
        SPEECH_SAMPLE_RATE
    );

    Ok(AudioBuffer {
        samples,
        sample_rate: SPEECH_SAMPLE_RATE,
    })
}
