//! WAV export of decoded audio buffers.

use crate::audio::AudioBuffer;
use crate::error::{NexusError, Result};
use std::path::Path;

/// Write a buffer to disk as a 16-bit mono WAV file
///
/// Samples are scaled back to 16-bit integers and clamped to the valid
/// range, so a buffer round-trips through the decoder's normalization
/// without wrapping.
pub fn write_wav<P: AsRef<Path>>(buffer: &AudioBuffer, path: P) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)
        .map_err(|e| NexusError::Audio(format!("cannot create WAV file: {}", e)))?;

    for sample in &buffer.samples {
        let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| NexusError::Audio(format!("cannot write WAV sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| NexusError::Audio(format!("cannot finalize WAV file: {}", e)))?;

    tracing::debug!(
        "Wrote {} samples to {}",
        buffer.samples.len(),
        path.as_ref().display()
    );
    Ok(())
}
