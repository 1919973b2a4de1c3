//! Audio playback to system speakers via cpal.

use crate::audio::AudioBuffer;
use crate::error::{NexusError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Play a decoded buffer through the default output device
///
/// Opens a mono f32 output stream at the buffer's sample rate and blocks
/// until every sample has been handed to the device, then briefly lingers
/// so the device can drain its own buffer.
///
/// # Errors
///
/// Returns an audio error when no output device is available or the stream
/// cannot be created or started.
pub fn play(buffer: &AudioBuffer) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| NexusError::Audio("no default output device".to_string()))?;

    let stream_config = StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(buffer.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let state = Arc::new(PlaybackState {
        inner: Mutex::new(PlaybackCursor {
            samples: buffer.samples.clone(),
            position: 0,
            finished: false,
        }),
        done: Condvar::new(),
    });
    let state_cb = Arc::clone(&state);

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                let mut cursor = match state_cb.inner.lock() {
                    Ok(c) => c,
                    Err(_) => return,
                };
                for slot in data.iter_mut() {
                    if cursor.position < cursor.samples.len() {
                        *slot = cursor.samples[cursor.position];
                        cursor.position += 1;
                    } else {
                        *slot = 0.0;
                        cursor.finished = true;
                    }
                }
                if cursor.finished {
                    state_cb.done.notify_all();
                }
            },
            move |err| {
                tracing::error!("playback stream error: {}", err);
            },
            None,
        )
        .map_err(|e| NexusError::Audio(format!("cannot build output stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| NexusError::Audio(format!("cannot start playback: {}", e)))?;

    // Wait until the callback has consumed the whole buffer, with a ceiling
    // of the nominal duration plus a grace period in case the device stalls.
    let timeout = Duration::from_secs_f32(buffer.duration() + 2.0);
    let cursor = state
        .inner
        .lock()
        .map_err(|_| NexusError::Audio("playback state poisoned".to_string()))?;
    let (_cursor, wait_result) = state
        .done
        .wait_timeout_while(cursor, timeout, |c| !c.finished)
        .map_err(|_| NexusError::Audio("playback state poisoned".to_string()))?;
    if wait_result.timed_out() {
        tracing::warn!("playback did not finish within {:?}", timeout);
    }

    // Let the device drain what it already buffered.
    std::thread::sleep(Duration::from_millis(150));
    Ok(())
}

struct PlaybackState {
    inner: Mutex<PlaybackCursor>,
    done: Condvar,
}

struct PlaybackCursor {
    samples: Vec<f32>,
    position: usize,
    finished: bool,
}
