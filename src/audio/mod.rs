//! Audio capture and playback.
//!
//! Capture happens at the device's native configuration and is converted to
//! the service's 24kHz mono WAV format in software. Playback decodes the
//! WAV bytes returned by the download endpoint.

mod player;
mod recorder;

pub use player::{Player, decode_wav};
pub use recorder::{ActiveRecording, Recorder, SERVICE_SAMPLE_RATE, write_wav};

use thiserror::Error;

/// Errors that can occur during audio capture or playback.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio device error: {0}")]
    Device(String),

    #[error("Audio stream error: {0}")]
    Stream(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
