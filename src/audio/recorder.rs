//! Microphone capture via cpal.

use std::path::Path;
use std::sync::{Arc, Mutex};

use cpal::StreamConfig;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, info};

use super::AudioError;

/// Sample rate the service expects for reference audio.
pub const SERVICE_SAMPLE_RATE: u32 = 24_000;

/// Microphone recorder.
///
/// Captures at the device's native configuration and converts to 24kHz mono
/// in software before the sample is written out.
pub struct Recorder {
    device: cpal::Device,
    stream_config: StreamConfig,
}

/// An in-progress recording. Owns the input stream; there is exactly one
/// active recording per recorder, enforced by ownership.
pub struct ActiveRecording {
    stream: cpal::Stream,
    buffer: Arc<Mutex<Vec<f32>>>,
    native_rate: u32,
    native_channels: u16,
}

impl Recorder {
    /// Create a recorder on the named input device, or the default one.
    pub fn new(device_name: Option<&str>) -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = if let Some(name) = device_name {
            host.input_devices()
                .map_err(|e| AudioError::Device(format!("cannot enumerate devices: {e}")))?
                .find(|d| {
                    d.description()
                        .ok()
                        .map(|desc| desc.name() == name)
                        .unwrap_or(false)
                })
                .ok_or_else(|| AudioError::Device(format!("input device '{name}' not found")))?
        } else {
            host.default_input_device()
                .ok_or_else(|| AudioError::Device("no default input device".into()))?
        };

        let device_name = device
            .description()
            .map(|d| d.name().to_owned())
            .unwrap_or_else(|_| "<unknown>".into());
        info!("using input device: {device_name}");

        let default_config = device
            .default_input_config()
            .map_err(|e| AudioError::Device(format!("no default input config: {e}")))?;

        let stream_config = StreamConfig {
            channels: default_config.channels(),
            sample_rate: default_config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok(Self {
            device,
            stream_config,
        })
    }

    /// Start capturing. The microphone stays open until [`ActiveRecording::stop`].
    pub fn start(self) -> Result<ActiveRecording, AudioError> {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let buffer_clone = Arc::clone(&buffer);

        let native_rate = self.stream_config.sample_rate;
        let native_channels = self.stream_config.channels;

        let stream = self
            .device
            .build_input_stream(
                &self.stream_config,
                move |data: &[f32], _info: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = buffer_clone.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                move |err| {
                    tracing::error!("audio input stream error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::Stream(format!("failed to build input stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioError::Stream(format!("failed to start input stream: {e}")))?;

        info!("recording started at {native_rate}Hz, {native_channels} channels");

        Ok(ActiveRecording {
            stream,
            buffer,
            native_rate,
            native_channels,
        })
    }
}

impl ActiveRecording {
    /// Stop capturing and return the recording as 24kHz mono samples.
    pub fn stop(self) -> Result<Vec<f32>, AudioError> {
        drop(self.stream);

        let raw = self
            .buffer
            .lock()
            .map_err(|_| AudioError::Stream("capture buffer lock poisoned".into()))?
            .clone();

        debug!("captured {} raw samples", raw.len());

        let mono = if self.native_channels > 1 {
            to_mono(&raw, self.native_channels)
        } else {
            raw
        };

        let samples = if self.native_rate != SERVICE_SAMPLE_RATE {
            resample(&mono, self.native_rate, SERVICE_SAMPLE_RATE)
        } else {
            mono
        };

        Ok(samples)
    }
}

/// Write 24kHz mono samples as a 16-bit PCM WAV file.
pub fn write_wav(path: &Path, samples: &[f32]) -> Result<(), AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SERVICE_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(f32_to_i16(sample))?;
    }
    writer.finalize()?;

    Ok(())
}

/// Clamp and convert a float sample to 16-bit PCM.
pub(super) fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Convert interleaved multi-channel audio to mono by averaging channels.
pub(super) fn to_mono(data: &[f32], channels: u16) -> Vec<f32> {
    let ch = channels as usize;
    data.chunks_exact(ch)
        .map(|frame| frame.iter().sum::<f32>() / ch as f32)
        .collect()
}

/// Linear-interpolation resampler. Sufficient for speech: voice energy sits
/// well below the 12kHz Nyquist limit of the 24kHz target.
pub(super) fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    if src_rate == dst_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = src_rate as f64 / dst_rate as f64;
    let out_len = (samples.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 * ratio;
        let idx = src_pos as usize;
        let frac = src_pos - idx as f64;

        let sample = if idx + 1 < samples.len() {
            samples[idx] as f64 * (1.0 - frac) + samples[idx + 1] as f64 * frac
        } else {
            samples[idx.min(samples.len() - 1)] as f64
        };

        output.push(sample as f32);
    }

    output
}
