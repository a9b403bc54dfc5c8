//! Speaker playback via cpal.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use cpal::StreamConfig;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::info;

use super::AudioError;

struct PlaybackBuffer {
    samples: Vec<f32>,
    position: usize,
    finished: bool,
}

/// Audio playback to the default output device.
pub struct Player {
    device: cpal::Device,
}

impl Player {
    /// Create a player on the default output device.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Device("no default output device".into()))?;

        let device_name = device
            .description()
            .map(|d| d.name().to_owned())
            .unwrap_or_else(|_| "<unknown>".into());
        info!("using output device: {device_name}");

        Ok(Self { device })
    }

    /// Decode WAV bytes and play them. Blocks until playback finishes.
    pub fn play_wav(&self, wav_bytes: &[u8]) -> Result<(), AudioError> {
        let (samples, sample_rate) = decode_wav(wav_bytes)?;
        self.play(&samples, sample_rate)
    }

    /// Play mono samples at the given rate. Blocks until playback finishes.
    pub fn play(&self, samples: &[f32], sample_rate: u32) -> Result<(), AudioError> {
        let buffer = Arc::new(Mutex::new(PlaybackBuffer {
            samples: samples.to_vec(),
            position: 0,
            finished: false,
        }));
        let buffer_clone = Arc::clone(&buffer);

        let stream_config = StreamConfig {
            channels: 1,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = self
            .device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                    let mut buf = match buffer_clone.lock() {
                        Ok(b) => b,
                        Err(_) => return,
                    };

                    for sample in data.iter_mut() {
                        if buf.position < buf.samples.len() {
                            *sample = buf.samples[buf.position];
                            buf.position += 1;
                        } else {
                            *sample = 0.0;
                            buf.finished = true;
                        }
                    }
                },
                move |err| {
                    tracing::error!("audio output stream error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::Stream(format!("failed to build output stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioError::Stream(format!("failed to start output stream: {e}")))?;

        loop {
            std::thread::sleep(std::time::Duration::from_millis(10));
            let buf = buffer
                .lock()
                .map_err(|_| AudioError::Stream("playback buffer lock poisoned".into()))?;
            if buf.finished {
                break;
            }
        }

        drop(stream);
        Ok(())
    }
}

/// Decode WAV bytes to mono f32 samples plus the sample rate.
pub fn decode_wav(wav_bytes: &[u8]) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(wav_bytes))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|s| s as f32 / max)
                .collect()
        }
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
    };

    let mono = if spec.channels > 1 {
        super::recorder::to_mono(&samples, spec.channels)
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}
