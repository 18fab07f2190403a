use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use atomic_float::AtomicF64;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{OutputCallbackInfo, Stream, StreamConfig};

use crate::audio::mixer::AudioMixer;

/// Owns the cpal output stream. Dropping it stops playback.
pub struct AudioStream {
    stream: Stream,
}

impl AudioStream {
    /// Opens the default output device as stereo at the mixer's sample rate.
    /// `clock` receives the number of seconds rendered so far.
    pub fn new(mixer: Arc<parking_lot::Mutex<AudioMixer>>, clock: Arc<AtomicF64>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default output device available"))?;

        let sample_rate = mixer.lock().sample_rate();
        let config = StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let callback_clock = clock.clone();
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &OutputCallbackInfo| {
                // The mixer accumulates, so start from silence.
                data.fill(0.0);

                let current_time = callback_clock.load(Ordering::Acquire);
                mixer.lock().process_buffer(data, current_time);

                let written_frames = (data.len() / 2) as f64;
                callback_clock.store(
                    current_time + written_frames / sample_rate as f64,
                    Ordering::Release,
                );
            },
            |err| log::error!("audio output error: {err}"),
            None,
        )?;

        log::info!("audio output opened at {sample_rate} Hz");
        Ok(Self { stream })
    }

    pub fn play(&self) -> Result<()> {
        self.stream.play()?;
        Ok(())
    }
}
