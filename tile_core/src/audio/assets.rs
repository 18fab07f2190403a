use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rodio::{Decoder, Source};

/// Decoded stereo interleaved samples, cheap to clone.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Arc<Vec<f32>>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(data: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if data.len() % 2 != 0 {
            bail!("Audio data length must be even (Stereo Interleaved)");
        }
        if sample_rate == 0 {
            bail!("Audio sample rate must be non-zero");
        }
        Ok(Self {
            data: Arc::new(data),
            sample_rate,
        })
    }

    /// Builds a stereo clip from interleaved samples with any channel count.
    /// Mono is duplicated; channels past the second are dropped.
    pub fn from_interleaved(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Self> {
        let data = match channels {
            0 => bail!("Audio must have at least one channel"),
            1 => samples.iter().flat_map(|&s| [s, s]).collect(),
            2 => samples.to_vec(),
            n => samples
                .chunks_exact(n as usize)
                .flat_map(|frame| [frame[0], frame[1]])
                .collect(),
        };
        Self::new(data, sample_rate)
    }

    /// Decodes a wav, ogg or mp3 file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open audio file {}", path.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode audio file {}", path.display()))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples::<f32>().collect();
        log::debug!(
            "decoded {} ({} ch, {} Hz, {} samples)",
            path.display(),
            channels,
            sample_rate,
            samples.len()
        );
        Self::from_interleaved(&samples, channels, sample_rate)
    }

    /// Linear resample to `target_rate`. Returns a shared copy when the rate
    /// already matches.
    pub fn resampled(&self, target_rate: u32) -> Result<Self> {
        if target_rate == self.sample_rate {
            return Ok(self.clone());
        }
        if target_rate == 0 {
            bail!("Audio sample rate must be non-zero");
        }

        let src_frames = self.frame_count();
        let dst_frames =
            (src_frames as u64 * target_rate as u64 / self.sample_rate as u64) as usize;
        let step = self.sample_rate as f64 / target_rate as f64;
        let mut out = Vec::with_capacity(dst_frames * 2);

        for i in 0..dst_frames {
            let pos = i as f64 * step;
            let idx = pos.floor() as usize;
            let frac = (pos - idx as f64) as f32;
            let next = (idx + 1).min(src_frames.saturating_sub(1));
            for ch in 0..2 {
                let a = self.data[idx * 2 + ch];
                let b = self.data[next * 2 + ch];
                out.push(a + (b - a) * frac);
            }
        }
        Self::new(out, target_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / 2
    }

    pub fn duration(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    pub fn data(&self) -> &Arc<Vec<f32>> {
        &self.data
    }
}
