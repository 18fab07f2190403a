use crate::audio::assets::AudioClip;
use crossbeam_channel::{unbounded, Receiver, Sender};

struct Voice {
    clip: AudioClip,
    start_time: f64,
    volume: f32,
}

pub enum MixerCommand {
    Play {
        clip: AudioClip,
        start_time: f64,
        volume: f32,
    },
    StopAll,
}

/// Sums scheduled voices into the output buffer. Lives on the audio thread;
/// everything else talks to it through a [`MixerHandle`].
pub struct AudioMixer {
    sample_rate: u32,
    voices: Vec<Voice>,
    command_rx: Receiver<MixerCommand>,
}

#[derive(Clone)]
pub struct MixerHandle {
    command_tx: Sender<MixerCommand>,
}

impl MixerHandle {
    pub fn play(&self, clip: AudioClip, start_time: f64, volume: f32) {
        let _ = self
            .command_tx
            .send(MixerCommand::Play { clip, start_time, volume });
    }

    pub fn stop_all(&self) {
        let _ = self.command_tx.send(MixerCommand::StopAll);
    }
}

impl AudioMixer {
    pub fn new(sample_rate: u32) -> (Self, MixerHandle) {
        let (tx, rx) = unbounded();
        (
            Self {
                sample_rate,
                voices: Vec::new(),
                command_rx: rx,
            },
            MixerHandle { command_tx: tx },
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Adds every voice audible in `buffer` (stereo interleaved), where the
    /// first frame sits at `current_time` seconds.
    pub fn process_buffer(&mut self, buffer: &mut [f32], current_time: f64) {
        while let Ok(cmd) = self.command_rx.try_recv() {
            match cmd {
                MixerCommand::Play {
                    clip,
                    start_time,
                    volume,
                } => self.voices.push(Voice {
                    clip,
                    start_time,
                    volume,
                }),
                MixerCommand::StopAll => self.voices.clear(),
            }
        }

        let buffer_end_frame = (buffer.len() / 2) as isize;

        for voice in &self.voices {
            let clip_data = voice.clip.data();
            let clip_frames = voice.clip.frame_count() as isize;
            // Positive when the voice started before this buffer.
            let start_frame_offset = self.frame_offset(voice, current_time);

            let start_i = (-start_frame_offset).max(0);
            let end_i = (clip_frames - start_frame_offset).min(buffer_end_frame);

            for i in start_i..end_i {
                let buf_idx = i as usize * 2;
                let voice_idx = (start_frame_offset + i) as usize * 2;
                buffer[buf_idx] += clip_data[voice_idx] * voice.volume;
                buffer[buf_idx + 1] += clip_data[voice_idx + 1] * voice.volume;
            }
        }

        let buffer_end_time = current_time + buffer_end_frame as f64 / self.sample_rate as f64;
        self.voices.retain(|v| {
            let offset = ((buffer_end_time - v.start_time) * self.sample_rate as f64).round();
            (offset as isize) < v.clip.frame_count() as isize
        });
    }

    fn frame_offset(&self, voice: &Voice, current_time: f64) -> isize {
        ((current_time - voice.start_time) * self.sample_rate as f64).round() as isize
    }
}
