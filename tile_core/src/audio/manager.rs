use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use atomic_float::AtomicF64;
use parking_lot::Mutex;

use crate::audio::assets::AudioClip;
use crate::audio::backend::AudioStream;
use crate::audio::mixer::{AudioMixer, MixerHandle};
use crate::gameplay::events::SoundCue;

pub const EFFECT_VOLUME: f32 = 0.7;
pub const SONG_VOLUME: f32 = 0.8;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Waiting for the first user gesture.
    Suspended,
    Running,
    /// No output device. The game runs silent.
    Unavailable,
}

/// Sound effects and background song playback on top of the mixer.
///
/// Every failure degrades to silence with a log line; nothing here stops the
/// game from running.
pub struct AudioManager {
    state: AudioState,
    sample_rate: u32,
    mixer: Arc<Mutex<AudioMixer>>,
    handle: MixerHandle,
    clock: Arc<AtomicF64>,
    stream: Option<AudioStream>,
    effects: HashMap<SoundCue, AudioClip>,
    song: Option<AudioClip>,
}

impl AudioManager {
    /// Suspended until [`AudioManager::resume`] opens the output device.
    pub fn new(sample_rate: u32) -> Self {
        Self::with_state(AudioState::Suspended, sample_rate)
    }

    /// Running without an output device. The caller renders through
    /// [`AudioManager::mixer`].
    pub fn detached(sample_rate: u32) -> Self {
        Self::with_state(AudioState::Running, sample_rate)
    }

    fn with_state(state: AudioState, sample_rate: u32) -> Self {
        let (mixer, handle) = AudioMixer::new(sample_rate);
        Self {
            state,
            sample_rate,
            mixer: Arc::new(Mutex::new(mixer)),
            handle,
            clock: Arc::new(AtomicF64::new(0.0)),
            stream: None,
            effects: HashMap::new(),
            song: None,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    /// True once gameplay may start. A missing device counts as ready.
    pub fn is_ready(&self) -> bool {
        self.state != AudioState::Suspended
    }

    /// Opens and starts the output stream. Called from the first user
    /// gesture; later calls return the settled state.
    pub fn resume(&mut self) -> AudioState {
        if self.state != AudioState::Suspended {
            return self.state;
        }
        let opened = AudioStream::new(self.mixer.clone(), self.clock.clone())
            .and_then(|stream| stream.play().map(|()| stream));
        match opened {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = AudioState::Running;
            }
            Err(err) => {
                log::warn!("audio unavailable, running silent: {err:#}");
                self.state = AudioState::Unavailable;
            }
        }
        self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Loads every cue from `dir`, skipping files that fail to decode.
    /// Returns how many were loaded.
    pub fn load_effects(&mut self, dir: impl AsRef<Path>) -> usize {
        let dir = dir.as_ref();
        for cue in SoundCue::ALL {
            let path = dir.join(cue.file_name());
            match AudioClip::from_file(&path).and_then(|c| c.resampled(self.sample_rate)) {
                Ok(clip) => {
                    self.effects.insert(cue, clip);
                }
                Err(err) => log::warn!("sound '{}' not loaded: {err:#}", cue.key()),
            }
        }
        self.effects.len()
    }

    pub fn insert_effect(&mut self, cue: SoundCue, clip: AudioClip) -> Result<()> {
        let clip = clip.resampled(self.sample_rate)?;
        self.effects.insert(cue, clip);
        Ok(())
    }

    pub fn has_effect(&self, cue: SoundCue) -> bool {
        self.effects.contains_key(&cue)
    }

    /// Plays a cue now. Unknown cues and a non-running output are ignored.
    pub fn play(&self, cue: SoundCue) {
        if self.state != AudioState::Running {
            return;
        }
        match self.effects.get(&cue) {
            Some(clip) => self.handle.play(clip.clone(), self.playback_time(), EFFECT_VOLUME),
            None => log::debug!("sound '{}' requested but not loaded", cue.key()),
        }
    }

    pub fn load_song(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let clip = AudioClip::from_file(path)?.resampled(self.sample_rate)?;
        log::info!("song loaded ({:.1}s)", clip.duration());
        self.song = Some(clip);
        Ok(())
    }

    pub fn set_song(&mut self, clip: AudioClip) -> Result<()> {
        self.song = Some(clip.resampled(self.sample_rate)?);
        Ok(())
    }

    pub fn has_song(&self) -> bool {
        self.song.is_some()
    }

    /// Stops everything and starts the loaded song from its beginning.
    /// Returns the audio time the song starts at.
    pub fn play_song(&self) -> Option<f64> {
        if self.state != AudioState::Running {
            return None;
        }
        let song = self.song.as_ref()?;
        let start = self.playback_time();
        self.handle.stop_all();
        self.handle.play(song.clone(), start, SONG_VOLUME);
        Some(start)
    }

    pub fn stop_all(&self) {
        self.handle.stop_all();
    }

    /// Seconds of audio rendered so far.
    pub fn playback_time(&self) -> f64 {
        self.clock.load(Ordering::Acquire)
    }

    pub fn mixer(&self) -> Arc<Mutex<AudioMixer>> {
        self.mixer.clone()
    }

    pub fn clock(&self) -> Arc<AtomicF64> {
        self.clock.clone()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
