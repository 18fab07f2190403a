use atomic_float::AtomicF64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Song position as seen by the frame loop.
///
/// The audio thread publishes how many seconds it has rendered; between audio
/// callbacks the conductor extrapolates with the system clock.
pub struct Conductor {
    audio_time_source: Arc<AtomicF64>,
    last_audio_time: f64,
    last_update_time: f64,
    song_start: Option<f64>,
}

impl Conductor {
    pub fn new(audio_time_source: Arc<AtomicF64>) -> Self {
        Self {
            audio_time_source,
            last_audio_time: 0.0,
            last_update_time: 0.0,
            song_start: None,
        }
    }

    pub fn update(&mut self, current_system_time: f64) {
        self.last_audio_time = self.audio_time_source.load(Ordering::Acquire);
        self.last_update_time = current_system_time;
    }

    /// Audio timeline position in seconds.
    pub fn get_time(&self, current_system_time: f64) -> f64 {
        let elapsed = current_system_time - self.last_update_time;
        self.last_audio_time + elapsed
    }

    /// Marks the current audio time as the start of the song.
    pub fn start_song(&mut self, current_system_time: f64) {
        self.song_start = Some(self.get_time(current_system_time));
    }

    pub fn stop_song(&mut self) {
        self.song_start = None;
    }

    /// Seconds since [`Conductor::start_song`], if a song is playing.
    pub fn song_position(&self, current_system_time: f64) -> Option<f64> {
        self.song_start
            .map(|start| (self.get_time(current_system_time) - start).max(0.0))
    }

    /// Fraction of `duration_secs` played so far, clamped to `[0, 1]`.
    pub fn song_progress(&self, current_system_time: f64, duration_secs: f64) -> Option<f64> {
        if duration_secs <= 0.0 {
            return None;
        }
        self.song_position(current_system_time)
            .map(|pos| (pos / duration_secs).clamp(0.0, 1.0))
    }
}
