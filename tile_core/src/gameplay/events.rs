use serde::Serialize;
use tile_schema::TileType;

use super::effects::EffectKind;
use super::tile::TileId;
use super::words::LetterId;

/// Score state handed to the HUD after every score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSnapshot {
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
    /// Percentage, rounded to the nearest integer.
    pub accuracy: u32,
}

/// Word progress handed to the HUD after every collected letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterSnapshot {
    pub collected: Vec<char>,
    pub target: String,
}

impl LetterSnapshot {
    /// Whether the HUD should light up slot `index` of the target word.
    ///
    /// Slots are filled left to right per character, so with two `E`s in the
    /// target and one collected only the first `E` slot is lit.
    pub fn slot_filled(&self, index: usize) -> bool {
        let chars: Vec<char> = self.target.chars().collect();
        let Some(&c) = chars.get(index) else {
            return false;
        };
        let rank = chars[..index].iter().filter(|&&x| x == c).count();
        self.collected.iter().filter(|&&x| x == c).count() > rank
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub song_id: Option<String>,
    pub final_score: i64,
    pub max_combo: u32,
    pub accuracy: u32,
    pub hits: u32,
    pub attempts: u32,
    pub words_completed: u32,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoundCue {
    TileHit,
    FireEffect,
    IceEffect,
    WordComplete,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::TileHit,
        SoundCue::FireEffect,
        SoundCue::IceEffect,
        SoundCue::WordComplete,
        SoundCue::GameOver,
    ];

    /// Asset key; sound files are looked up as `<key>.wav`.
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::TileHit => "tile-hit",
            SoundCue::FireEffect => "fire-effect",
            SoundCue::IceEffect => "ice-effect",
            SoundCue::WordComplete => "word-complete",
            SoundCue::GameOver => "game-over",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::TileHit => "tile-hit.wav",
            SoundCue::FireEffect => "fire.wav",
            SoundCue::IceEffect => "ice.wav",
            SoundCue::WordComplete => "word-complete.wav",
            SoundCue::GameOver => "game-over.wav",
        }
    }
}

/// Everything a session reports back to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SongRequested { song_id: Option<String> },
    TileSpawned { id: TileId, kind: TileType, lane: usize },
    TileHit { id: TileId, kind: TileType },
    TileExpired { id: TileId },
    TileMissed { id: TileId },
    LetterSpawned { id: LetterId, character: char },
    LetterCollected { id: LetterId, character: char },
    WordCompleted { word: String },
    ScoreUpdated(ScoreSnapshot),
    LettersUpdated(LetterSnapshot),
    EffectStarted { effect: EffectKind, duration_ms: u64, restarted: bool },
    EffectEnded { effect: EffectKind },
    /// A special tile whose effect has no gameplay behaviour yet.
    EffectTriggered { kind: TileType },
    SpeedIncreased { speed: f32 },
    SoundRequested(SoundCue),
    GameEnded(GameSummary),
}
