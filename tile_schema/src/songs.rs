use serde::{Deserialize, Serialize};

use crate::{Millis, TileType};

/// A single scheduled tile in a song's timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeatPattern {
    pub time_ms: Millis,
    pub lane: u8,
    #[serde(rename = "type")]
    pub kind: TileType,
    /// Hold length; unused by tap tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<Millis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub duration_ms: Millis,
    pub bpm: f64,
    pub difficulty: Difficulty,
    pub audio_path: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub beat_map: Vec<BeatPattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongLibrary {
    pub songs: Vec<Song>,
}

impl SongLibrary {
    pub fn find(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    /// `None` keeps every song (the picker's "All" filter).
    pub fn by_difficulty(&self, filter: Option<Difficulty>) -> impl Iterator<Item = &Song> {
        self.songs
            .iter()
            .filter(move |s| filter.map_or(true, |d| s.difficulty == d))
    }
}

impl Default for SongLibrary {
    fn default() -> Self {
        Self {
            songs: vec![
                Song {
                    id: "shape-of-you".to_string(),
                    title: "Shape of You".to_string(),
                    artist: "Ed Sheeran".to_string(),
                    duration_ms: 240_000,
                    bpm: 96.0,
                    difficulty: Difficulty::Medium,
                    audio_path: "audio/songs/shape-of-you.mp3".to_string(),
                    cover_image: "images/covers/shape-of-you.jpg".to_string(),
                    beat_map: vec![],
                },
                Song {
                    id: "despacito".to_string(),
                    title: "Despacito".to_string(),
                    artist: "Luis Fonsi".to_string(),
                    duration_ms: 229_000,
                    bpm: 89.0,
                    difficulty: Difficulty::Easy,
                    audio_path: "audio/songs/despacito.mp3".to_string(),
                    cover_image: "images/covers/despacito.jpg".to_string(),
                    beat_map: vec![],
                },
            ],
        }
    }
}
