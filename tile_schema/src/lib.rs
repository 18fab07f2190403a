use serde::{Deserialize, Serialize};

mod session;
mod songs;

pub use session::SessionConfig;
pub use songs::{BeatPattern, Difficulty, Song, SongLibrary};

pub type Millis = u64;

/// Version written by and accepted for [`TileTable`] files.
pub const TILE_TABLE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Normal,
    Fire,
    Ice,
    Teleport,
    Hint,
    Shuffle,
    Freeze,
    Swap,
}

impl TileType {
    /// Fixed enumeration order. Weighted sampling walks the table in this order.
    pub const ALL: [TileType; 8] = [
        TileType::Normal,
        TileType::Fire,
        TileType::Ice,
        TileType::Teleport,
        TileType::Hint,
        TileType::Shuffle,
        TileType::Freeze,
        TileType::Swap,
    ];

    pub fn is_default(self) -> bool {
        self == TileType::Normal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Normal => "normal",
            TileType::Fire => "fire",
            TileType::Ice => "ice",
            TileType::Teleport => "teleport",
            TileType::Hint => "hint",
            TileType::Shuffle => "shuffle",
            TileType::Freeze => "freeze",
            TileType::Swap => "swap",
        }
    }

    /// Tile types whose effect needs a duration to be meaningful.
    pub fn is_timed(self) -> bool {
        matches!(self, TileType::Fire | TileType::Ice | TileType::Freeze)
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecialTileConfig {
    #[serde(rename = "type")]
    pub kind: TileType,
    #[serde(default)]
    pub emoji: String,
    /// 0xRRGGBB
    pub color: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<Millis>,
    #[serde(default)]
    pub effect: String,
    pub spawn_rate: f64,
    pub score_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileTable {
    pub version: u32,
    pub tiles: Vec<SpecialTileConfig>,
}

impl TileTable {
    pub fn get(&self, kind: TileType) -> Option<&SpecialTileConfig> {
        self.tiles.iter().find(|t| t.kind == kind)
    }

    /// Entries in [`TileType::ALL`] order; kinds missing from the table are skipped.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialTileConfig> {
        TileType::ALL.into_iter().filter_map(move |kind| self.get(kind))
    }

    pub fn score_multiplier(&self, kind: TileType) -> f64 {
        self.get(kind).map(|t| t.score_multiplier).unwrap_or(1.0)
    }

    pub fn duration_ms(&self, kind: TileType) -> Option<Millis> {
        self.get(kind).and_then(|t| t.duration_ms)
    }

    pub fn spawn_weight_total(&self) -> f64 {
        self.iter().map(|t| t.spawn_rate).sum()
    }
}

impl Default for TileTable {
    fn default() -> Self {
        fn entry(
            kind: TileType,
            emoji: &str,
            color: u32,
            duration_ms: Option<Millis>,
            effect: &str,
            spawn_rate: f64,
            score_multiplier: f64,
        ) -> SpecialTileConfig {
            SpecialTileConfig {
                kind,
                emoji: emoji.to_string(),
                color,
                duration_ms,
                effect: effect.to_string(),
                spawn_rate,
                score_multiplier,
            }
        }

        Self {
            version: TILE_TABLE_VERSION,
            tiles: vec![
                entry(TileType::Normal, "", 0x333333, None, "none", 0.7, 1.0),
                entry(
                    TileType::Fire,
                    "\u{1F525}",
                    0xff4500,
                    Some(2000),
                    "Disappears if not tapped in time",
                    0.1,
                    2.0,
                ),
                entry(
                    TileType::Ice,
                    "\u{1F9CA}",
                    0x87ceeb,
                    Some(3000),
                    "Freezes part of board",
                    0.05,
                    1.5,
                ),
                entry(
                    TileType::Teleport,
                    "\u{1F300}",
                    0x9370db,
                    None,
                    "Swaps two tiles randomly",
                    0.05,
                    1.5,
                ),
                entry(TileType::Hint, "\u{1F4A1}", 0xffd700, None, "Highlights next tiles", 0.08, 1.2),
                entry(
                    TileType::Shuffle,
                    "\u{1F500}",
                    0xff69b4,
                    None,
                    "Rearranges upcoming tiles",
                    0.05,
                    1.3,
                ),
                entry(
                    TileType::Freeze,
                    "\u{2744}\u{FE0F}",
                    0x4169e1,
                    Some(3000),
                    "Pauses timer briefly",
                    0.04,
                    2.0,
                ),
                entry(TileType::Swap, "\u{1F504}", 0x32cd32, None, "Allows manual tile swap", 0.03, 1.8),
            ],
        }
    }
}
