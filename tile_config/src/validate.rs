use std::collections::HashSet;

use tile_schema::{SessionConfig, SongLibrary, TileTable, TileType, TILE_TABLE_VERSION};

use crate::ConfigError;

pub(crate) fn validate_tile_table(table: &TileTable) -> Result<(), ConfigError> {
    if table.version != TILE_TABLE_VERSION {
        return Err(ConfigError::new(
            "E4001",
            format!(
                "unsupported tile table version {} (expected {TILE_TABLE_VERSION})",
                table.version
            ),
        )
        .with_field("version"));
    }

    let mut seen = HashSet::new();
    for (i, tile) in table.tiles.iter().enumerate() {
        if !seen.insert(tile.kind) {
            return Err(
                ConfigError::new("E4003", format!("duplicate tile type '{}'", tile.kind))
                    .with_field(format!("tiles[{i}].type")),
            );
        }
        if !tile.spawn_rate.is_finite() || !(0.0..=1.0).contains(&tile.spawn_rate) {
            return Err(ConfigError::new(
                "E4004",
                format!("spawn_rate must be within [0, 1], got {}", tile.spawn_rate),
            )
            .with_field(format!("tiles[{i}].spawn_rate"))
            .with_context(tile.kind.to_string()));
        }
        if !(tile.score_multiplier > 0.0) || !tile.score_multiplier.is_finite() {
            return Err(ConfigError::new(
                "E4005",
                format!("score_multiplier must be > 0, got {}", tile.score_multiplier),
            )
            .with_field(format!("tiles[{i}].score_multiplier"))
            .with_context(tile.kind.to_string()));
        }
        if tile.kind.is_timed() && tile.duration_ms.map_or(true, |d| d == 0) {
            return Err(ConfigError::new(
                "E4006",
                format!("'{}' tiles need a non-zero duration_ms", tile.kind),
            )
            .with_field(format!("tiles[{i}].duration_ms")));
        }
    }

    for kind in TileType::ALL {
        if !seen.contains(&kind) {
            return Err(ConfigError::new("E4002", format!("missing tile type '{kind}'"))
                .with_field("tiles"));
        }
    }

    Ok(())
}

pub(crate) fn validate_song_library(lib: &SongLibrary, lane_count: usize) -> Result<(), ConfigError> {
    if lib.songs.is_empty() {
        return Err(ConfigError::new("E4101", "song library is empty").with_field("songs"));
    }

    let mut ids = HashSet::new();
    for (i, song) in lib.songs.iter().enumerate() {
        if song.id.trim().is_empty() {
            return Err(ConfigError::new("E4103", "song id must be non-empty")
                .with_field(format!("songs[{i}].id")));
        }
        if !ids.insert(song.id.as_str()) {
            return Err(ConfigError::new("E4102", format!("duplicate song id '{}'", song.id))
                .with_field(format!("songs[{i}].id")));
        }
        if !(song.bpm > 0.0) || !song.bpm.is_finite() {
            return Err(ConfigError::new("E4103", format!("bpm must be > 0, got {}", song.bpm))
                .with_field(format!("songs[{i}].bpm"))
                .with_context(song.id.clone()));
        }
        for (j, beat) in song.beat_map.iter().enumerate() {
            if beat.lane as usize >= lane_count {
                return Err(ConfigError::new(
                    "E4103",
                    format!("beat lane {} outside 0..{lane_count}", beat.lane),
                )
                .with_field(format!("songs[{i}].beat_map[{j}].lane"))
                .with_context(song.id.clone()));
            }
        }
    }
    Ok(())
}

pub(crate) fn validate_session_config(cfg: &SessionConfig) -> Result<(), ConfigError> {
    let invalid = |field: &str, message: String| ConfigError::new("E4201", message).with_field(field);

    if cfg.target_word.trim().is_empty() {
        return Err(invalid("target_word", "target_word must be non-empty".to_string()));
    }
    if cfg.lanes.is_empty() {
        return Err(invalid("lanes", "at least one lane is required".to_string()));
    }
    for (field, value) in [
        ("view_width", cfg.view_width),
        ("view_height", cfg.view_height),
        ("tile_width", cfg.tile_width),
        ("tile_height", cfg.tile_height),
        ("letter_size", cfg.letter_size),
    ] {
        if !(value > 0.0) {
            return Err(invalid(field, format!("{field} must be > 0, got {value}")));
        }
    }
    for (field, value) in [
        ("spawn_interval_ms", cfg.spawn_interval_ms),
        ("speed_ramp_interval_ms", cfg.speed_ramp_interval_ms),
    ] {
        if value == 0 {
            return Err(invalid(field, format!("{field} must be > 0")));
        }
    }
    if !(cfg.frame_ms > 0.0) {
        return Err(invalid("frame_ms", format!("frame_ms must be > 0, got {}", cfg.frame_ms)));
    }
    if cfg.game_over_line() >= cfg.view_height + cfg.tile_offscreen_margin {
        return Err(invalid(
            "game_over_margin",
            format!(
                "game-over line {} must sit above the tile removal line {}",
                cfg.game_over_line(),
                cfg.view_height + cfg.tile_offscreen_margin
            ),
        ));
    }
    for (field, value) in [
        ("base_tile_points", cfg.base_tile_points),
        ("word_bonus", cfg.word_bonus),
    ] {
        if value <= 0 {
            return Err(invalid(field, format!("{field} must be > 0, got {value}")));
        }
    }
    if !(0.0..=1.0).contains(&cfg.letter_spawn_chance) {
        return Err(invalid(
            "letter_spawn_chance",
            format!("letter_spawn_chance must be within [0, 1], got {}", cfg.letter_spawn_chance),
        ));
    }
    Ok(())
}
