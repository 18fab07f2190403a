//! Loading and validation of the JSON files that tune a game: the special
//! tile table, the song library, and per-level session settings.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use tile_schema::{SessionConfig, SongLibrary, TileTable};

mod error;
mod validate;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigErrorKind};

use validate::{validate_session_config, validate_song_library, validate_tile_table};

/// Totals further than this from 1.0 are reported as drift.
pub const SPAWN_WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Beat-map lanes must fall inside `0..lane_count`.
    pub lane_count: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            lane_count: SessionConfig::default().lanes.len(),
        }
    }
}

pub fn load_tile_table_file(path: impl AsRef<Path>) -> Result<TileTable, ConfigError> {
    let path = path.as_ref();
    let src = read_file(path)?;
    load_tile_table_str(&src).map_err(|e| e.with_file(path.display().to_string()))
}

pub fn load_tile_table_str(src: &str) -> Result<TileTable, ConfigError> {
    let table: TileTable = parse_json(src)?;
    validate_tile_table(&table)?;
    if let Some(drift) = spawn_weight_drift(&table) {
        log::warn!(
            "tile spawn weights sum to {:.4} (drift {drift:+.4}); weights are used as-is",
            table.spawn_weight_total()
        );
    }
    Ok(table)
}

pub fn load_song_library_file(path: impl AsRef<Path>) -> Result<SongLibrary, ConfigError> {
    load_song_library_file_with_options(path, &LoadOptions::default())
}

pub fn load_song_library_file_with_options(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<SongLibrary, ConfigError> {
    let path = path.as_ref();
    let src = read_file(path)?;
    load_song_library_str_with_options(&src, options)
        .map_err(|e| e.with_file(path.display().to_string()))
}

pub fn load_song_library_str(src: &str) -> Result<SongLibrary, ConfigError> {
    load_song_library_str_with_options(src, &LoadOptions::default())
}

pub fn load_song_library_str_with_options(
    src: &str,
    options: &LoadOptions,
) -> Result<SongLibrary, ConfigError> {
    let lib: SongLibrary = parse_json(src)?;
    validate_song_library(&lib, options.lane_count)?;
    Ok(lib)
}

pub fn load_session_config_file(path: impl AsRef<Path>) -> Result<SessionConfig, ConfigError> {
    let path = path.as_ref();
    let src = read_file(path)?;
    load_session_config_str(&src).map_err(|e| e.with_file(path.display().to_string()))
}

pub fn load_session_config_str(src: &str) -> Result<SessionConfig, ConfigError> {
    let cfg: SessionConfig = parse_json(src)?;
    validate_session_config(&cfg)?;
    Ok(cfg)
}

/// Difference between the spawn-weight total and 1.0, when it exceeds
/// [`SPAWN_WEIGHT_TOLERANCE`].
pub fn spawn_weight_drift(table: &TileTable) -> Option<f64> {
    let drift = table.spawn_weight_total() - 1.0;
    (drift.abs() > SPAWN_WEIGHT_TOLERANCE).then_some(drift)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| {
        ConfigError::new("E2001", format!("failed to read {}: {e}", path.display()))
            .with_file(path.display().to_string())
    })
}

fn parse_json<T: DeserializeOwned>(src: &str) -> Result<T, ConfigError> {
    serde_json::from_str(src).map_err(|e| {
        ConfigError::new("E1001", format!("invalid json: {e}"))
            .with_context(format!("line {}, column {}", e.line(), e.column()))
    })
}
