use super::*;
use std::{
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tile_schema::{TileType, TILE_TABLE_VERSION};

fn default_table_json() -> serde_json::Value {
    serde_json::to_value(TileTable::default()).unwrap()
}

fn unique_tmp(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    env::temp_dir().join(format!("tilebeat_config_{name}_{}_{nanos}", std::process::id()))
}

#[test]
fn default_table_loads_and_reports_drift() {
    let src = default_table_json().to_string();
    let table = load_tile_table_str(&src).unwrap();
    assert_eq!(table, TileTable::default());

    let drift = spawn_weight_drift(&table).expect("stock weights sum to 1.1");
    assert!((drift - 0.1).abs() < 1e-9);
}

#[test]
fn balanced_table_has_no_drift() {
    let mut table = TileTable::default();
    for t in &mut table.tiles {
        if t.kind == TileType::Normal {
            t.spawn_rate = 0.6;
        }
    }
    assert!(spawn_weight_drift(&table).is_none());
}

#[test]
fn malformed_json_is_e1001() {
    let err = load_tile_table_str("{ not json").unwrap_err();
    assert_eq!(err.code, "E1001");
    assert_eq!(err.kind, ConfigErrorKind::Parse);
    assert!(err.context.as_deref().unwrap().starts_with("line 1"));
}

#[test]
fn unsupported_version_is_e4001() {
    let mut v = default_table_json();
    v["version"] = serde_json::json!(TILE_TABLE_VERSION + 1);
    let err = load_tile_table_str(&v.to_string()).unwrap_err();
    assert_eq!(err.code, "E4001");
    assert_eq!(err.kind, ConfigErrorKind::Validation);
    assert_eq!(err.field.as_deref(), Some("version"));
}

#[test]
fn missing_tile_type_is_e4002() {
    let mut table = TileTable::default();
    table.tiles.retain(|t| t.kind != TileType::Hint);
    let src = serde_json::to_string(&table).unwrap();
    let err = load_tile_table_str(&src).unwrap_err();
    assert_eq!(err.code, "E4002");
    assert!(err.message.contains("hint"));
}

#[test]
fn duplicate_tile_type_is_e4003() {
    let mut table = TileTable::default();
    let dup = table.tiles[1].clone();
    table.tiles.push(dup);
    let src = serde_json::to_string(&table).unwrap();
    let err = load_tile_table_str(&src).unwrap_err();
    assert_eq!(err.code, "E4003");
    assert_eq!(err.field.as_deref(), Some("tiles[8].type"));
}

#[test]
fn out_of_range_spawn_rate_is_e4004() {
    let mut v = default_table_json();
    v["tiles"][2]["spawn_rate"] = serde_json::json!(1.5);
    let err = load_tile_table_str(&v.to_string()).unwrap_err();
    assert_eq!(err.code, "E4004");
    assert_eq!(err.field.as_deref(), Some("tiles[2].spawn_rate"));
    assert_eq!(err.context.as_deref(), Some("ice"));
}

#[test]
fn non_positive_multiplier_is_e4005() {
    let mut v = default_table_json();
    v["tiles"][0]["score_multiplier"] = serde_json::json!(0.0);
    let err = load_tile_table_str(&v.to_string()).unwrap_err();
    assert_eq!(err.code, "E4005");
}

#[test]
fn timed_tile_without_duration_is_e4006() {
    let mut table = TileTable::default();
    for t in &mut table.tiles {
        if t.kind == TileType::Freeze {
            t.duration_ms = None;
        }
    }
    let src = serde_json::to_string(&table).unwrap();
    let err = load_tile_table_str(&src).unwrap_err();
    assert_eq!(err.code, "E4006");
    assert!(err.message.contains("freeze"));
}

#[test]
fn missing_file_is_e2001_with_file() {
    let path = unique_tmp("missing.json");
    let _ = fs::remove_file(&path);
    let err = load_tile_table_file(&path).unwrap_err();
    assert_eq!(err.code, "E2001");
    assert_eq!(err.kind, ConfigErrorKind::IO);
    assert_eq!(err.file.as_deref(), Some(path.display().to_string().as_str()));
}

#[test]
fn validation_error_from_file_carries_file_name() {
    let path = unique_tmp("bad_tiles.json");
    let mut v = default_table_json();
    v["version"] = serde_json::json!(99);
    fs::write(&path, v.to_string()).unwrap();

    let err = load_tile_table_file(&path).unwrap_err();
    assert_eq!(err.code, "E4001");
    assert!(err.file.is_some());
    assert_eq!(err.to_string(), "E4001: unsupported tile table version 99 (expected 1)");
}

#[test]
fn song_library_roundtrip_through_file() {
    let path = unique_tmp("songs.json");
    let lib = SongLibrary::default();
    fs::write(&path, serde_json::to_string_pretty(&lib).unwrap()).unwrap();

    let back = load_song_library_file(&path).unwrap();
    assert_eq!(back, lib);
}

#[test]
fn empty_song_library_is_e4101() {
    let err = load_song_library_str(r#"{ "songs": [] }"#).unwrap_err();
    assert_eq!(err.code, "E4101");
}

#[test]
fn duplicate_song_id_is_e4102() {
    let mut lib = SongLibrary::default();
    lib.songs[1].id = lib.songs[0].id.clone();
    let err = load_song_library_str(&serde_json::to_string(&lib).unwrap()).unwrap_err();
    assert_eq!(err.code, "E4102");
    assert_eq!(err.field.as_deref(), Some("songs[1].id"));
}

#[test]
fn beat_lane_outside_lane_count_is_e4103() {
    let src = r#"{
        "songs": [{
            "id": "s", "title": "S", "artist": "A", "duration_ms": 1000, "bpm": 120.0,
            "difficulty": "Easy", "audio_path": "s.ogg",
            "beat_map": [ { "time_ms": 0, "lane": 3, "type": "normal" } ]
        }]
    }"#;
    assert!(load_song_library_str(src).is_ok());

    let err = load_song_library_str_with_options(src, &LoadOptions { lane_count: 3 }).unwrap_err();
    assert_eq!(err.code, "E4103");
    assert_eq!(err.field.as_deref(), Some("songs[0].beat_map[0].lane"));
    assert_eq!(err.context.as_deref(), Some("s"));
}

#[test]
fn zero_bpm_is_e4103() {
    let mut lib = SongLibrary::default();
    lib.songs[0].bpm = 0.0;
    let err = load_song_library_str(&serde_json::to_string(&lib).unwrap()).unwrap_err();
    assert_eq!(err.code, "E4103");
}

#[test]
fn empty_session_file_uses_defaults() {
    let cfg = load_session_config_str("{}").unwrap();
    assert_eq!(cfg, SessionConfig::default());
}

#[test]
fn invalid_session_values_are_e4201() {
    let cases = [
        (r#"{ "target_word": "  " }"#, "target_word"),
        (r#"{ "lanes": [] }"#, "lanes"),
        (r#"{ "tile_height": 0 }"#, "tile_height"),
        (r#"{ "spawn_interval_ms": 0 }"#, "spawn_interval_ms"),
        (r#"{ "letter_spawn_chance": 1.5 }"#, "letter_spawn_chance"),
        (r#"{ "frame_ms": -1.0 }"#, "frame_ms"),
        (r#"{ "game_over_margin": -80 }"#, "game_over_margin"),
        (r#"{ "game_over_margin": -60 }"#, "game_over_margin"),
        (r#"{ "base_tile_points": 0 }"#, "base_tile_points"),
        (r#"{ "word_bonus": -10 }"#, "word_bonus"),
    ];
    for (src, field) in cases {
        let err = load_session_config_str(src).unwrap_err();
        assert_eq!(err.code, "E4201", "{src}");
        assert_eq!(err.field.as_deref(), Some(field), "{src}");
    }
}

#[test]
fn game_over_line_just_above_removal_line_is_accepted() {
    let cfg = load_session_config_str(r#"{ "game_over_margin": -59 }"#).unwrap();
    assert!(cfg.game_over_line() < cfg.view_height + cfg.tile_offscreen_margin);
}
