use serde::{Deserialize, Serialize};

use crate::Millis;

/// Gameplay tuning for a single level. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub view_width: f32,
    pub view_height: f32,
    /// Horizontal centre of each lane.
    pub lanes: Vec<f32>,
    pub tile_width: f32,
    pub tile_height: f32,
    pub tile_spawn_y: f32,
    pub spawn_interval_ms: Millis,
    /// Pixels per reference frame.
    pub initial_speed: f32,
    pub speed_ramp_step: f32,
    pub speed_ramp_interval_ms: Millis,
    /// Movement is specified per frame of this length.
    pub frame_ms: f64,
    pub tile_offscreen_margin: f32,
    pub letter_offscreen_margin: f32,
    pub game_over_margin: f32,
    pub base_tile_points: i64,
    pub fire_penalty: i64,
    pub target_word: String,
    pub letter_spawn_chance: f64,
    pub letter_size: f32,
    pub letter_spawn_y: f32,
    pub letter_inset: f32,
    pub letter_speed: f32,
    pub word_bonus: i64,
    pub hit_animation_ms: Millis,
    pub collect_animation_ms: Millis,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            view_width: 375.0,
            view_height: 667.0,
            lanes: vec![70.0, 150.0, 230.0, 310.0],
            tile_width: 80.0,
            tile_height: 120.0,
            tile_spawn_y: -60.0,
            spawn_interval_ms: 800,
            initial_speed: 2.0,
            speed_ramp_step: 0.2,
            speed_ramp_interval_ms: 10_000,
            frame_ms: 1000.0 / 60.0,
            tile_offscreen_margin: 60.0,
            letter_offscreen_margin: 50.0,
            game_over_margin: 100.0,
            base_tile_points: 100,
            fire_penalty: -50,
            target_word: "EXCEL".to_string(),
            letter_spawn_chance: 0.05,
            letter_size: 40.0,
            letter_spawn_y: -50.0,
            letter_inset: 40.0,
            letter_speed: 2.0 * 0.3,
            word_bonus: 1000,
            hit_animation_ms: 200,
            collect_animation_ms: 300,
        }
    }
}

impl SessionConfig {
    /// Vertical position past which a live default tile ends the game.
    pub fn game_over_line(&self) -> f32 {
        self.view_height - self.game_over_margin
    }
}
