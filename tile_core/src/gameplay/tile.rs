use glam::Vec2;
use tile_schema::TileType;

use crate::time::timers::TimerHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// Lifecycle of a tile. A tile is live from the moment it is spawned and can
/// leave [`TileState::Active`] exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileState {
    Active,
    /// Tapped; lingers for the hit animation.
    Hit { at_ms: f64 },
    /// Fire tile left untouched for too long.
    Expired,
    /// Default tile that crossed the game-over line.
    Missed,
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileType,
    pub lane: usize,
    /// Centre of the tile in view coordinates.
    pub position: Vec2,
    state: TileState,
    pub(crate) expiry: Option<TimerHandle>,
}

impl Tile {
    pub fn new(id: TileId, kind: TileType, lane: usize, position: Vec2) -> Self {
        Self {
            id,
            kind,
            lane,
            position,
            state: TileState::Active,
            expiry: None,
        }
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TileState::Active
    }

    pub fn try_hit(&mut self, now_ms: f64) -> bool {
        self.leave_active(TileState::Hit { at_ms: now_ms })
    }

    pub fn try_expire(&mut self) -> bool {
        self.leave_active(TileState::Expired)
    }

    pub fn mark_missed(&mut self) -> bool {
        self.leave_active(TileState::Missed)
    }

    fn leave_active(&mut self, next: TileState) -> bool {
        if self.state != TileState::Active {
            return false;
        }
        self.state = next;
        true
    }

    pub fn move_down(&mut self, dy: f32) {
        self.position.y += dy;
    }

    /// Axis-aligned hit box centred on the tile.
    pub fn contains(&self, point: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        let d = (point - self.position).abs();
        d.x <= half.x && d.y <= half.y
    }

    /// Progress of the hit animation in `[0, 1]`, or `None` if not hit.
    pub fn hit_progress(&self, now_ms: f64, animation_ms: f64) -> Option<f32> {
        match self.state {
            TileState::Hit { at_ms } if animation_ms > 0.0 => {
                Some(((now_ms - at_ms) / animation_ms).clamp(0.0, 1.0) as f32)
            }
            TileState::Hit { .. } => Some(1.0),
            _ => None,
        }
    }
}
