use tile_schema::TileType;

use crate::time::timers::TimerHandle;

/// Timed effects with a visible overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Translucent full-screen overlay. Cosmetic only.
    IceOverlay,
    /// Stops tile and letter movement and spawning, with a tint.
    Freeze,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::IceOverlay => "ice-overlay",
            EffectKind::Freeze => "freeze",
        }
    }
}

/// What hitting a tile of a given type does besides scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffect {
    None,
    Timed(EffectKind),
    /// Declared but without gameplay behaviour.
    Stub,
}

pub fn hit_effect(kind: TileType) -> HitEffect {
    match kind {
        TileType::Normal | TileType::Fire => HitEffect::None,
        TileType::Ice => HitEffect::Timed(EffectKind::IceOverlay),
        TileType::Freeze => HitEffect::Timed(EffectKind::Freeze),
        TileType::Teleport | TileType::Hint | TileType::Shuffle | TileType::Swap => HitEffect::Stub,
    }
}

/// One window per effect kind. Starting an effect that is already running
/// replaces its window; the caller cancels the returned timer.
#[derive(Debug, Clone, Default)]
pub struct EffectState {
    ice: Option<TimerHandle>,
    freeze: Option<TimerHandle>,
}

impl EffectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_some()
    }

    pub fn ice_active(&self) -> bool {
        self.ice.is_some()
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Records `end_timer` as the end of `kind`'s window and returns the timer
    /// it replaces, if any.
    pub fn start(&mut self, kind: EffectKind, end_timer: TimerHandle) -> Option<TimerHandle> {
        self.slot_mut(kind).replace(end_timer)
    }

    /// Returns `true` if the effect was running.
    pub fn finish(&mut self, kind: EffectKind) -> bool {
        self.slot_mut(kind).take().is_some()
    }

    pub fn clear(&mut self) {
        self.ice = None;
        self.freeze = None;
    }

    fn slot(&self, kind: EffectKind) -> &Option<TimerHandle> {
        match kind {
            EffectKind::IceOverlay => &self.ice,
            EffectKind::Freeze => &self.freeze,
        }
    }

    fn slot_mut(&mut self, kind: EffectKind) -> &mut Option<TimerHandle> {
        match kind {
            EffectKind::IceOverlay => &mut self.ice,
            EffectKind::Freeze => &mut self.freeze,
        }
    }
}
