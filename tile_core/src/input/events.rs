use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// View coordinates: origin top-left, y grows downward.
    pub position: Vec2,
    pub pressed: bool,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            pressed: true,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            pressed: false,
        }
    }
}
