//! Particle state

use cinder_core::Vec2;

/// One particle of the fountain.
///
/// `position` is the authoritative simulation state and only ever moves
/// during a fixed update or collision resolution. `display_position` is
/// what the renderer draws; interpolation rewrites it between updates
/// without disturbing the authoritative fields.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub display_position: Vec2,
    pub velocity: Vec2,
    /// Per-second velocity gain from the launch; the vertical component
    /// decays under gravity each update.
    pub acceleration: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            display_position: position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            radius,
        }
    }
}
