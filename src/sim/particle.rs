//! Falling sprite state

use glam::Vec2;

use super::catalog::SpriteDesign;

/// One falling sprite instance
#[derive(Debug, Clone)]
pub struct Particle {
    /// Top-left corner of the sprite (surface pixels)
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, positive = down)
    pub vy: f32,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Rotation per tick (radians)
    pub rotation_speed: f32,
    /// Set once at the ground; never cleared
    pub bounced: bool,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub design: &'static SpriteDesign,
}

impl Particle {
    /// Fresh particle at `pos` with full opacity and no rotation
    pub fn new(design: &'static SpriteDesign, pos: Vec2, vy: f32, rotation_speed: f32) -> Self {
        Self {
            pos,
            vy,
            rotation: 0.0,
            rotation_speed,
            bounced: false,
            alpha: 1.0,
            design,
        }
    }

    /// Y at which the sprite's bottom edge sits on the surface's bottom edge
    #[inline]
    pub fn ground_y(&self, surface_height: f32, cell_size: f32) -> f32 {
        surface_height - self.design.pixel_height(cell_size)
    }

    /// Fully faded particles are removed by the scheduler
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}
