//! Sprite rendering
//!
//! Particles are painted cell by cell onto a [`Surface`], a thin 2D drawing
//! abstraction shaped after the canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::{Color, Palette, Particle};

/// A resizable 2D drawing target with a save/restore state stack
pub trait Surface {
    /// Current width (pixels)
    fn width(&self) -> f32;
    /// Current height (pixels)
    fn height(&self) -> f32;
    /// Resize the backing store (clears it)
    fn set_size(&mut self, width: u32, height: u32);

    /// Erase the whole surface
    fn clear(&mut self);
    /// Push transform and opacity state
    fn save(&mut self);
    /// Pop transform and opacity state
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn set_fill_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// False once the surface can no longer be drawn to
    fn is_available(&self) -> bool {
        true
    }
}

/// Paint one particle at its current pose
///
/// Rotation is applied about the sprite's center. The surface's transform and
/// opacity are restored before returning.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, particle: &Particle, palette: &Palette, cell_size: f32) {
    let design = particle.design;
    let size = Vec2::new(design.pixel_width(cell_size), design.pixel_height(cell_size));
    let center = particle.pos + size * 0.5;

    surface.save();
    surface.set_global_alpha(particle.alpha.clamp(0.0, 1.0));
    surface.translate(center.x, center.y);
    surface.rotate(particle.rotation);
    surface.translate(-center.x, -center.y);

    let mut current: Option<Color> = None;
    for (col, row, index) in design.cells() {
        let Some(color) = palette.color(index) else {
            continue;
        };
        if current != Some(color) {
            surface.set_fill_color(color);
            current = Some(color);
        }
        surface.fill_rect(
            particle.pos.x + col as f32 * cell_size,
            particle.pos.y + row as f32 * cell_size,
            cell_size,
            cell_size,
        );
    }

    surface.restore();
}
