//! In-memory surface that records every drawing call
//!
//! Used by the headless binary and by tests to inspect what was painted.

use super::Surface;
use crate::sim::Color;

/// A single recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(u32, u32),
    Clear,
    Save,
    Restore,
    GlobalAlpha(f32),
    Translate(f32, f32),
    Rotate(f32),
    FillColor(&'static str),
    FillRect(f32, f32, f32, f32),
}

/// Surface that logs calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    /// Saved global alpha values (one per open `save`)
    stack: Vec<f32>,
    global_alpha: f32,
    available: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            stack: Vec::new(),
            global_alpha: 1.0,
            available: true,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping size and state
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Open `save` calls not yet restored
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Simulate the backing context going away
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Recorded `fill_rect` calls as (x, y, w, h)
    pub fn filled_rects(&self) -> Vec<(f32, f32, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::FillRect(x, y, w, h) => Some((x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    /// Number of `save`..`restore` groups drawn, one per particle
    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Save))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        // A resized canvas also resets its drawing state
        self.stack.clear();
        self.global_alpha = 1.0;
        self.commands.push(DrawCommand::Resize(width, height));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.stack.push(self.global_alpha);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.stack.pop() {
            self.global_alpha = alpha;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color.0));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect(x, y, width, height));
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
