//! Food Rain - falling pixel-art food for a storefront backdrop
//!
//! Core modules:
//! - `sim`: Sprite catalog, particles, physics, spawner and the frame scheduler
//! - `renderer`: Drawing surface abstraction and the sprite painter
//! - `platform`: Browser glue (canvas, animation frames, resize listener)
//! - `settings`: Tunable parameters persisted in LocalStorage
//! - `error`: Typed errors for mount, catalog and settings validation

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{CatalogError, MountError, SettingsError};
pub use settings::AnimationSettings;

/// Animation constants (defaults for `AnimationSettings`)
pub mod consts {
    /// Side of one sprite cell in surface pixels
    pub const CELL_SIZE: f32 = 4.0;

    /// Minimum time between two spawns (milliseconds)
    pub const SPAWN_INTERVAL_MS: f64 = 200.0;
    /// Live particle cap; spawning pauses while it is reached
    ///
    /// At the cap a due spawn is skipped, overriding the interval cadence.
    /// A 200 ms cadence keeps roughly 60 particles alive on a 1000 px tall
    /// surface, so the cap is only reached on very tall backdrops.
    pub const MAX_PARTICLES: usize = 256;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.05;
    /// Velocity multiplier applied at the bounce (negative = rebound)
    pub const RESTITUTION: f32 = -0.4;
    /// Rotation speed multiplier applied at the bounce
    pub const DAMPING: f32 = 0.5;
    /// Alpha lost per tick once bounced
    pub const FADE_RATE: f32 = 0.02;
    /// Alpha values this close to zero are snapped to zero
    pub const ALPHA_EPSILON: f32 = 1e-4;

    /// Initial fall speed range (pixels/tick)
    pub const INITIAL_VY_MIN: f32 = 0.5;
    pub const INITIAL_VY_MAX: f32 = 1.5;
    /// Spawn rotation speed is uniform in [-MAX, MAX] (radians/tick)
    pub const MAX_ROTATION_SPEED: f32 = 0.05;
}
