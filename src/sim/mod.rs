//! Particle simulation
//!
//! Everything here is host-independent:
//! - Randomness comes from a seeded `Pcg32`
//! - Particles are processed in spawn order
//! - Drawing goes through the `renderer::Surface` trait

pub mod catalog;
pub mod particle;
pub mod physics;
pub mod scheduler;
pub mod spawner;

pub use catalog::{Color, Palette, SpriteCatalog, SpriteDesign, TRANSPARENT};
pub use particle::Particle;
pub use physics::{Physics, update};
pub use scheduler::{
    AnimationScheduler, SchedulerPhase, SimulationState, SurfaceSize, TickOutcome, prune_dead,
};
pub use spawner::{SpawnConfig, Spawner};
