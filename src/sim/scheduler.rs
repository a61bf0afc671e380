//! Frame scheduler
//!
//! Owns every live particle and drives one spawn → update → draw → prune pass
//! per host frame. All state lives in a [`SimulationState`] created on mount
//! and dropped on unmount; a stopped scheduler ignores ticks and resizes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::SpriteCatalog;
use super::particle::Particle;
use super::physics::{self, Physics};
use super::spawner::Spawner;
use crate::renderer::{self, Surface};
use crate::settings::AnimationSettings;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Not mounted (or torn down); ticks are refused
    Stopped,
    /// Mounted; the host should keep requesting frames
    Running,
}

/// Result of one tick, telling the host whether to request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame simulated and painted
    Drawn,
    /// Surface unavailable; nothing changed, keep scheduling
    Skipped,
    /// Scheduler is stopped; do not request another frame
    Stopped,
}

impl TickOutcome {
    #[inline]
    pub fn should_reschedule(self) -> bool {
        self != TickOutcome::Stopped
    }
}

/// Drawing surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// From a container's content box; negative or NaN extents become 0
    pub fn from_content_box(width: f64, height: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() && v > 0.0 { v.floor() as u32 } else { 0 };
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }
}

/// Everything that lives between mount and unmount
#[derive(Debug)]
pub struct SimulationState {
    /// Live particles in spawn order
    particles: Vec<Particle>,
    spawner: Spawner,
    size: SurfaceSize,
    rng: Pcg32,
    ticks: u64,
    spawned: u64,
    pruned: u64,
}

impl SimulationState {
    fn new(settings: &AnimationSettings, size: SurfaceSize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(settings.max_particles),
            spawner: Spawner::new(settings.spawn_config()),
            size,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            spawned: 0,
            pruned: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Ticks simulated since mount
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Particles spawned since mount
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Particles removed since mount
    pub fn pruned(&self) -> u64 {
        self.pruned
    }
}

/// Remove faded particles in one forward pass, keeping survivors in order
///
/// Survivors are swapped down to a write cursor; everything past the cursor
/// is dead and truncated. Returns the number removed.
pub fn prune_dead(particles: &mut Vec<Particle>) -> usize {
    let mut write = 0;
    for read in 0..particles.len() {
        if particles[read].is_dead() {
            continue;
        }
        if read != write {
            particles.swap(read, write);
        }
        write += 1;
    }
    let removed = particles.len() - write;
    particles.truncate(write);
    removed
}

/// Drives the animation for one mounted surface
#[derive(Debug)]
pub struct AnimationScheduler {
    catalog: SpriteCatalog,
    settings: AnimationSettings,
    physics: Physics,
    seed: u64,
    state: Option<SimulationState>,
}

impl AnimationScheduler {
    pub fn new(catalog: SpriteCatalog, settings: AnimationSettings, seed: u64) -> Self {
        let physics = settings.physics();
        Self {
            catalog,
            settings,
            physics,
            seed,
            state: None,
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        if self.state.is_some() {
            SchedulerPhase::Running
        } else {
            SchedulerPhase::Stopped
        }
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    /// Live state, present only while running
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Live particles (empty when stopped)
    pub fn particles(&self) -> &[Particle] {
        self.state.as_ref().map(|s| s.particles()).unwrap_or(&[])
    }

    /// Stopped → Running: size the surface to its container and start fresh
    pub fn mount<S: Surface + ?Sized>(&mut self, surface: &mut S, container: SurfaceSize) -> SchedulerPhase {
        if self.state.is_some() {
            log::debug!("mount ignored, already running");
            return SchedulerPhase::Running;
        }
        if !self.settings.enabled {
            log::info!("Food rain disabled by settings");
            return SchedulerPhase::Stopped;
        }
        if !surface.is_available() {
            log::warn!("Drawing surface unavailable, animation disabled");
            return SchedulerPhase::Stopped;
        }

        surface.set_size(container.width, container.height);
        self.state = Some(SimulationState::new(&self.settings, container, self.seed));
        log::info!(
            "Food rain mounted ({}x{}, seed {})",
            container.width,
            container.height,
            self.seed
        );
        SchedulerPhase::Running
    }

    /// Running → Stopped: discard all simulation state
    pub fn unmount(&mut self) -> SchedulerPhase {
        if let Some(state) = self.state.take() {
            log::info!(
                "Food rain unmounted after {} ticks ({} spawned, {} live)",
                state.ticks,
                state.spawned,
                state.particles.len()
            );
        }
        SchedulerPhase::Stopped
    }

    /// Match the surface to its container; particles keep their coordinates
    pub fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S, container: SurfaceSize) {
        let Some(state) = self.state.as_mut() else {
            log::debug!("resize ignored, scheduler stopped");
            return;
        };
        surface.set_size(container.width, container.height);
        if state.size != container {
            log::debug!(
                "surface resized {}x{} -> {}x{}",
                state.size.width,
                state.size.height,
                container.width,
                container.height
            );
        }
        state.size = container;
    }

    /// One frame at host timestamp `now_ms`
    pub fn tick<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> TickOutcome {
        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Stopped;
        };
        if !surface.is_available() {
            log::debug!("tick skipped, surface unavailable");
            return TickOutcome::Skipped;
        }

        surface.clear();
        state.ticks += 1;

        if state.particles.len() < self.settings.max_particles {
            if let Some(particle) = state.spawner.maybe_spawn(
                now_ms,
                state.size.width as f32,
                &self.catalog,
                &mut state.rng,
            ) {
                state.particles.push(particle);
                state.spawned += 1;
            }
        }

        let cell_size = state.spawner.config().cell_size;
        let height = state.size.height as f32;
        let palette = self.catalog.palette();
        for particle in state.particles.iter_mut() {
            let ground_y = particle.ground_y(height, cell_size);
            physics::update(particle, ground_y, &self.physics);
            renderer::draw(surface, particle, palette, cell_size);
        }

        let removed = prune_dead(&mut state.particles);
        if removed > 0 {
            state.pruned += removed as u64;
            log::trace!("pruned {} particles, {} live", removed, state.particles.len());
        }

        TickOutcome::Drawn
    }
}
