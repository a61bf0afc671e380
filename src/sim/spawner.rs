//! Timed particle spawning

use glam::Vec2;
use rand::Rng;

use super::catalog::SpriteCatalog;
use super::particle::Particle;
use crate::consts::*;

/// Spawner parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    /// Minimum time between spawns (ms)
    pub interval_ms: f64,
    /// Side of one sprite cell (pixels)
    pub cell_size: f32,
    pub initial_vy_min: f32,
    pub initial_vy_max: f32,
    /// Rotation speed is uniform in [-max, max]
    pub max_rotation_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: SPAWN_INTERVAL_MS,
            cell_size: CELL_SIZE,
            initial_vy_min: INITIAL_VY_MIN,
            initial_vy_max: INITIAL_VY_MAX,
            max_rotation_speed: MAX_ROTATION_SPEED,
        }
    }
}

/// Emits at most one particle per interval
#[derive(Debug, Clone)]
pub struct Spawner {
    config: SpawnConfig,
    last_spawn_ms: f64,
}

impl Spawner {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            last_spawn_ms: 0.0,
        }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Timestamp of the last successful spawn
    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Whether `now_ms` is past the current interval window
    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms > self.config.interval_ms
    }

    /// Spawn a particle above the surface if the interval has elapsed
    ///
    /// The timer only advances when a particle is returned.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        surface_width: f32,
        catalog: &SpriteCatalog,
        rng: &mut R,
    ) -> Option<Particle> {
        if !self.is_due(now_ms) {
            return None;
        }

        let cfg = &self.config;
        let design = catalog.pick(rng);

        // Narrow (or zero-sized) surfaces collapse the range to x = 0
        let max_x = (surface_width - design.pixel_width(cfg.cell_size)).max(0.0);
        let x = rng.random::<f32>() * max_x;
        let y = -design.pixel_height(cfg.cell_size);

        let vy = cfg.initial_vy_min + rng.random::<f32>() * (cfg.initial_vy_max - cfg.initial_vy_min);
        let rotation_speed = (rng.random::<f32>() * 2.0 - 1.0) * cfg.max_rotation_speed;

        self.last_spawn_ms = now_ms;
        log::trace!("spawned {} at x={:.1} vy={:.2}", design.name, x, vy);

        Some(Particle::new(design, Vec2::new(x, y), vy, rotation_speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_waits_for_interval() {
        let food = SpriteCatalog::food();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner::new(SpawnConfig::default());

        assert!(spawner.maybe_spawn(100.0, 800.0, &food, &mut rng).is_none());
        // Exactly the interval is not enough
        assert!(spawner.maybe_spawn(200.0, 800.0, &food, &mut rng).is_none());
        assert_eq!(spawner.last_spawn_ms(), 0.0);

        assert!(spawner.maybe_spawn(201.0, 800.0, &food, &mut rng).is_some());
        assert_eq!(spawner.last_spawn_ms(), 201.0);
        assert!(spawner.maybe_spawn(350.0, 800.0, &food, &mut rng).is_none());
        assert_eq!(spawner.last_spawn_ms(), 201.0);
    }

    #[test]
    fn test_spawned_particle_initial_state() {
        let food = SpriteCatalog::food();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut spawner = Spawner::new(SpawnConfig::default());

        let p = spawner.maybe_spawn(500.0, 640.0, &food, &mut rng).unwrap();
        assert_eq!(p.pos.y, -p.design.pixel_height(CELL_SIZE));
        assert_eq!(p.rotation, 0.0);
        assert!(!p.bounced);
        assert_eq!(p.alpha, 1.0);
        assert!(p.vy >= INITIAL_VY_MIN && p.vy <= INITIAL_VY_MAX);
        assert!(p.rotation_speed.abs() <= MAX_ROTATION_SPEED);
    }

    #[test]
    fn test_narrow_surface_spawns_at_zero() {
        let food = SpriteCatalog::food();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = Spawner::new(SpawnConfig::default());

        let mut now = 0.0;
        for width in [0.0, 5.0, -40.0] {
            now += 1_000.0;
            let p = spawner.maybe_spawn(now, width, &food, &mut rng).unwrap();
            assert_eq!(p.pos.x, 0.0);
        }
    }

    #[test]
    fn test_steady_cadence() {
        // 16 ms frames against a 200 ms interval: one spawn every 13 frames
        let food = SpriteCatalog::food();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = Spawner::new(SpawnConfig::default());

        let mut spawn_frames = Vec::new();
        for frame in 1..=200u32 {
            let now = frame as f64 * 16.0;
            if spawner.maybe_spawn(now, 800.0, &food, &mut rng).is_some() {
                spawn_frames.push(frame);
            }
        }
        assert_eq!(spawn_frames[0], 13);
        for pair in spawn_frames.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((12..=13).contains(&gap), "gap {}", gap);
        }
    }

    proptest! {
        #[test]
        fn test_spawn_x_within_surface(seed in any::<u64>(), width in -100.0f32..2000.0) {
            let food = SpriteCatalog::food();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = Spawner::new(SpawnConfig::default());

            let p = spawner.maybe_spawn(1_000.0, width, &food, &mut rng).unwrap();
            let max_x = width - p.design.pixel_width(CELL_SIZE);
            prop_assert!(p.pos.x >= 0.0);
            if max_x <= 0.0 {
                prop_assert_eq!(p.pos.x, 0.0);
            } else {
                prop_assert!(p.pos.x <= max_x);
            }
        }

        #[test]
        fn test_one_spawn_per_window(seed in any::<u64>(), frame_ms in 1.0f64..50.0) {
            let food = SpriteCatalog::food();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = Spawner::new(SpawnConfig::default());

            let mut last: Option<f64> = None;
            for frame in 1..400u32 {
                let now = frame as f64 * frame_ms;
                if spawner.maybe_spawn(now, 800.0, &food, &mut rng).is_some() {
                    if let Some(prev) = last {
                        prop_assert!(now - prev > SPAWN_INTERVAL_MS);
                    }
                    last = Some(now);
                }
            }
        }
    }
}
