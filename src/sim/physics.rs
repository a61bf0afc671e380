//! Per-tick particle integration
//!
//! Motion is in per-tick units: host frame rate changes the apparent speed.
//! Each particle falls, bounces exactly once off its ground line, then fades.

use super::particle::Particle;
use crate::consts::*;

/// Integrator constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// Added to `vy` every tick
    pub gravity: f32,
    /// Multiplies `vy` at the bounce (negative)
    pub restitution: f32,
    /// Multiplies `rotation_speed` at the bounce
    pub damping: f32,
    /// Alpha removed per tick after the bounce
    pub fade_rate: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,
            damping: DAMPING,
            fade_rate: FADE_RATE,
        }
    }
}

/// Advance a particle by one tick
///
/// `ground_y` is the top-left y at which the sprite touches the bottom of the
/// surface (see [`Particle::ground_y`]). The bounce tick itself does not fade;
/// fading starts on the following tick.
pub fn update(particle: &mut Particle, ground_y: f32, physics: &Physics) {
    particle.vy += physics.gravity;
    particle.pos.y += particle.vy;
    particle.rotation += particle.rotation_speed;

    if !particle.bounced {
        if particle.pos.y > ground_y {
            particle.pos.y = ground_y;
            particle.vy *= physics.restitution;
            particle.rotation_speed *= physics.damping;
            particle.bounced = true;
            log::trace!("{} bounced at y={}", particle.design.name, ground_y);
        }
    } else {
        particle.alpha = (particle.alpha - physics.fade_rate).max(0.0);
        if particle.alpha < ALPHA_EPSILON {
            particle.alpha = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SpriteCatalog;
    use glam::Vec2;
    use proptest::prelude::*;

    fn falling(vy: f32, y: f32) -> Particle {
        let design = &SpriteCatalog::food().designs()[0];
        Particle::new(design, Vec2::new(10.0, y), vy, 0.04)
    }

    #[test]
    fn test_gravity_accumulates() {
        let physics = Physics {
            gravity: 0.05,
            ..Default::default()
        };
        let mut p = falling(0.5, 0.0);
        for _ in 0..10 {
            update(&mut p, 10_000.0, &physics);
        }
        assert!((p.vy - 1.0).abs() < 1e-5);
        assert!(!p.bounced);
        assert_eq!(p.alpha, 1.0);
        assert!((p.rotation - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_clamps_and_rebounds() {
        let physics = Physics {
            gravity: 0.0,
            ..Default::default()
        };
        let mut p = falling(1.2, 99.5);
        update(&mut p, 100.0, &physics);

        assert!(p.bounced);
        assert_eq!(p.pos.y, 100.0);
        assert!((p.vy - (-0.48)).abs() < 1e-6);
        assert!((p.rotation_speed - 0.02).abs() < 1e-6);
        assert_eq!(p.alpha, 1.0);
    }

    #[test]
    fn test_touching_ground_is_not_a_bounce() {
        let physics = Physics {
            gravity: 0.0,
            ..Default::default()
        };
        let mut p = falling(1.0, 99.0);
        update(&mut p, 100.0, &physics);
        assert_eq!(p.pos.y, 100.0);
        assert!(!p.bounced);
    }

    #[test]
    fn test_fade_after_bounce() {
        let physics = Physics::default();
        let mut p = falling(1.0, 0.0);
        p.bounced = true;
        update(&mut p, 100.0, &physics);
        assert!((p.alpha - (1.0 - FADE_RATE)).abs() < 1e-6);
        update(&mut p, 100.0, &physics);
        assert!((p.alpha - (1.0 - 2.0 * FADE_RATE)).abs() < 1e-6);
    }

    #[test]
    fn test_fade_reaches_exact_zero() {
        let physics = Physics::default();
        let mut p = falling(0.0, 0.0);
        p.bounced = true;

        let mut ticks = 0;
        while !p.is_dead() {
            update(&mut p, 1_000.0, &physics);
            ticks += 1;
        }
        assert_eq!(ticks, 50);
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn test_no_second_bounce() {
        let physics = Physics::default();
        let mut p = falling(5.0, 95.0);
        update(&mut p, 100.0, &physics);
        assert!(p.bounced);
        let vy_after = p.vy;

        // Rebound then fall back well past the ground line
        for _ in 0..200 {
            update(&mut p, 100.0, &physics);
        }
        assert!(p.pos.y > 100.0);
        assert!(p.vy > vy_after.abs());
    }

    proptest! {
        #[test]
        fn test_bounced_flips_once(vy in 0.1f32..4.0, ground in 20.0f32..400.0, ticks in 1usize..600) {
            let physics = Physics::default();
            let mut p = falling(vy, 0.0);
            let mut flips = 0;
            let mut prev_vy = p.vy;
            for _ in 0..ticks {
                let was = p.bounced;
                let vy_before = p.vy;
                update(&mut p, ground, &physics);
                if !was && p.bounced {
                    flips += 1;
                    prop_assert_eq!(p.pos.y, ground);
                    prop_assert!((p.vy - (vy_before + physics.gravity) * physics.restitution).abs() < 1e-4);
                } else if !p.bounced {
                    prop_assert!(p.vy >= prev_vy);
                    prop_assert_eq!(p.alpha, 1.0);
                }
                prev_vy = p.vy;
                prop_assert!(was <= p.bounced);
                prop_assert!((0.0..=1.0).contains(&p.alpha));
            }
            prop_assert!(flips <= 1);
        }
    }
}
