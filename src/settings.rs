//! Animation settings
//!
//! Persisted in LocalStorage so a page can tune the effect without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::{Physics, SpawnConfig};

/// Tunable animation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Master switch; a disabled animation never mounts
    pub enabled: bool,

    // === Sprites ===
    /// Side of one sprite cell (pixels)
    pub cell_size: f32,

    // === Spawning ===
    /// Minimum time between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Live particle cap
    pub max_particles: usize,
    pub initial_vy_min: f32,
    pub initial_vy_max: f32,
    /// Spawn rotation speed is picked in [-max, max]
    pub max_rotation_speed: f32,

    // === Physics ===
    pub gravity: f32,
    pub restitution: f32,
    pub damping: f32,
    pub fade_rate: f32,

    /// Fixed RNG seed; the host clock is used when absent
    pub seed: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,

            cell_size: CELL_SIZE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_particles: MAX_PARTICLES,
            initial_vy_min: INITIAL_VY_MIN,
            initial_vy_max: INITIAL_VY_MAX,
            max_rotation_speed: MAX_ROTATION_SPEED,

            gravity: GRAVITY,
            restitution: RESTITUTION,
            damping: DAMPING,
            fade_rate: FADE_RATE,

            seed: None,
        }
    }
}

impl AnimationSettings {
    /// Reject parameters that would break the fall/bounce/fade lifecycle
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.cell_size > 0.0) {
            return Err(SettingsError::CellSize(self.cell_size));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(SettingsError::SpawnInterval(self.spawn_interval_ms));
        }
        if !(self.gravity >= 0.0) {
            return Err(SettingsError::Gravity(self.gravity));
        }
        if !(-1.0..0.0).contains(&self.restitution) {
            return Err(SettingsError::Restitution(self.restitution));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(SettingsError::Damping(self.damping));
        }
        if !(self.fade_rate > 0.0 && self.fade_rate <= 1.0) {
            return Err(SettingsError::FadeRate(self.fade_rate));
        }
        if !(self.initial_vy_min > 0.0 && self.initial_vy_min <= self.initial_vy_max) {
            return Err(SettingsError::VelocityRange {
                min: self.initial_vy_min,
                max: self.initial_vy_max,
            });
        }
        if !(self.max_rotation_speed >= 0.0) {
            return Err(SettingsError::RotationSpeed(self.max_rotation_speed));
        }
        Ok(())
    }

    /// Integrator constants
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            restitution: self.restitution,
            damping: self.damping,
            fade_rate: self.fade_rate,
        }
    }

    /// Spawner parameters
    pub fn spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            interval_ms: self.spawn_interval_ms,
            cell_size: self.cell_size,
            initial_vy_min: self.initial_vy_min,
            initial_vy_max: self.initial_vy_max,
            max_rotation_speed: self.max_rotation_speed,
        }
    }

    /// Parse stored JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Stored settings rejected ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Stored settings unreadable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "food_rain_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
