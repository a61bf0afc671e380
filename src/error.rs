//! Error types for mounting, catalog construction and settings validation.

use thiserror::Error;

/// Errors raised while attaching the animation to a page
#[derive(Debug, Error)]
pub enum MountError {
    /// Settings have the animation switched off
    #[error("animation disabled by settings")]
    Disabled,

    /// No global `window` (not running in a browser)
    #[error("no window available")]
    NoWindow,

    /// Window has no document
    #[error("no document available")]
    NoDocument,

    /// No element with the requested id
    #[error("element not found: #{0}")]
    MissingElement(String),

    /// Element exists but is not a `<canvas>`
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    /// Canvas is not attached to a container element
    #[error("canvas #{0} has no parent element")]
    NoContainer(String),

    /// `getContext("2d")` failed or returned null
    #[error("2D rendering context unavailable")]
    ContextUnavailable,

    /// Browser refused an event listener or animation frame request
    #[error("host callback registration failed: {0}")]
    Callback(String),
}

/// Errors raised by `SpriteCatalog::new`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog must hold at least one design
    #[error("sprite catalog is empty")]
    Empty,

    /// Design has zero width or height
    #[error("design '{0}' has zero size")]
    ZeroSized(&'static str),

    /// Pixel sequence length does not match width * height
    #[error("design '{name}' has {actual} pixels, expected {expected}")]
    PixelCount {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised by `AnimationSettings::validate`
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),

    #[error("spawn interval must be positive, got {0} ms")]
    SpawnInterval(f64),

    #[error("gravity must be non-negative, got {0}")]
    Gravity(f32),

    #[error("restitution must be in [-1, 0), got {0}")]
    Restitution(f32),

    #[error("damping must be in [0, 1], got {0}")]
    Damping(f32),

    #[error("fade rate must be in (0, 1], got {0}")]
    FadeRate(f32),

    #[error("initial velocity range is invalid: {min}..{max}")]
    VelocityRange { min: f32, max: f32 },

    #[error("max rotation speed must be non-negative, got {0}")]
    RotationSpeed(f32),
}
