//! Food Rain entry point
//!
//! On the web this mounts the animation on `#food-rain`. Natively it runs a
//! headless simulation against a recording surface and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Food rain starting...");
    food_rain::platform::web::start();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use food_rain::AnimationSettings;
    use food_rain::renderer::{RecordingSurface, Surface};
    use food_rain::sim::{AnimationScheduler, SpriteCatalog, SurfaceSize};

    /// Frame spacing of a 60 Hz display
    const FRAME_MS: f64 = 16.0;
    const FRAMES: u32 = 1_200;

    env_logger::init();
    log::info!("Food rain (native) starting...");
    log::info!("Native mode renders headless - serve the wasm build for the real canvas");

    let settings = AnimationSettings::load();
    let seed = settings.seed.unwrap_or_else(food_rain::platform::clock_seed);
    let mut scheduler = AnimationScheduler::new(SpriteCatalog::food(), settings, seed);
    let mut surface = RecordingSurface::new(0, 0);
    scheduler.mount(&mut surface, SurfaceSize::new(800, 400));

    let mut peak = 0;
    let mut rects = 0;
    for frame in 1..=FRAMES {
        if frame == FRAMES / 2 {
            scheduler.resize(&mut surface, SurfaceSize::new(480, 320));
        }
        scheduler.tick(frame as f64 * FRAME_MS, &mut surface);
        peak = peak.max(scheduler.particles().len());
        rects += surface.filled_rects().len();
        surface.take_commands();
    }

    if let Some(state) = scheduler.state() {
        log::info!(
            "{} ticks: {} spawned, {} expired, {} live (peak {}), {} cells painted, surface {}x{}",
            state.ticks(),
            state.spawned(),
            state.pruned(),
            state.particles().len(),
            peak,
            rects,
            surface.width(),
            surface.height()
        );
    }
    scheduler.unmount();
}
