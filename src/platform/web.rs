//! Browser glue
//!
//! Mounts the scheduler on a `<canvas>`, drives it from
//! `requestAnimationFrame` and keeps the canvas sized to its parent.
//! Teardown sets a stop flag, cancels the pending frame and detaches the
//! resize listener, so no state is touched after `unmount`. Callbacks only
//! hold weak references; the `FoodRain` handle owns the engine.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, Window};

use super::CallbackTarget;
use crate::error::MountError;
use crate::renderer::CanvasSurface;
use crate::settings::AnimationSettings;
use crate::sim::{AnimationScheduler, SchedulerPhase, SpriteCatalog, SurfaceSize, TickOutcome};

/// Canvas id used by the auto-start entry point
pub const DEFAULT_CANVAS_ID: &str = "food-rain";

/// Consecutive unavailable frames before the canvas is treated as gone (~2 s)
const MAX_DETACHED_FRAMES: u32 = 120;

struct Engine {
    scheduler: AnimationScheduler,
    surface: CanvasSurface,
    container: Element,
    window: Window,
    /// Pending `requestAnimationFrame` id
    frame_id: Option<i32>,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
    stopped: bool,
    detached_frames: u32,
}

/// Handle to a mounted animation; dropping it tears the animation down
#[wasm_bindgen]
pub struct FoodRain {
    engine: Rc<RefCell<Engine>>,
}

#[wasm_bindgen]
impl FoodRain {
    /// Stop the animation and release its listeners (idempotent)
    pub fn unmount(&self) {
        teardown(&self.engine);
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.engine
            .try_borrow()
            .map(|e| !e.stopped)
            .unwrap_or(true)
    }

    /// Persist the settings this animation runs with
    #[wasm_bindgen(js_name = saveSettings)]
    pub fn save_settings(&self) {
        if let Ok(e) = self.engine.try_borrow() {
            e.scheduler.settings().save();
        }
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.engine
            .try_borrow()
            .map(|e| e.scheduler.particles().len())
            .unwrap_or(0)
    }
}

impl Drop for FoodRain {
    fn drop(&mut self) {
        teardown(&self.engine);
    }
}

/// JS entry: mount on `canvas_id` with stored settings
#[wasm_bindgen(js_name = mountFoodRain)]
pub fn mount_food_rain(canvas_id: &str) -> Result<FoodRain, JsValue> {
    mount(canvas_id, AnimationSettings::load()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Auto-start on `#food-rain` if the page has one
pub fn start() {
    match mount(DEFAULT_CANVAS_ID, AnimationSettings::load()) {
        // Runs for the page lifetime
        Ok(handle) => std::mem::forget(handle),
        Err(MountError::Disabled) => log::info!("Food rain disabled by settings"),
        Err(MountError::MissingElement(id)) => {
            log::debug!("No #{} canvas on this page", id);
        }
        Err(e) => log::warn!("Food rain not started: {}", e),
    }
}

/// Attach the animation to the canvas with id `canvas_id`
pub fn mount(canvas_id: &str, settings: AnimationSettings) -> Result<FoodRain, MountError> {
    if !settings.enabled {
        return Err(MountError::Disabled);
    }

    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| MountError::MissingElement(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::NotACanvas(canvas_id.to_string()))?;
    let container = canvas
        .parent_element()
        .ok_or_else(|| MountError::NoContainer(canvas_id.to_string()))?;

    let mut surface = CanvasSurface::new(canvas)?;
    let seed = settings.seed.unwrap_or_else(super::clock_seed);
    let mut scheduler = AnimationScheduler::new(SpriteCatalog::food(), settings, seed);
    if scheduler.mount(&mut surface, content_box(&window, &container)) == SchedulerPhase::Stopped {
        return Err(MountError::ContextUnavailable);
    }

    let engine = Rc::new(RefCell::new(Engine {
        scheduler,
        surface,
        container,
        window: window.clone(),
        frame_id: None,
        on_resize: None,
        stopped: false,
        detached_frames: 0,
    }));

    let target = CallbackTarget::new(&engine);
    let on_resize = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        target.with(handle_resize);
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|e| MountError::Callback(format!("{:?}", e)))?;
    engine.borrow_mut().on_resize = Some(on_resize);

    let handle = FoodRain { engine };
    request_frame(&handle.engine)?;
    Ok(handle)
}

/// Content box (client size minus padding) of the canvas container
fn content_box(window: &Window, container: &Element) -> SurfaceSize {
    let mut width = container.client_width() as f64;
    let mut height = container.client_height() as f64;

    if let Ok(Some(style)) = window.get_computed_style(container) {
        let px = |name: &str| {
            style
                .get_property_value(name)
                .ok()
                .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        width -= px("padding-left") + px("padding-right");
        height -= px("padding-top") + px("padding-bottom");
    }

    SurfaceSize::from_content_box(width, height)
}

fn handle_resize(engine: &Rc<RefCell<Engine>>) {
    let Ok(mut e) = engine.try_borrow_mut() else {
        return;
    };
    if e.stopped {
        return;
    }
    let size = content_box(&e.window, &e.container);
    let Engine {
        scheduler, surface, ..
    } = &mut *e;
    scheduler.resize(surface, size);
}

fn request_frame(engine: &Rc<RefCell<Engine>>) -> Result<(), MountError> {
    // A cancelled frame never runs, so the forgotten closure must not own the engine
    let target = CallbackTarget::new(engine);
    let closure = Closure::once(move |time: f64| {
        target.with(|engine| on_frame(engine, time));
    });

    let mut e = engine.borrow_mut();
    let id = e
        .window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|err| MountError::Callback(format!("{:?}", err)))?;
    e.frame_id = Some(id);
    closure.forget();
    Ok(())
}

fn on_frame(engine: &Rc<RefCell<Engine>>, time: f64) {
    let (outcome, gone) = {
        let mut e = engine.borrow_mut();
        e.frame_id = None;
        if e.stopped {
            return;
        }

        let Engine {
            scheduler,
            surface,
            detached_frames,
            ..
        } = &mut *e;
        let outcome = scheduler.tick(time, surface);
        if outcome == TickOutcome::Skipped {
            *detached_frames += 1;
        } else {
            *detached_frames = 0;
        }
        (outcome, *detached_frames > MAX_DETACHED_FRAMES)
    };

    if gone {
        log::info!("Canvas detached from the document, stopping");
        teardown(engine);
        return;
    }
    if outcome.should_reschedule() {
        if let Err(e) = request_frame(engine) {
            log::warn!("Animation stopped: {}", e);
            teardown(engine);
        }
    }
}

fn teardown(engine: &Rc<RefCell<Engine>>) {
    let Ok(mut e) = engine.try_borrow_mut() else {
        log::warn!("teardown while engine busy");
        return;
    };
    if e.stopped {
        return;
    }
    e.stopped = true;

    if let Some(id) = e.frame_id.take() {
        let _ = e.window.cancel_animation_frame(id);
    }
    if let Some(on_resize) = e.on_resize.take() {
        let _ = e
            .window
            .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    }
    e.scheduler.unmount();
}
