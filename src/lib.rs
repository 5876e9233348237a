#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{
    CurveManager, DrawList, GeometryCache, ShapeFunction, TUBE_LON_SEGMENTS, TUBE_RAD_SEGMENTS,
};
use crate::sensor::GravitySensor;
use glam::Vec3;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod core;
mod dom;
mod frame;
mod render;
mod sensor;

/// Resync the canvas backing store only after resize events settle, so the
/// render targets are not reallocated on every intermediate tick. A pending
/// deferred resync is canceled and rescheduled by each new event.
fn wire_resize_debounced(canvas: &web::HtmlCanvasElement) {
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let apply = Rc::new(Closure::wrap(Box::new({
        let canvas = canvas.clone();
        let pending = pending.clone();
        move || {
            pending.set(None);
            dom::sync_canvas_backing_size(&canvas);
        }
    }) as Box<dyn FnMut()>));
    let on_resize = Closure::wrap(Box::new({
        let pending = pending.clone();
        move || {
            if let Some(w) = web::window() {
                if let Some(handle) = pending.take() {
                    w.clear_timeout_with_handle(handle);
                }
                if let Ok(handle) = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    (*apply).as_ref().unchecked_ref(),
                    RESIZE_DEBOUNCE_MS,
                ) {
                    pending.set(Some(handle));
                }
            }
        }
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    }
    on_resize.forget();
}

fn seed_scene(
    strands: &mut CurveManager,
    strands_list: &mut DrawList,
    trunk: &mut CurveManager,
    trunk_list: &mut DrawList,
    rng: &mut StdRng,
) {
    for _ in 0..STRAND_COUNT {
        let curve = strands.acquire(strands_list);
        curve.randomize(rng);
        curve.color = Vec3::new(0.8 * rng.gen::<f32>(), 1.0, 0.8 * rng.gen::<f32>());
        curve.brightness0 = 0.0;
        curve.brightness1 = 8.0;
        curve.brightness2 = -4.0;
        curve.ra = 0.02;
        curve.rb = 0.01;
    }
    for _ in 0..TRUNK_COUNT {
        let curve = trunk.acquire(trunk_list);
        curve.randomize(rng);
        curve.color = Vec3::new(1.0, 0.6 * rng.gen::<f32>(), 0.6 * rng.gen::<f32>());
        curve.brightness0 = 2.0;
        curve.brightness1 = 0.0;
        curve.brightness2 = -2.0;
        curve.ra = 0.05;
        curve.rb = 0.005;
    }
}

fn wire_sensor_button(sensor: &GravitySensor, button: &web::HtmlElement) {
    let sensor = sensor.clone();
    let button_for_click = button.clone();
    dom::add_click_listener(button, move || {
        if !sensor.started() {
            // Off -> Listening. The button reappears as "Reset" once the
            // first motion sample arrives.
            sensor.start();
            dom::hide_element(&button_for_click);
        } else {
            // Listening/Calibrated -> Calibrated.
            sensor.calibrate();
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lumina-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::create_canvas(&document)?;
    dom::sync_canvas_backing_size(&canvas);
    wire_resize_debounced(&canvas);

    let mut rng = StdRng::from_entropy();
    let cache = Rc::new(RefCell::new(GeometryCache::new()));
    let mut strands = CurveManager::new(
        ShapeFunction::Helix,
        TUBE_LON_SEGMENTS,
        TUBE_RAD_SEGMENTS,
        cache.clone(),
    );
    let mut trunk = CurveManager::new(
        ShapeFunction::Trunk,
        TUBE_LON_SEGMENTS,
        TUBE_RAD_SEGMENTS,
        cache,
    );
    let mut strands_list = DrawList::new();
    let mut trunk_list = DrawList::new();
    seed_scene(
        &mut strands,
        &mut strands_list,
        &mut trunk,
        &mut trunk_list,
        &mut rng,
    );
    log::info!(
        "[scene] strands={} trunk={} tessellation={}x{}",
        strands.active_count(),
        trunk.active_count(),
        TUBE_LON_SEGMENTS,
        TUBE_RAD_SEGMENTS
    );

    let sensor = GravitySensor::new();
    let sensor_button = dom::create_sensor_button(&document)?;
    wire_sensor_button(&sensor, &sensor_button);

    // A missing adapter or failed device request leaves gpu = None: the page
    // stays alive, only the visuals are skipped.
    let gpu = frame::init_gpu(
        &canvas,
        &[ShapeFunction::Helix, ShapeFunction::Trunk],
        SNOW_COUNT,
        &mut rng,
    )
    .await;

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        strands,
        strands_list,
        trunk,
        trunk_list,
        sensor,
        sensor_button,
        sensor_upgraded: false,
        gpu,
        start_instant: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
