use crate::core::GravityFilter;
use glam::Vec3;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser binding for the orientation filter.
///
/// `devicemotion` events write into the shared `GravityFilter`; the frame
/// loop reads the smoothed estimate once per animation frame. Both run on the
/// same cooperative timeline, so every read observes a completed filter
/// update.
#[derive(Clone)]
pub struct GravitySensor {
    filter: Rc<RefCell<GravityFilter>>,
    started: Rc<Cell<bool>>,
}

impl Default for GravitySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl GravitySensor {
    pub fn new() -> Self {
        Self {
            filter: Rc::new(RefCell::new(GravityFilter::new())),
            started: Rc::new(Cell::new(false)),
        }
    }

    /// Bind the motion-event source and request motion permission where the
    /// platform gates it. Idempotent; a second call is a no-op.
    pub fn start(&self) {
        if self.started.replace(true) {
            return;
        }
        self.bind_events();
        request_motion_permission();
    }

    fn bind_events(&self) {
        let filter = self.filter.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::DeviceMotionEvent| {
            let Some(acc) = ev.acceleration_including_gravity() else {
                return;
            };
            let raw = Vec3::new(
                acc.x().unwrap_or(0.0) as f32,
                acc.y().unwrap_or(0.0) as f32,
                acc.z().unwrap_or(0.0) as f32,
            );
            filter.borrow_mut().ingest(raw, screen_orientation_angle());
        }) as Box<dyn FnMut(web::DeviceMotionEvent)>);
        if let Some(w) = web::window() {
            let _ =
                w.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    pub fn started(&self) -> bool {
        self.started.get()
    }

    /// True once real sensor data has arrived. Stays false forever on
    /// platforms without motion events; callers keep the scripted camera.
    pub fn available(&self) -> bool {
        self.filter.borrow().available()
    }

    pub fn calibrate(&self) {
        self.filter.borrow_mut().calibrate();
    }

    pub fn tilt(&self) -> Vec3 {
        self.filter.borrow().tilt()
    }

    pub fn smoothed(&self) -> Vec3 {
        self.filter.borrow().smoothed()
    }
}

fn screen_orientation_angle() -> f32 {
    web::window()
        .and_then(|w| w.screen().ok())
        .map(|s| s.orientation())
        .and_then(|o| o.angle().ok())
        .map(|a| a as f32)
        .unwrap_or(0.0)
}

/// iOS-style permission gate: `DeviceMotionEvent.requestPermission()` when it
/// exists. Fire-and-forget; denial just means no events ever arrive.
fn request_motion_permission() {
    let Some(w) = web::window() else {
        return;
    };
    let Ok(ctor) = js_sys::Reflect::get(&w, &JsValue::from_str("DeviceMotionEvent")) else {
        return;
    };
    let Ok(request) = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")) else {
        return;
    };
    if let Some(f) = request.dyn_ref::<js_sys::Function>() {
        let _ = f.call0(&ctor);
    }
}
