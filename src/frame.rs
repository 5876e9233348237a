use crate::camera;
use crate::core::{CurveManager, DrawList, ShapeFunction};
use crate::dom;
use crate::render;
use crate::sensor::GravitySensor;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Scene driver state, ticked once per animation frame.
pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,

    pub strands: CurveManager,
    pub strands_list: DrawList,
    pub trunk: CurveManager,
    pub trunk_list: DrawList,

    pub sensor: GravitySensor,
    pub sensor_button: web::HtmlElement,
    pub sensor_upgraded: bool,

    pub gpu: Option<render::GpuState<'a>>,

    pub start_instant: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let t = (now - self.start_instant).as_secs_f32();

        // The calibrate control appears once real tilt data exists.
        if self.sensor.available() && !self.sensor_upgraded {
            self.sensor_upgraded = true;
            dom::upgrade_sensor_button(&self.sensor_button);
        }

        self.strands.update(t);
        self.trunk.update(t);

        // Hardware tilt when available, scripted orbit otherwise.
        let view = if self.sensor.available() {
            camera::tilt_view(t, self.sensor.tilt())
        } else {
            camera::orbit_view(t)
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let scenes = [
                (&self.strands, &self.strands_list),
                (&self.trunk, &self.trunk_list),
            ];
            if let Err(e) = g.render(dt_sec, view, &scenes) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    shapes: &[ShapeFunction],
    snow_count: usize,
    rng: &mut StdRng,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, shapes, snow_count, rng).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
