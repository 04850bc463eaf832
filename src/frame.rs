use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use crate::stage::{apply_style, DomMeasure, SharedDirector};
use folio_core::{FrameInput, Scene};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Cleared by `teardown()`; loops stop rescheduling on their next tick.
pub type Alive = Rc<Cell<bool>>;

/// Tweens and scroll triggers, one director step per frame.
pub struct DirectorFrame {
    pub director: SharedDirector,
    pub measure: DomMeasure,
    pub last_instant: Instant,
}

impl DirectorFrame {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let mut director = self.director.borrow_mut();
        director.tick(dt, &self.measure);
        director.flush(apply_style);
    }
}

/// Background scene: update from elapsed time and shared input, then draw.
pub struct SceneFrame {
    pub scene: Rc<RefCell<Scene>>,
    pub input: Rc<RefCell<FrameInput>>,
    pub gpu: render::GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
}

impl SceneFrame {
    pub fn frame(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        let input = *self.input.borrow();
        let mut scene = self.scene.borrow_mut();
        scene.update(t, &input);

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        match self.gpu.render(&mut scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// Drive `tick` from requestAnimationFrame until `alive` is cleared.
pub fn start_loop(alive: Alive, mut tick: impl FnMut() + 'static) {
    let handle: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle_tick = handle.clone();
    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            return;
        }
        tick();
        request_frame(&handle_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&handle);
}

fn request_frame(handle: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = handle.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
