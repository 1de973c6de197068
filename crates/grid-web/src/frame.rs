use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use grid_core::{DragRotation, FadeAnimator, OrthoCamera, ParamDebouncer, TileGrid};

use crate::audio::{self, AudioChain};
use crate::render;

pub struct FrameContext {
    pub grid: Rc<RefCell<TileGrid>>,
    pub drag: Rc<RefCell<DragRotation>>,
    pub fade: FadeAnimator,
    pub debouncer: Rc<RefCell<ParamDebouncer>>,
    pub audio: Rc<RefCell<AudioChain>>,
    pub camera: Rc<RefCell<OrthoCamera>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    pub clock: Rc<Instant>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.clock.elapsed().as_secs_f64();

        // Pointer handlers ran to completion before this tick; the animators
        // read their settled state.
        self.fade.tick(&mut self.grid.borrow_mut(), now);
        self.drag.borrow_mut().tick();

        if let Some(params) = self.debouncer.borrow_mut().poll(now) {
            audio::rebuild_reverb(&mut self.audio.borrow_mut(), &params);
        }

        if let Some(g) = &mut self.gpu {
            let width = self.canvas.width();
            let height = self.canvas.height();
            g.resize_if_needed(width, height);
            self.camera
                .borrow_mut()
                .set_aspect(width as f32 / height.max(1) as f32);

            let rotation = self.drag.borrow().rotation_y();
            let instances = render::tile_instances(&self.grid.borrow());
            let view_proj = self.camera.borrow().view_proj();
            if let Err(e) = g.render(view_proj, rotation, &instances) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    grid: &TileGrid,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, grid).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, running: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            // Teardown: stop requesting frames
            return;
        }
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
