#![cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use grid_core::constants::{GRID_DIVISIONS, GRID_SIZE};
use grid_core::{
    DragRotation, FadeAnimator, HoverTracker, OrthoCamera, ParamDebouncer, ReverbParams, TileGrid,
};

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod sliders;

use constants::{CANVAS_ID, VOLUME_DEFAULT_DB};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_teardown(running: &Rc<Cell<bool>>, debouncer: &Rc<RefCell<ParamDebouncer>>) {
    let running = running.clone();
    let debouncer = debouncer.clone();
    let closure = Closure::wrap(Box::new(move || {
        running.set(false);
        debouncer.borrow_mut().cancel();
        log::info!("[app] teardown: frame loop stopped, pending rebuild dropped");
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("grid-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the canvas backing size in sync with CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // Renderer first, before any event wiring can observe shared state; on
    // failure the page still runs audio and input
    let grid_model = TileGrid::new(GRID_DIVISIONS, GRID_SIZE);
    let gpu = frame::init_gpu(&canvas, &grid_model).await;

    // ---------------- Interaction state ----------------
    let grid = Rc::new(RefCell::new(grid_model));
    let hover = Rc::new(RefCell::new(HoverTracker::default()));
    let drag = Rc::new(RefCell::new(DragRotation::default()));
    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let camera = Rc::new(RefCell::new(OrthoCamera::homepage(aspect)));
    let rng = Rc::new(RefCell::new(StdRng::from_entropy()));
    let clock = Rc::new(Instant::now());

    // ---------------- Audio ----------------
    let reverb_params = ReverbParams::default();
    let chain = audio::build_chain(&reverb_params, VOLUME_DEFAULT_DB)
        .map_err(|_| anyhow::anyhow!("audio init failed"))?;
    let audio = Rc::new(RefCell::new(chain));
    let debouncer = Rc::new(RefCell::new(ParamDebouncer::new(reverb_params)));

    // Pointer handlers (move/down/up)
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        grid: grid.clone(),
        hover: hover.clone(),
        drag: drag.clone(),
        camera: camera.clone(),
        rng: rng.clone(),
        audio: audio.clone(),
        clock: clock.clone(),
    });

    // HUD sliders
    sliders::wire_all(&document, debouncer.clone(), audio.clone(), clock.clone());

    let running = Rc::new(Cell::new(true));
    wire_teardown(&running, &debouncer);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        grid,
        drag,
        fade: FadeAnimator::default(),
        debouncer,
        audio,
        camera,
        canvas,
        gpu,
        clock,
    }));
    frame::start_loop(frame_ctx, running);

    Ok(())
}
