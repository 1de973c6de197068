use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

use grid_core::{pick_cell, random_burst, DragRotation, HoverTracker, OrthoCamera, TileGrid};

use crate::audio::{self, AudioChain};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub grid: Rc<RefCell<TileGrid>>,
    pub hover: Rc<RefCell<HoverTracker>>,
    pub drag: Rc<RefCell<DragRotation>>,
    pub camera: Rc<RefCell<OrthoCamera>>,
    pub rng: Rc<RefCell<StdRng>>,
    pub audio: Rc<RefCell<AudioChain>>,
    pub clock: Rc<Instant>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

#[inline]
fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let width = rect.width().max(1.0) as f32;
    let height = rect.height().max(1.0) as f32;
    let x = ev.client_x() as f32 - rect.left() as f32;
    let y = ev.client_y() as f32 - rect.top() as f32;
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = pointer_ndc(&ev, &w.canvas);

        let mut drag = w.drag.borrow_mut();
        if drag.is_dragging() {
            // A rotation gesture never also paints highlights
            drag.on_pointer_move(ndc.x);
            return;
        }
        let rotation = drag.rotation_y();
        drop(drag);

        let picked = pick_cell(&w.grid.borrow(), &w.camera.borrow(), ndc, rotation);
        let now = w.clock.elapsed().as_secs_f64();
        w.hover.borrow_mut().update(
            &mut w.grid.borrow_mut(),
            picked,
            now,
            &mut *w.rng.borrow_mut(),
        );
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = pointer_ndc(&ev, &w.canvas);
        w.drag.borrow_mut().on_pointer_down(ndc.x);

        let burst = random_burst(&mut *w.rng.borrow_mut());
        {
            let audio = w.audio.borrow();
            _ = audio.ctx.resume();
            audio::trigger_note_burst(&audio, &burst);
        }
        log::info!("[pointer] drag begin, notes {:?}", &burst[..]);

        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    // Window-level so releases outside the canvas still end the drag
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.drag.borrow_mut().on_pointer_up();
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
