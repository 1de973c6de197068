use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use grid_core::{ParamDebouncer, ReverbUpdate, SliderControl, SliderRange, TrackRect};

use crate::audio::{self, AudioChain};
use crate::constants::{
    SLIDER_DECAY_ID, SLIDER_PREDELAY_ID, SLIDER_VOLUME_ID, SLIDER_WET_ID, VOLUME_DEFAULT_DB,
};
use crate::dom;

/// Wire the four HUD controls. Each slider listens on its own track element
/// with pointer capture, so the scene's canvas handlers never see the
/// gesture and no stop-propagation coupling is needed.
pub fn wire_all(
    document: &web::Document,
    debouncer: Rc<RefCell<ParamDebouncer>>,
    audio: Rc<RefCell<AudioChain>>,
    clock: Rc<Instant>,
) {
    let params = debouncer.borrow().params();

    {
        let debouncer = debouncer.clone();
        let audio = audio.clone();
        let clock = clock.clone();
        wire_slider(
            document,
            SLIDER_DECAY_ID,
            SliderRange {
                min: 1.0,
                max: 30.0,
                step: 0.1,
            },
            params.decay as f32,
            Rc::new(move |value| {
                let now = clock.elapsed().as_secs_f64();
                let live = debouncer.borrow_mut().update(
                    ReverbUpdate {
                        decay: Some(value as f64),
                        ..Default::default()
                    },
                    now,
                );
                audio::apply_live_changes(&audio.borrow(), &live);
            }),
        );
    }

    {
        let debouncer = debouncer.clone();
        let audio = audio.clone();
        let clock = clock.clone();
        wire_slider(
            document,
            SLIDER_PREDELAY_ID,
            SliderRange {
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
            params.pre_delay as f32,
            Rc::new(move |value| {
                let now = clock.elapsed().as_secs_f64();
                let live = debouncer.borrow_mut().update(
                    ReverbUpdate {
                        pre_delay: Some(value as f64),
                        ..Default::default()
                    },
                    now,
                );
                audio::apply_live_changes(&audio.borrow(), &live);
            }),
        );
    }

    {
        let debouncer = debouncer.clone();
        let audio = audio.clone();
        wire_slider(
            document,
            SLIDER_WET_ID,
            SliderRange {
                min: 0.0,
                max: 1.0,
                step: 0.01,
            },
            params.wet as f32,
            Rc::new(move |value| {
                let now = clock.elapsed().as_secs_f64();
                let live = debouncer.borrow_mut().update(
                    ReverbUpdate {
                        wet: Some(value as f64),
                        ..Default::default()
                    },
                    now,
                );
                audio::apply_live_changes(&audio.borrow(), &live);
            }),
        );
    }

    wire_slider(
        document,
        SLIDER_VOLUME_ID,
        SliderRange {
            min: -60.0,
            max: 0.0,
            step: 1.0,
        },
        VOLUME_DEFAULT_DB,
        Rc::new(move |value| {
            audio::set_volume_db(&audio.borrow(), value);
        }),
    );
}

/// Wire one track/fill pair as a pointer-capture slider.
///
/// Moves coalesce to one applied update per animation frame: the move
/// handler queues the latest pointer position and schedules the shared
/// apply closure only when none is pending; pointer-up cancels a still
/// pending frame.
pub fn wire_slider(
    document: &web::Document,
    id: &str,
    range: SliderRange,
    initial: f32,
    on_change: Rc<dyn Fn(f32)>,
) {
    let Some(track) = dom::html_element_by_id(document, id) else {
        log::warn!("[ui] slider #{id} missing; control disabled");
        return;
    };
    let fill = dom::html_element_by_id(document, &format!("{id}-fill"));

    let control = Rc::new(RefCell::new(SliderControl::new(range, initial)));
    if let Some(el) = &fill {
        dom::set_width_percent(el, control.borrow().fraction());
    }

    let raf_handle: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));

    // Shared apply closure, fired once per scheduled frame
    let apply: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let control = control.clone();
        let fill = fill.clone();
        let on_change = on_change.clone();
        let raf_handle = raf_handle.clone();
        *apply.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            *raf_handle.borrow_mut() = None;
            let applied = control.borrow_mut().apply_queued();
            if let Some(value) = applied {
                if let Some(el) = &fill {
                    dom::set_width_percent(el, control.borrow().fraction());
                }
                on_change(value);
            }
        }) as Box<dyn FnMut()>));
    }

    // pointerdown on the track: capture the rect and the pointer, apply an
    // immediate update at the press position
    {
        let control = control.clone();
        let fill = fill.clone();
        let on_change = on_change.clone();
        let track_el = track.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let rect = track_el.get_bounding_client_rect();
            let value = control.borrow_mut().begin_drag(
                ev.client_x() as f32,
                TrackRect {
                    left: rect.left() as f32,
                    width: rect.width().max(1.0) as f32,
                },
            );
            if let Some(el) = &fill {
                dom::set_width_percent(el, control.borrow().fraction());
            }
            on_change(value);
            _ = track_el.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        _ = track.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove on the window: queue the latest position
    {
        let control = control.clone();
        let apply = apply.clone();
        let raf_handle = raf_handle.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !control.borrow().is_dragging() {
                return;
            }
            if control.borrow_mut().queue_move(ev.client_x() as f32) {
                if let Some(w) = web::window() {
                    if let Ok(handle) = w.request_animation_frame(
                        apply.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    ) {
                        *raf_handle.borrow_mut() = Some(handle);
                    }
                }
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(w) = web::window() {
            _ = w.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerup on the window: end the drag, cancel a pending frame
    {
        let control = control.clone();
        let raf_handle = raf_handle.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if !control.borrow().is_dragging() {
                return;
            }
            control.borrow_mut().end_drag();
            if let Some(handle) = raf_handle.borrow_mut().take() {
                if let Some(w) = web::window() {
                    _ = w.cancel_animation_frame(handle);
                }
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(w) = web::window() {
            _ = w.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}
