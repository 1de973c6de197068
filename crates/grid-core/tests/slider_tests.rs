use grid_core::{quantize, SliderControl, SliderRange, TrackRect};

const UNIT: SliderRange = SliderRange {
    min: 0.0,
    max: 1.0,
    step: 0.01,
};

fn track() -> TrackRect {
    TrackRect {
        left: 0.0,
        width: 100.0,
    }
}

#[test]
fn quantize_snaps_to_the_nearest_step() {
    assert!((quantize(0.2345, 0.01) - 0.23).abs() < 1e-6);
    assert!((quantize(0.2367, 0.01) - 0.24).abs() < 1e-6);
    assert!((quantize(-12.4, 1.0) + 12.0).abs() < 1e-6);
}

#[test]
fn press_position_maps_and_quantizes() {
    let mut slider = SliderControl::new(UNIT, 0.0);
    let value = slider.begin_drag(23.45, track());
    assert!((value - 0.23).abs() < 1e-6);
    assert!(slider.is_dragging());
}

#[test]
fn quantization_is_idempotent_without_movement() {
    let mut slider = SliderControl::new(UNIT, 0.0);
    let first = slider.begin_drag(23.45, track());
    assert!(slider.queue_move(23.45));
    let second = slider.apply_queued().expect("queued update");
    assert_eq!(first, second);
}

#[test]
fn values_clamp_to_the_range() {
    let mut slider = SliderControl::new(UNIT, 0.5);
    assert!((slider.begin_drag(250.0, track()) - 1.0).abs() < 1e-6);
    assert!(slider.queue_move(-40.0));
    let value = slider.apply_queued().expect("queued update");
    assert!(value.abs() < 1e-6);
}

#[test]
fn moves_coalesce_to_one_update_per_frame() {
    let mut slider = SliderControl::new(UNIT, 0.0);
    slider.begin_drag(0.0, track());

    // Only the first queued move asks for a frame; later ones replace it
    assert!(slider.queue_move(10.0));
    assert!(!slider.queue_move(20.0));
    assert!(!slider.queue_move(30.0));

    let value = slider.apply_queued().expect("queued update");
    assert!((value - 0.3).abs() < 1e-6);
    assert_eq!(slider.apply_queued(), None);

    // The next move schedules again
    assert!(slider.queue_move(40.0));
}

#[test]
fn the_rect_is_captured_once_per_drag() {
    let mut slider = SliderControl::new(UNIT, 0.0);
    slider.begin_drag(
        50.0,
        TrackRect {
            left: 0.0,
            width: 100.0,
        },
    );
    assert!((slider.value() - 0.5).abs() < 1e-6);

    // A second gesture with a moved track uses the newly captured rect
    slider.end_drag();
    slider.begin_drag(
        150.0,
        TrackRect {
            left: 100.0,
            width: 200.0,
        },
    );
    assert!((slider.value() - 0.25).abs() < 1e-6);
}

#[test]
fn ending_the_drag_cancels_pending_updates() {
    let mut slider = SliderControl::new(UNIT, 0.0);
    slider.begin_drag(0.0, track());
    slider.queue_move(80.0);
    slider.end_drag();
    assert_eq!(slider.apply_queued(), None);
    assert!(!slider.is_dragging());
    assert_eq!(slider.value(), 0.0);
}

#[test]
fn moves_without_a_drag_are_dropped() {
    let mut slider = SliderControl::new(UNIT, 0.4);
    assert!(!slider.queue_move(90.0));
    assert_eq!(slider.apply_queued(), None);
    assert!((slider.value() - 0.4).abs() < 1e-6);
}

#[test]
fn external_value_changes_resynchronize_local_state() {
    let mut slider = SliderControl::new(UNIT, 0.2);
    slider.sync_value(0.75);
    assert!((slider.value() - 0.75).abs() < 1e-6);
    slider.sync_value(3.0);
    assert_eq!(slider.value(), 1.0);
}

#[test]
fn fraction_reflects_the_range() {
    let volume = SliderControl::new(
        SliderRange {
            min: -60.0,
            max: 0.0,
            step: 1.0,
        },
        -12.0,
    );
    assert!((volume.fraction() - 0.8).abs() < 1e-6);
}
