use crate::constants::{ROTATION_CLAMP_RAD, ROTATION_DRAG_GAIN, ROTATION_RETURN_DECAY};

/// Converts horizontal drag deltas into a bounded scene rotation, with an
/// elastic return to rest after release.
///
/// While a drag is active, hover picking must be suppressed by the caller so
/// a rotation gesture never also paints highlights.
#[derive(Default)]
pub struct DragRotation {
    dragging: bool,
    origin_x: f32,
    rotation_y: f32,
}

impl DragRotation {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current scene rotation in radians, applied to the whole scene.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn on_pointer_down(&mut self, ndc_x: f32) {
        self.dragging = true;
        self.origin_x = ndc_x;
    }

    pub fn on_pointer_move(&mut self, ndc_x: f32) {
        if !self.dragging {
            return;
        }
        let delta = ndc_x - self.origin_x;
        self.rotation_y =
            (delta * ROTATION_DRAG_GAIN).clamp(-ROTATION_CLAMP_RAD, ROTATION_CLAMP_RAD);
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Per-frame elastic return. The angle never reaches exactly zero; it
    /// drops below visual perception within a second or two.
    pub fn tick(&mut self) {
        if !self.dragging {
            self.rotation_y *= ROTATION_RETURN_DECAY;
        }
    }
}
