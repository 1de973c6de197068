/// Screen-space track rectangle, captured once at drag start and reused for
/// every move in that drag.
#[derive(Clone, Copy, Debug)]
pub struct TrackRect {
    pub left: f32,
    pub width: f32,
}

/// Value range and quantization step of one slider.
#[derive(Clone, Copy, Debug)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// Quantize to the nearest step boundary.
pub fn quantize(value: f32, step: f32) -> f32 {
    (value / step).round() * step
}

/// Pointer-capture-driven continuous value input.
///
/// Move updates are coalesced to at most one applied update per animation
/// frame: `queue_move` stores the latest pointer position and reports
/// whether a frame callback still needs scheduling; `apply_queued` performs
/// the deferred update.
pub struct SliderControl {
    range: SliderRange,
    value: f32,
    dragging: bool,
    rect: Option<TrackRect>,
    queued_x: Option<f32>,
}

impl SliderControl {
    pub fn new(range: SliderRange, value: f32) -> Self {
        Self {
            range,
            value: value.clamp(range.min, range.max),
            dragging: false,
            rect: None,
            queued_x: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Fill fraction in 0..=1 for rendering the track.
    pub fn fraction(&self) -> f32 {
        (self.value - self.range.min) / (self.range.max - self.range.min)
    }

    /// Begin a drag: capture the track rect for the whole gesture and apply
    /// an immediate update at the press position.
    pub fn begin_drag(&mut self, client_x: f32, rect: TrackRect) -> f32 {
        self.rect = Some(rect);
        self.dragging = true;
        self.queued_x = None;
        self.apply_at(client_x)
    }

    /// Record the latest pointer position during a drag. Returns true when
    /// the caller should schedule a frame callback (none is pending yet).
    pub fn queue_move(&mut self, client_x: f32) -> bool {
        if !self.dragging {
            return false;
        }
        let needs_schedule = self.queued_x.is_none();
        self.queued_x = Some(client_x);
        needs_schedule
    }

    /// Apply the queued position, if any, returning the new value.
    pub fn apply_queued(&mut self) -> Option<f32> {
        let client_x = self.queued_x.take()?;
        Some(self.apply_at(client_x))
    }

    /// End the drag and drop any pending update.
    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.queued_x = None;
    }

    /// Resynchronize from an external value change (one that did not come
    /// from a local drag).
    pub fn sync_value(&mut self, value: f32) {
        self.value = value.clamp(self.range.min, self.range.max);
    }

    fn apply_at(&mut self, client_x: f32) -> f32 {
        let Some(rect) = self.rect else {
            return self.value;
        };
        let SliderRange { min, max, step } = self.range;
        let raw = min + (client_x - rect.left) / rect.width * (max - min);
        self.value = quantize(raw.clamp(min, max), step);
        self.value
    }
}
