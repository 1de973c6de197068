// Web front-end tuning constants.

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const SLIDER_DECAY_ID: &str = "slider-reverb-decay";
pub const SLIDER_PREDELAY_ID: &str = "slider-reverb-predelay";
pub const SLIDER_WET_ID: &str = "slider-reverb-wet";
pub const SLIDER_VOLUME_ID: &str = "slider-volume";

// Grid line colors; vertex alpha already includes the material opacity
pub const LINE_OPACITY: f32 = 0.7;
pub const GRID_LINE_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 0.15 * LINE_OPACITY];
pub const CROSS_RGBA: [f32; 4] = [0.741, 0.741, 0.741, 0.4 * LINE_OPACITY]; // #BDBDBD
pub const CROSS_ARM_FRACTION: f32 = 1.0 / 6.0; // cross arm length as a fraction of cell pitch

// Note one-shot envelope
pub const NOTE_ATTACK_SEC: f64 = 0.02;
pub const NOTE_GAIN: f32 = 0.3; // per-note level; four notes sound at once
pub const VOLUME_DEFAULT_DB: f32 = -12.0;

// Reverb impulse response bounds (seconds)
pub const IR_DECAY_MIN_SEC: f64 = 1.0;
pub const IR_DECAY_MAX_SEC: f64 = 30.0;
pub const PRE_DELAY_MAX_SEC: f64 = 1.0;
