use glam::Vec3;

// Grid and interaction tuning constants shared by the core state machines.

// Grid footprint
pub const GRID_SIZE: f32 = 240.0; // world-space edge length of the full grid
pub const GRID_DIVISIONS: usize = 45; // cells per axis
pub const TILE_SHRINK: f32 = 0.94; // visible tile size as a fraction of cell pitch, leaves gutters
pub const TILE_PLANE_Y: f32 = 0.01; // tiles sit just above the grid lines

// Hover fade
pub const FADE_DURATION_SEC: f64 = 1.0;

// Highlight palette (sRGB 0..1); one entry is picked uniformly on hover enter
pub const HIGHLIGHT_PALETTE: [[f32; 3]; 4] = [
    [0.627, 0.518, 0.910], // #A084E8
    [0.200, 0.733, 0.773], // #33BBC5
    [0.522, 0.902, 0.773], // #85E6C5
    [0.784, 1.000, 0.878], // #C8FFE0
];

// Drag rotation
pub const ROTATION_DRAG_GAIN: f32 = 0.5; // NDC delta to radians
pub const ROTATION_CLAMP_RAD: f32 = 0.26; // ~15 degrees each way
pub const ROTATION_RETURN_DECAY: f32 = 0.9; // per-frame multiplier after release

// Reverb rebuild debounce
pub const REBUILD_DEBOUNCE_SEC: f64 = 0.1;

// Camera (orthographic, fixed look-at on the origin)
pub const FRUSTUM_HEIGHT: f32 = 100.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(30.0, 35.0, 50.0);
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
