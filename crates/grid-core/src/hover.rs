use glam::{Quat, Vec2};
use rand::Rng;

use crate::camera::OrthoCamera;
use crate::constants::{HIGHLIGHT_PALETTE, TILE_PLANE_Y};
use crate::grid::{CellIndex, TileGrid};

/// Resolve a pointer NDC position to the grid cell under it.
///
/// The grid is rendered inside a scene rotated by `scene_rotation_y`, so the
/// camera ray is rotated into grid-local space before intersecting the tile
/// plane. Gutter hits and off-grid hits return `None`.
pub fn pick_cell(
    grid: &TileGrid,
    camera: &OrthoCamera,
    ndc: Vec2,
    scene_rotation_y: f32,
) -> Option<CellIndex> {
    let (ro, rd) = camera.screen_ray(ndc);
    let inv_rot = Quat::from_rotation_y(-scene_rotation_y);
    let ro = inv_rot * ro;
    let rd = inv_rot * rd;
    if rd.y.abs() < 1e-6 {
        return None;
    }
    let t = (TILE_PLANE_Y - ro.y) / rd.y;
    if t < 0.0 {
        return None;
    }
    let hit = ro + rd * t;
    grid.cell_at_point(hit.x, hit.z)
}

/// Tracks which cell the pointer is over and drives enter/leave transitions.
#[derive(Default)]
pub struct HoverTracker {
    hovered: Option<CellIndex>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<CellIndex> {
        self.hovered
    }

    /// Apply one pick result.
    ///
    /// The previous cell starts fading and the new one lights up within the
    /// same call, so between calls at most one cell is in the hovered state.
    /// Re-picking the current cell is a no-op.
    pub fn update(
        &mut self,
        grid: &mut TileGrid,
        picked: Option<CellIndex>,
        now: f64,
        rng: &mut impl Rng,
    ) {
        if picked == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered {
            grid.cell_mut(prev).fade_start = Some(now);
        }
        if let Some(index) = picked {
            let cell = grid.cell_mut(index);
            cell.highlight = Some(HIGHLIGHT_PALETTE[rng.gen_range(0..HIGHLIGHT_PALETTE.len())]);
            cell.opacity = 1.0;
            cell.fade_start = None;
        }
        self.hovered = picked;
    }
}
