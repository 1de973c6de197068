use crate::constants::FADE_DURATION_SEC;
use crate::grid::TileGrid;

/// Advances every fading cell toward rest, once per rendered frame.
pub struct FadeAnimator {
    duration: f64,
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self {
            duration: FADE_DURATION_SEC,
        }
    }
}

impl FadeAnimator {
    pub fn with_duration(duration: f64) -> Self {
        Self { duration }
    }

    /// Fade progress depends only on elapsed wall-clock time, never on how
    /// many ticks ran, so variable frame rates do not change the curve.
    pub fn tick(&self, grid: &mut TileGrid, now: f64) {
        for cell in grid.cells_mut() {
            let Some(start) = cell.fade_start else {
                continue;
            };
            let elapsed = now - start;
            if elapsed < self.duration {
                cell.opacity = (1.0 - elapsed / self.duration) as f32;
            } else {
                cell.opacity = 0.0;
                cell.highlight = None;
                cell.fade_start = None;
            }
        }
    }
}
