use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_core::constants::{GRID_DIVISIONS, GRID_SIZE};
use grid_core::{CellIndex, FadeAnimator, HoverTracker, TileGrid};

fn make_grid() -> TileGrid {
    TileGrid::new(GRID_DIVISIONS, GRID_SIZE)
}

fn start_fade(grid: &mut TileGrid, index: CellIndex, now: f64) {
    let cell = grid.cell_mut(index);
    cell.highlight = Some([1.0, 1.0, 1.0]);
    cell.opacity = 1.0;
    cell.fade_start = Some(now);
}

#[test]
fn fade_is_linear_in_elapsed_time() {
    let mut grid = make_grid();
    let animator = FadeAnimator::default();
    let index = CellIndex { row: 1, col: 1 };
    start_fade(&mut grid, index, 5.0);

    animator.tick(&mut grid, 5.25);
    assert!((grid.cell(index).opacity - 0.75).abs() < 1e-6);

    animator.tick(&mut grid, 5.9);
    assert!((grid.cell(index).opacity - 0.1).abs() < 1e-6);
}

#[test]
fn fade_completion_resets_the_cell() {
    let mut grid = make_grid();
    let animator = FadeAnimator::default();
    let index = CellIndex { row: 3, col: 8 };
    start_fade(&mut grid, index, 2.0);

    animator.tick(&mut grid, 3.0);
    let cell = grid.cell(index);
    assert_eq!(cell.opacity, 0.0);
    assert!(cell.highlight.is_none());
    assert!(cell.fade_start.is_none());
}

#[test]
fn fade_progress_is_independent_of_tick_cadence() {
    let index = CellIndex { row: 4, col: 4 };
    let animator = FadeAnimator::default();

    // 60 ticks vs a single tick, both sampled at the same final instant
    let mut busy = make_grid();
    start_fade(&mut busy, index, 0.0);
    for i in 1..=60 {
        animator.tick(&mut busy, 0.6 * i as f64 / 60.0);
    }

    let mut lazy = make_grid();
    start_fade(&mut lazy, index, 0.0);
    animator.tick(&mut lazy, 0.6);

    assert!((busy.cell(index).opacity - lazy.cell(index).opacity).abs() < 1e-6);
    assert!((lazy.cell(index).opacity - 0.4).abs() < 1e-6);
}

#[test]
fn ticks_leave_hovered_and_resting_cells_alone() {
    let mut grid = make_grid();
    let animator = FadeAnimator::default();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(3);
    let index = CellIndex { row: 9, col: 9 };

    tracker.update(&mut grid, Some(index), 0.0, &mut rng);
    animator.tick(&mut grid, 100.0);

    // Hovered cell is pinned at full opacity no matter how much time passed
    assert_eq!(grid.cell(index).opacity, 1.0);
    for cell in grid.cells() {
        if cell.index != index {
            assert_eq!(cell.opacity, 0.0);
        }
    }
}

#[test]
fn hover_handoff_scenario_fades_the_previous_cell_out() {
    let mut grid = make_grid();
    let animator = FadeAnimator::default();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(11);
    let first = CellIndex { row: 2, col: 3 };
    let second = CellIndex { row: 2, col: 4 };

    tracker.update(&mut grid, Some(first), 0.0, &mut rng);
    tracker.update(&mut grid, Some(second), 0.4, &mut rng);

    animator.tick(&mut grid, 0.9);
    assert!((grid.cell(first).opacity - 0.5).abs() < 1e-6);
    assert_eq!(grid.cell(second).opacity, 1.0);

    animator.tick(&mut grid, 1.5);
    let done = grid.cell(first);
    assert_eq!(done.opacity, 0.0);
    assert!(done.highlight.is_none());
    assert_eq!(grid.cell(second).opacity, 1.0);
}
