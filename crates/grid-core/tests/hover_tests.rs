use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_core::constants::{GRID_DIVISIONS, GRID_SIZE, HIGHLIGHT_PALETTE};
use grid_core::{pick_cell, CellIndex, HoverTracker, OrthoCamera, TileGrid};

fn make_grid() -> TileGrid {
    TileGrid::new(GRID_DIVISIONS, GRID_SIZE)
}

fn hovered_count(grid: &TileGrid) -> usize {
    grid.cells().iter().filter(|c| c.is_hovered()).count()
}

#[test]
fn hover_enter_lights_a_palette_color() {
    let mut grid = make_grid();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(7);
    let index = CellIndex { row: 2, col: 3 };

    tracker.update(&mut grid, Some(index), 0.0, &mut rng);

    let cell = grid.cell(index);
    assert_eq!(cell.opacity, 1.0);
    assert!(cell.fade_start.is_none());
    let color = cell.highlight.expect("hovered cell has a highlight");
    assert!(
        HIGHLIGHT_PALETTE.contains(&color),
        "color {color:?} not in palette"
    );
    assert_eq!(tracker.hovered(), Some(index));
}

#[test]
fn repicking_the_same_cell_is_idempotent() {
    let mut grid = make_grid();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(7);
    let index = CellIndex { row: 10, col: 10 };

    tracker.update(&mut grid, Some(index), 0.0, &mut rng);
    let color = grid.cell(index).highlight;

    tracker.update(&mut grid, Some(index), 0.5, &mut rng);
    let cell = grid.cell(index);
    assert_eq!(cell.highlight, color, "re-pick must not reroll the color");
    assert_eq!(cell.opacity, 1.0);
    assert!(cell.fade_start.is_none());
}

#[test]
fn moving_to_a_new_cell_fades_the_old_one() {
    let mut grid = make_grid();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(7);
    let first = CellIndex { row: 2, col: 3 };
    let second = CellIndex { row: 2, col: 4 };

    tracker.update(&mut grid, Some(first), 0.0, &mut rng);
    tracker.update(&mut grid, Some(second), 0.4, &mut rng);

    assert_eq!(grid.cell(first).fade_start, Some(0.4));
    assert_eq!(grid.cell(second).opacity, 1.0);
    assert!(grid.cell(second).fade_start.is_none());
    assert_eq!(tracker.hovered(), Some(second));
}

#[test]
fn leaving_the_grid_fades_the_hovered_cell() {
    let mut grid = make_grid();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(7);
    let index = CellIndex { row: 5, col: 5 };

    tracker.update(&mut grid, Some(index), 1.0, &mut rng);
    tracker.update(&mut grid, None, 2.0, &mut rng);

    assert_eq!(grid.cell(index).fade_start, Some(2.0));
    assert_eq!(tracker.hovered(), None);
}

#[test]
fn at_most_one_cell_is_hovered_under_any_move_sequence() {
    let mut grid = make_grid();
    let mut tracker = HoverTracker::default();
    let mut rng = StdRng::seed_from_u64(42);

    let picks = [
        Some(CellIndex { row: 0, col: 0 }),
        Some(CellIndex { row: 0, col: 1 }),
        Some(CellIndex { row: 0, col: 1 }),
        None,
        Some(CellIndex { row: 7, col: 30 }),
        Some(CellIndex { row: 8, col: 30 }),
        None,
        None,
        Some(CellIndex { row: 44, col: 44 }),
    ];
    for (step, picked) in picks.into_iter().enumerate() {
        tracker.update(&mut grid, picked, step as f64 * 0.1, &mut rng);
        let hovered = hovered_count(&grid);
        assert!(hovered <= 1, "step {step}: {hovered} cells hovered");
        assert_eq!(hovered == 1, picked.is_some());
    }
}

#[test]
fn pick_at_screen_center_hits_the_middle_cell() {
    let grid = make_grid();
    let camera = OrthoCamera::homepage(1.0);
    let mid = GRID_DIVISIONS / 2;

    let picked = pick_cell(&grid, &camera, Vec2::ZERO, 0.0);
    assert_eq!(picked, Some(CellIndex { row: mid, col: mid }));

    // A small scene rotation pivots around the origin, so the center pick
    // is unchanged
    let rotated = pick_cell(&grid, &camera, Vec2::ZERO, 0.26);
    assert_eq!(rotated, Some(CellIndex { row: mid, col: mid }));
}

#[test]
fn pick_accounts_for_scene_rotation() {
    let grid = make_grid();
    let camera = OrthoCamera::homepage(1.0);
    let ndc = Vec2::new(0.5, 0.0);

    let unrotated = pick_cell(&grid, &camera, ndc, 0.0);
    let rotated = pick_cell(&grid, &camera, ndc, 0.6);
    assert!(unrotated.is_some());
    assert!(rotated.is_some());
    assert_ne!(unrotated, rotated);
}

#[test]
fn pick_outside_the_grid_returns_none() {
    let grid = make_grid();
    // Zoom the frustum out so screen corners land beyond the footprint
    let mut camera = OrthoCamera::homepage(1.0);
    camera.half_height = 400.0;
    assert_eq!(pick_cell(&grid, &camera, Vec2::new(0.95, 0.95), 0.0), None);
}
