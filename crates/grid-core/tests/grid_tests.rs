use grid_core::constants::{GRID_DIVISIONS, GRID_SIZE};
use grid_core::{CellIndex, TileGrid};

fn make_grid() -> TileGrid {
    TileGrid::new(GRID_DIVISIONS, GRID_SIZE)
}

#[test]
fn grid_has_divisions_squared_cells() {
    let grid = make_grid();
    assert_eq!(grid.cells().len(), GRID_DIVISIONS * GRID_DIVISIONS);
    assert_eq!(grid.divisions(), GRID_DIVISIONS);
}

#[test]
fn cell_centers_follow_the_placement_formula() {
    let grid = make_grid();
    let pitch = GRID_SIZE / GRID_DIVISIONS as f32;
    let half = GRID_DIVISIONS as f32 / 2.0;

    for cell in grid.cells() {
        let expected_x = (cell.index.col as f32 - half + 0.5) * pitch;
        let expected_z = (cell.index.row as f32 - half + 0.5) * pitch;
        assert!(
            (cell.center.x - expected_x).abs() < 1e-4,
            "cell {:?} x: {} vs {}",
            cell.index,
            cell.center.x,
            expected_x
        );
        assert!((cell.center.y - expected_z).abs() < 1e-4);
    }

    // Odd division count puts the middle cell exactly on the origin
    let mid = GRID_DIVISIONS / 2;
    let center = grid.cell(CellIndex { row: mid, col: mid }).center;
    assert!(center.x.abs() < 1e-4 && center.y.abs() < 1e-4);
}

#[test]
fn grid_footprint_is_covered_without_overlap() {
    let grid = make_grid();
    // Tiles are strictly smaller than the pitch, so neighbors never overlap
    assert!(grid.tile_size() < grid.pitch());
    // ...but still cover most of each cell
    assert!(grid.tile_size() > grid.pitch() * 0.9);

    // First and last centers sit half a pitch inside the footprint edge
    let first = grid.cell(CellIndex { row: 0, col: 0 }).center;
    let last = grid
        .cell(CellIndex {
            row: GRID_DIVISIONS - 1,
            col: GRID_DIVISIONS - 1,
        })
        .center;
    let edge = GRID_SIZE / 2.0 - grid.pitch() / 2.0;
    assert!((first.x + edge).abs() < 1e-3);
    assert!((last.x - edge).abs() < 1e-3);
}

#[test]
fn cell_at_point_resolves_centers() {
    let grid = make_grid();
    for &index in &[
        CellIndex { row: 0, col: 0 },
        CellIndex { row: 22, col: 22 },
        CellIndex { row: 44, col: 3 },
    ] {
        let center = grid.cell(index).center;
        assert_eq!(grid.cell_at_point(center.x, center.y), Some(index));
    }
}

#[test]
fn cell_at_point_rejects_gutters() {
    let grid = make_grid();
    // Half-way between two neighboring centers lies in the gutter
    let mid = grid.cell(CellIndex { row: 22, col: 22 }).center;
    let gutter_x = mid.x + grid.pitch() / 2.0;
    assert_eq!(grid.cell_at_point(gutter_x, mid.y), None);
}

#[test]
fn cell_at_point_rejects_points_off_the_grid() {
    let grid = make_grid();
    let beyond = GRID_SIZE / 2.0 + 1.0;
    assert_eq!(grid.cell_at_point(beyond, 0.0), None);
    assert_eq!(grid.cell_at_point(-beyond, 0.0), None);
    assert_eq!(grid.cell_at_point(0.0, beyond), None);
    assert_eq!(grid.cell_at_point(0.0, -beyond), None);
}

#[test]
fn cells_start_at_rest() {
    let grid = make_grid();
    for cell in grid.cells() {
        assert_eq!(cell.opacity, 0.0);
        assert!(cell.highlight.is_none());
        assert!(cell.fade_start.is_none());
        assert!(!cell.is_hovered());
    }
}
