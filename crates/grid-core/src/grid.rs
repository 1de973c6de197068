use glam::Vec2;

use crate::constants::TILE_SHRINK;

/// Row/column address of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

/// One addressable unit of the interactive grid surface.
#[derive(Clone, Debug)]
pub struct Cell {
    pub index: CellIndex,
    /// Fixed world-plane center; x runs along columns, z along rows.
    pub center: Vec2,
    /// Highlight color while hovered or fading; `None` at rest.
    pub highlight: Option<[f32; 3]>,
    pub opacity: f32,
    /// Set while fading. `None` means never entered, or currently hovered
    /// with opacity pinned at 1.
    pub fade_start: Option<f64>,
}

impl Cell {
    /// Hovered means lit and not fading.
    pub fn is_hovered(&self) -> bool {
        self.fade_start.is_none() && self.opacity >= 1.0
    }
}

/// Fixed NxN set of cells with independent fade state.
///
/// The grid owns no animation timing; color and opacity are mutated through
/// `cell_mut`/`cells_mut` by the hover tracker and the fade animator.
pub struct TileGrid {
    divisions: usize,
    pitch: f32,
    tile_size: f32,
    cells: Vec<Cell>,
}

impl TileGrid {
    pub fn new(divisions: usize, size: f32) -> Self {
        let pitch = size / divisions as f32;
        let tile_size = pitch * TILE_SHRINK;
        let half = divisions as f32 / 2.0;
        let mut cells = Vec::with_capacity(divisions * divisions);
        for row in 0..divisions {
            for col in 0..divisions {
                cells.push(Cell {
                    index: CellIndex { row, col },
                    center: Vec2::new(
                        (col as f32 - half + 0.5) * pitch,
                        (row as f32 - half + 0.5) * pitch,
                    ),
                    highlight: None,
                    opacity: 0.0,
                    fade_start: None,
                });
            }
        }
        Self {
            divisions,
            pitch,
            tile_size,
            cells,
        }
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Distance between neighboring cell centers.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Visible (and pickable) edge length of one tile.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[self.offset(index)]
    }

    pub fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }

    /// Resolve a point on the grid plane to the cell whose visible tile
    /// contains it. Points in the gutters between tiles resolve to `None`.
    pub fn cell_at_point(&self, x: f32, z: f32) -> Option<CellIndex> {
        let half = self.divisions as f32 / 2.0;
        let col = (x / self.pitch + half).floor();
        let row = (z / self.pitch + half).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.divisions || col >= self.divisions {
            return None;
        }
        let index = CellIndex { row, col };
        let center = self.cell(index).center;
        let half_tile = self.tile_size / 2.0;
        ((x - center.x).abs() <= half_tile && (z - center.y).abs() <= half_tile).then_some(index)
    }

    fn offset(&self, index: CellIndex) -> usize {
        index.row * self.divisions + index.col
    }
}
