//! Grid module - the settled playfield
//!
//! The grid is a 12x21 matrix where each cell is empty or holds a color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..20 (top to bottom).
//!
//! Only locking a piece or clearing lines writes to the background grid. The
//! render grid is a throwaway copy with the active piece painted on top.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{BlockColor, Cell, COLUMNS, GRID_SIZE, ROWS};

/// Row indices removed by one clear pass, top to bottom
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The playfield - 12 columns x 21 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLUMNS + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= COLUMNS || y as usize >= ROWS {
            return None;
        }
        Some((y as usize) * COLUMNS + (x as usize))
    }

    pub fn width(&self) -> usize {
        COLUMNS
    }

    pub fn height(&self) -> usize {
        ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is filled. Out-of-range positions are never occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * COLUMNS..(y + 1) * COLUMNS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && self.row(y).iter().all(Option::is_some)
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        y >= ROWS || self.row(y).iter().all(Option::is_none)
    }

    /// Write `color` at every non-negative, in-bounds coordinate.
    ///
    /// Cells still above the grid (negative y) are dropped.
    pub fn lock_cells(&mut self, coordinates: &[(i8, i8)], color: BlockColor) {
        for &(x, y) in coordinates {
            if x >= 0 && y >= 0 {
                self.set(x, y, Some(color));
            }
        }
    }

    /// Empty every full row, then sink emptied rows to the top.
    ///
    /// Rows are scanned top to bottom. After the pass all empty rows sit
    /// above all non-empty rows, and both groups keep their relative order.
    /// Returns the indices of the rows that were full.
    pub fn clear_full_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..ROWS {
            if self.is_row_full(y) {
                self.cells[y * COLUMNS..(y + 1) * COLUMNS].fill(None);
                cleared.push(y);
            }
        }

        if cleared.is_empty() {
            return cleared;
        }

        // Two-pointer stable partition: walk bottom-up and pack non-empty rows
        // against the floor, then blank whatever is left above them.
        let mut write_y = ROWS;
        for read_y in (0..ROWS).rev() {
            if self.is_row_empty(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * COLUMNS;
                self.cells.copy_within(src..src + COLUMNS, write_y * COLUMNS);
            }
        }
        self.cells[..write_y * COLUMNS].fill(None);

        cleared
    }

    /// Copy of this grid with `piece` painted on top.
    ///
    /// Piece cells outside the grid (including above row 0) are skipped.
    pub fn compose_render_grid(&self, piece: &Piece) -> Grid {
        let mut frame = *self;
        for (x, y) in piece.cells() {
            frame.set(x, y, Some(piece.color()));
        }
        frame
    }

    /// Flattened row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume into the flat cell array
    pub fn into_cells(self) -> [Cell; GRID_SIZE] {
        self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(COLUMNS)
    }

    /// Copy into a 2D array (row-major)
    pub fn to_rows(&self) -> [[Cell; COLUMNS]; ROWS] {
        let mut out = [[None; COLUMNS]; ROWS];
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationIndex;
    use crate::types::ShapeKind;

    fn fill_row(grid: &mut Grid, y: i8, color: BlockColor) {
        for x in 0..COLUMNS as i8 {
            grid.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(11, 0), Some(11));
        assert_eq!(Grid::index(0, 1), Some(12));
        assert_eq!(Grid::index(11, 20), Some(251));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(12, 0), None);
        assert_eq!(Grid::index(0, 21), None);
    }

    #[test]
    fn test_out_of_range_is_not_occupied() {
        let grid = Grid::new();
        assert!(!grid.is_occupied(-1, 5));
        assert!(!grid.is_occupied(5, -1));
        assert!(!grid.is_occupied(12, 0));
        assert!(!grid.is_occupied(0, 21));
    }

    #[test]
    fn test_lock_cells_skips_negative() {
        let mut grid = Grid::new();
        grid.lock_cells(&[(3, -1), (3, 0), (-1, 4), (4, 0)], BlockColor::Green);
        assert_eq!(grid.filled_count(), 2);
        assert_eq!(grid.get(3, 0), Some(Some(BlockColor::Green)));
        assert_eq!(grid.get(4, 0), Some(Some(BlockColor::Green)));
    }

    #[test]
    fn test_clear_single_bottom_line() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 20, BlockColor::Red);
        grid.set(0, 19, Some(BlockColor::Blue));

        let cleared = grid.clear_full_lines();
        assert_eq!(cleared.as_slice(), &[20]);
        assert_eq!(grid.get(0, 20), Some(Some(BlockColor::Blue)));
        assert!(grid.is_row_empty(19));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_clear_preserves_order_of_surviving_rows() {
        let mut grid = Grid::new();
        grid.set(0, 16, Some(BlockColor::Cyan));
        fill_row(&mut grid, 17, BlockColor::Red);
        grid.set(1, 18, Some(BlockColor::Pink));
        fill_row(&mut grid, 19, BlockColor::Red);
        grid.set(2, 20, Some(BlockColor::Yellow));

        let cleared = grid.clear_full_lines();
        assert_eq!(cleared.as_slice(), &[17, 19]);
        assert_eq!(grid.get(0, 18), Some(Some(BlockColor::Cyan)));
        assert_eq!(grid.get(1, 19), Some(Some(BlockColor::Pink)));
        assert_eq!(grid.get(2, 20), Some(Some(BlockColor::Yellow)));
        for y in 0..18 {
            assert!(grid.is_row_empty(y), "row {y} should be empty");
        }
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut grid = Grid::new();
        grid.set(4, 20, Some(BlockColor::Orange));
        let before = grid;
        assert!(grid.clear_full_lines().is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_compose_render_grid_leaves_background_untouched() {
        let grid = Grid::new();
        let piece = Piece::new(ShapeKind::O, BlockColor::Yellow, RotationIndex::FIRST)
            .with_offset(0, -1);

        let frame = grid.compose_render_grid(&piece);
        assert_eq!(frame.filled_count(), 2);
        assert_eq!(frame.get(0, 0), Some(Some(BlockColor::Yellow)));
        assert_eq!(frame.get(1, 0), Some(Some(BlockColor::Yellow)));
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_to_rows_matches_flat_layout() {
        let mut grid = Grid::new();
        grid.set(7, 3, Some(BlockColor::Blue));
        let rows = grid.to_rows();
        assert_eq!(rows[3][7], Some(BlockColor::Blue));
        assert_eq!(grid.cells()[3 * COLUMNS + 7], Some(BlockColor::Blue));
        assert_eq!(grid.rows().count(), ROWS);
    }
}
