//! Shape module - rotation-free bit matrices for the seven pieces
//!
//! A shape is a small rectangular matrix (at most 4x4) where `true` marks an
//! occupied cell. Matrices are row-major: `bits[row][col]`.

use arrayvec::ArrayVec;

use crate::types::ShapeKind;

/// Largest side of any shape matrix
pub const MAX_SIDE: usize = 4;

/// Offsets of the occupied cells of a shape, as `(col, row)`
pub type ShapeCells = ArrayVec<(i8, i8), { MAX_SIDE * MAX_SIDE }>;

/// An immutable occupied-cell matrix in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    bits: [[bool; MAX_SIDE]; MAX_SIDE],
}

/// Build a shape from a literal 0/1 matrix at compile time.
const fn matrix<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Shape {
    let mut bits = [[false; MAX_SIDE]; MAX_SIDE];
    let mut row = 0;
    while row < H {
        let mut col = 0;
        while col < W {
            bits[row][col] = rows[row][col] == 1;
            col += 1;
        }
        row += 1;
    }
    Shape {
        width: W as u8,
        height: H as u8,
        bits,
    }
}

const I_SHAPE: Shape = matrix([[1, 1, 1, 1]]);
const J_SHAPE: Shape = matrix([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = matrix([[0, 0, 1], [1, 1, 1]]);
const O_SHAPE: Shape = matrix([[1, 1], [1, 1]]);
const S_SHAPE: Shape = matrix([[0, 1, 1], [1, 1, 0]]);
const T_SHAPE: Shape = matrix([[0, 1, 0], [1, 1, 1]]);
const Z_SHAPE: Shape = matrix([[1, 1, 0], [0, 1, 1]]);

impl Shape {
    /// Canonical base matrix for a shape kind
    pub fn base(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => I_SHAPE,
            ShapeKind::J => J_SHAPE,
            ShapeKind::L => L_SHAPE,
            ShapeKind::O => O_SHAPE,
            ShapeKind::S => S_SHAPE,
            ShapeKind::T => T_SHAPE,
            ShapeKind::Z => Z_SHAPE,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Whether the cell at `(col, row)` is occupied.
    /// Out-of-range lookups are empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height() && self.bits[row][col]
    }

    /// Occupied cell offsets in row-major order
    pub fn occupied(&self) -> ShapeCells {
        let mut cells = ShapeCells::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                if self.bits[row][col] {
                    cells.push((col as i8, row as i8));
                }
            }
        }
        cells
    }

    /// Matrix as nested 0/1 rows, e.g. for display or assertions
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|row| {
                (0..self.width())
                    .map(|col| self.bits[row][col] as u8)
                    .collect()
            })
            .collect()
    }

    /// Rotate 90° clockwise.
    ///
    /// Output row `c` is input column `c` read from the bottom row up:
    /// `rotated[c][k] = original[height - 1 - k][c]`.
    pub fn rotated_clockwise(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut bits = [[false; MAX_SIDE]; MAX_SIDE];
        for (c, out_row) in bits.iter_mut().enumerate().take(w) {
            for (k, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.bits[h - 1 - k][c];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }

    /// Rotate 90° counter-clockwise (mirror traversal of [`Self::rotated_clockwise`]).
    ///
    /// `rotated[i][k] = original[k][width - 1 - i]`
    pub fn rotated_counterclockwise(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut bits = [[false; MAX_SIDE]; MAX_SIDE];
        for (i, out_row) in bits.iter_mut().enumerate().take(w) {
            for (k, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.bits[k][w - 1 - i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }
}
