//! Piece module - a shape in play
//!
//! A piece owns its rotation set, current rotation state, color and grid
//! offset. It is a pure geometric container: none of its operations look at
//! the grid. Legality is decided by the engine against a hypothetical copy.

use rand::Rng;

use crate::rotation::{RotationDirection, RotationIndex, RotationSet};
use crate::shape::{Shape, ShapeCells};
use crate::types::{BlockColor, ShapeKind, UnknownShape};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    rotations: RotationSet,
    rotation: RotationIndex,
    color: BlockColor,
    x: i8,
    y: i8,
}

impl Piece {
    /// Create a piece at offset (0, 0) with a clockwise-derived rotation set
    pub fn new(kind: ShapeKind, color: BlockColor, rotation: RotationIndex) -> Self {
        Self {
            kind,
            rotations: RotationSet::new(Shape::base(kind), RotationDirection::Clockwise),
            rotation,
            color,
            x: 0,
            y: 0,
        }
    }

    /// Uniformly random shape, rotation state and palette color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
        Self::of_kind(kind, rng)
    }

    /// Build a piece by shape name with random rotation and color.
    ///
    /// Unknown names are rejected before anything is constructed.
    pub fn from_name<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Result<Self, UnknownShape> {
        let kind: ShapeKind = name.parse()?;
        Ok(Self::of_kind(kind, rng))
    }

    fn of_kind<R: Rng + ?Sized>(kind: ShapeKind, rng: &mut R) -> Self {
        let rotation = RotationIndex::random(rng);
        let color = BlockColor::ALL[rng.gen_range(0..BlockColor::ALL.len())];
        Self::new(kind, color, rotation)
    }

    /// Replace the rotation set, e.g. to derive orientations counter-clockwise
    pub fn with_direction(mut self, direction: RotationDirection) -> Self {
        self.rotations = RotationSet::new(Shape::base(self.kind), direction);
        self
    }

    /// Place the top-left corner at `(x, y)`
    pub fn with_offset(mut self, x: i8, y: i8) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Center horizontally and place fully above row 0
    pub fn spawn(&mut self, columns: usize) {
        self.x = ((columns as i32 - self.width() as i32).div_euclid(2)) as i8;
        self.y = -(self.height() as i8);
    }

    pub fn move_left(&mut self) {
        self.x -= 1;
    }

    pub fn move_right(&mut self) {
        self.x += 1;
    }

    pub fn move_down(&mut self) {
        self.y += 1;
    }

    /// Turn 90° clockwise regardless of how the set was derived
    pub fn rotate_clockwise(&mut self) {
        self.rotation = match self.rotations.direction() {
            RotationDirection::Clockwise => self.rotation.forward(),
            RotationDirection::Counterclockwise => self.rotation.backward(),
        };
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.rotation = match self.rotations.direction() {
            RotationDirection::Clockwise => self.rotation.backward(),
            RotationDirection::Counterclockwise => self.rotation.forward(),
        };
    }

    /// Copy of this piece shifted by `(dx, dy)`
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn rotation(&self) -> RotationIndex {
        self.rotation
    }

    /// Rotation state in `1..=4`
    pub fn rotation_index(&self) -> u8 {
        self.rotation.get()
    }

    pub fn rotations(&self) -> &RotationSet {
        &self.rotations
    }

    /// Current orientation
    pub fn shape(&self) -> &Shape {
        self.rotations.get(self.rotation)
    }

    pub fn width(&self) -> usize {
        self.shape().width()
    }

    pub fn height(&self) -> usize {
        self.shape().height()
    }

    pub fn offset_x(&self) -> i8 {
        self.x
    }

    pub fn offset_y(&self) -> i8 {
        self.y
    }

    pub fn left_edge(&self) -> i8 {
        self.x
    }

    /// One past the rightmost column
    pub fn right_edge(&self) -> i8 {
        self.x + self.width() as i8
    }

    /// One past the lowest row
    pub fn bottom_edge(&self) -> i8 {
        self.y + self.height() as i8
    }

    /// Occupied grid coordinates `(x, y)`, row-major. May be negative.
    pub fn cells(&self) -> ShapeCells {
        self.shape()
            .occupied()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
