//! Rotation module - four precomputed orientations per piece
//!
//! A [`RotationSet`] is derived once from a base shape by repeated 90° turns
//! in a fixed direction. Rotating during play only moves a [`RotationIndex`]
//! around the set, so the hot input path never rebuilds a matrix.

use rand::Rng;

use crate::shape::Shape;

/// Direction used to derive the orientations of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    Counterclockwise,
}

impl RotationDirection {
    fn turn(self, shape: &Shape) -> Shape {
        match self {
            RotationDirection::Clockwise => shape.rotated_clockwise(),
            RotationDirection::Counterclockwise => shape.rotated_counterclockwise(),
        }
    }
}

/// Rotation state, always in `1..=4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RotationIndex(u8);

impl RotationIndex {
    /// The base orientation
    pub const FIRST: RotationIndex = RotationIndex(1);

    /// Returns `None` outside `1..=4`
    pub fn new(index: u8) -> Option<Self> {
        (1..=4).contains(&index).then_some(Self(index))
    }

    /// Uniformly random rotation state
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=4))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Next state, wrapping 4 -> 1
    pub fn forward(self) -> Self {
        if self.0 >= 4 {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous state, wrapping 1 -> 4
    pub fn backward(self) -> Self {
        if self.0 <= 1 {
            Self(4)
        } else {
            Self(self.0 - 1)
        }
    }

    fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for RotationIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

/// The four orientations of one shape, computed eagerly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationSet {
    direction: RotationDirection,
    states: [Shape; 4],
}

impl RotationSet {
    /// State 1 is `base`; each following state is one 90° turn in `direction`.
    pub fn new(base: Shape, direction: RotationDirection) -> Self {
        let second = direction.turn(&base);
        let third = direction.turn(&second);
        let fourth = direction.turn(&third);
        Self {
            direction,
            states: [base, second, third, fourth],
        }
    }

    pub fn direction(&self) -> RotationDirection {
        self.direction
    }

    /// Orientation for a rotation state
    pub fn get(&self, index: RotationIndex) -> &Shape {
        &self.states[index.slot()]
    }

    pub fn states(&self) -> &[Shape; 4] {
        &self.states
    }
}
