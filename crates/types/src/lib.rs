//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the engine, the terminal view and the input
//! mapping all agree on these names.
//!
//! # Grid Dimensions
//!
//! The playfield is fixed:
//!
//! - **Columns**: 12 (indexed 0-11, left to right)
//! - **Rows**: 21 (indexed 0-20, top to bottom)
//!
//! Pieces spawn above row 0 and reveal themselves as they fall.
//!
//! # Game Clock
//!
//! The engine has no timer. The driver fires one gravity step per interval:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1000 | Default gravity interval |
//! | `FAST_TICK_MS` | 480 | Faster clock variant |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColor, Intent, ShapeKind, COLUMNS, ROWS};
//!
//! let kind: ShapeKind = "t".parse().unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert!("x".parse::<ShapeKind>().is_err());
//!
//! assert_eq!(BlockColor::Pink.as_str(), "pink");
//! assert_eq!(Intent::from_str("drop"), Some(Intent::Drop));
//!
//! assert_eq!(COLUMNS, 12);
//! assert_eq!(ROWS, 21);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grid height in cells (21 rows)
pub const ROWS: usize = 21;

/// Grid width in cells (12 columns)
pub const COLUMNS: usize = 12;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = ROWS * COLUMNS;

/// Default gravity interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Faster gravity interval in milliseconds
pub const FAST_TICK_MS: u64 = 480;

/// The seven canonical piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Single upper-case letter naming the shape
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_str(), "I");
    /// assert_eq!(ShapeKind::Z.as_str(), "Z");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    /// Parse a shape name (case-insensitive).
    ///
    /// Names outside the catalog are rejected with [`UnknownShape`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Ok(ShapeKind::I),
            "J" => Ok(ShapeKind::J),
            "L" => Ok(ShapeKind::L),
            "O" => Ok(ShapeKind::O),
            "S" => Ok(ShapeKind::S),
            "T" => Ok(ShapeKind::T),
            "Z" => Ok(ShapeKind::Z),
            _ => Err(UnknownShape {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape name that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape {
    pub name: String,
}

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unregistered shape {:?} cannot be created", self.name)
    }
}

impl std::error::Error for UnknownShape {}

/// Palette of block colors
///
/// A color is picked once when a piece spawns and is independent of its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Pink,
    Red,
}

impl BlockColor {
    /// The whole palette in a fixed order.
    pub const ALL: [BlockColor; 7] = [
        BlockColor::Cyan,
        BlockColor::Blue,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Pink,
        BlockColor::Red,
    ];

    /// Lowercase color token
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Cyan => "cyan",
            BlockColor::Blue => "blue",
            BlockColor::Orange => "orange",
            BlockColor::Yellow => "yellow",
            BlockColor::Green => "green",
            BlockColor::Pink => "pink",
            BlockColor::Red => "red",
        }
    }

    /// Parse a color token (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        BlockColor::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(s))
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Cell filled with the given color
pub type Cell = Option<BlockColor>;

/// Discrete intents the driver issues to the engine
///
/// Each intent maps to exactly one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Single downward step (locks the piece when it cannot fall)
    MoveDown,
    /// Hard drop: fall as far as possible, then lock
    Drop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    TogglePause,
    /// Start a fresh game
    Restart,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("rotateCcw"), Some(Intent::RotateCcw));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "movedown" => Some(Intent::MoveDown),
            "drop" => Some(Intent::Drop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "togglepause" => Some(Intent::TogglePause),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::MoveDown => "moveDown",
            Intent::Drop => "drop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::TogglePause => "togglePause",
            Intent::Restart => "restart",
        }
    }
}
