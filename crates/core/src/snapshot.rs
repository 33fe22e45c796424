//! Snapshot module - the read model handed to renderers
//!
//! A snapshot is a plain `Copy` value: the composed render grid, a summary of
//! the active piece, the score and the state flags. Drivers keep one around
//! and refill it with [`crate::Game::snapshot_into`] after every operation.

use serde::{Deserialize, Serialize};

use crate::game::GameStatus;
use crate::piece::Piece;
use crate::types::{BlockColor, Cell, ShapeKind, COLUMNS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            rotation: value.rotation_index(),
            x: value.offset_x(),
            y: value.offset_y(),
        }
    }
}

/// Read model handed to the view after every operation.
///
/// `cells` is the render grid: settled blocks plus the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cells: [[Cell; COLUMNS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[None; COLUMNS]; ROWS];
        self.active = None;
        self.score = 0;
        self.paused = false;
        self.game_over = false;
    }

    /// Render cells row-major, one token per cell
    pub fn flat(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[None; COLUMNS]; ROWS],
            active: None,
            score: 0,
            paused: false,
            game_over: false,
        }
    }
}
