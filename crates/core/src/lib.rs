//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the shape catalog, rotation
//! sets, the active piece, the settled grid and the engine state machine.
//! It has **zero dependencies** on terminal, timing or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Any driver (terminal, browser bridge, headless) can run it
//! - **Allocation-free**: Grid, piece and snapshot are fixed-size `Copy` values
//!
//! # Module Structure
//!
//! - [`shape`]: The 7 canonical bit matrices and 90° rotation
//! - [`rotation`]: Eagerly computed 4-state rotation sets
//! - [`piece`]: Active piece with offset, color and rotation state
//! - [`grid`]: 12x21 settled grid, locking and line clearing
//! - [`game`]: Engine state machine (Playing / Paused / GameOver)
//! - [`snapshot`]: Read model for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn centered and fully above the visible grid
//! - Shape, initial rotation and color are uniformly random
//! - Illegal moves and rotations are silently ignored (no wall kicks)
//! - A piece that cannot fall locks on the next downward step
//! - Each full row scores one point; emptied rows sink to the top
//! - The game is over when a freshly spawned piece has no room to enter
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, GameStatus};
//! use blockfall_types::Intent;
//!
//! let mut game = Game::with_seed(12345);
//!
//! game.apply(Intent::MoveRight);
//! game.apply(Intent::RotateCw);
//! game.apply(Intent::Drop);
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.background().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. The driver calls [`Game::tick`] on a fixed
//! interval while the game is not paused, and restarts that interval whenever
//! the paused flag changes.

pub mod game;
pub mod grid;
pub mod piece;
pub mod rotation;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use game::{Game, GameStatus, LockEvent};
pub use grid::{ClearedRows, Grid};
pub use piece::Piece;
pub use rotation::{RotationDirection, RotationIndex, RotationSet};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
