//! Game module - the engine state machine
//!
//! This module ties together the grid, the active piece and the score. It
//! validates every intent against a hypothetical next piece before committing
//! it, locks pieces that can no longer fall, clears lines and spawns the next
//! piece.
//!
//! States are Playing, Paused and GameOver. GameOver is decided once per
//! spawn: right after a lock, the new piece cannot fall and has not yet
//! entered the visible grid. It then sticks until restart.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Cell, Intent, COLUMNS, ROWS};

/// Coarse engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Emitted each time a piece locks into the background grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// The piece spawned after this lock has no room.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    background: Grid,
    active: Piece,
    score: u32,
    paused: bool,
    /// Set only when a spawn finds no room.
    over: bool,
    rng: StdRng,
    /// Last lock event (consumed by the driver).
    last_event: Option<LockEvent>,
}

impl Game {
    /// New game seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// New game with a deterministic piece sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Resume from an explicit board and active piece.
    ///
    /// The piece is used as given (not re-spawned) and is treated as just
    /// spawned for the game-over check. Later pieces come from `seed`.
    pub fn from_state(background: Grid, active: Piece, seed: u64) -> Self {
        let mut game = Self {
            background,
            active,
            score: 0,
            paused: false,
            over: false,
            rng: StdRng::seed_from_u64(seed),
            last_event: None,
        };
        game.over = game.spawn_blocked();
        game
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let active = Self::spawn_from(&mut rng);
        Self {
            background: Grid::new(),
            active,
            score: 0,
            paused: false,
            over: false,
            rng,
            last_event: None,
        }
    }

    fn spawn_from(rng: &mut StdRng) -> Piece {
        let mut piece = Piece::random(rng);
        piece.spawn(COLUMNS);
        piece
    }

    /// Start a fresh game. Identical to [`Game::restart`].
    pub fn start(&mut self) {
        self.restart();
    }

    /// Replace the whole state: empty grid, new piece, score 0, not paused.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(rng);
        debug!(shape = %self.active.kind(), "game restarted");
    }

    pub fn background(&self) -> &Grid {
        &self.background
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// Lines cleared since the last restart
    pub fn total_score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// The active piece cannot fall and its bottom edge has not crossed row 0.
    fn spawn_blocked(&self) -> bool {
        !self.can_move_down() && self.active.bottom_edge() <= 0
    }

    pub fn status(&self) -> GameStatus {
        if self.is_over() {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }

    /// Background grid with the active piece overlaid, composed on demand
    pub fn render_grid(&self) -> Grid {
        self.background.compose_render_grid(&self.active)
    }

    /// Flattened render grid, row-major
    pub fn render_cells(&self) -> impl Iterator<Item = Cell> {
        self.render_grid().into_cells().into_iter()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Check if a hypothetical piece state is legal on the current background.
    ///
    /// Cells may sit above row 0 but never left of column 0, right of the last
    /// column, below the last row, or on a filled cell.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            x >= 0
                && (x as usize) < COLUMNS
                && (y as i32) < ROWS as i32
                && !self.background.is_occupied(x, y)
        })
    }

    pub fn can_move_down(&self) -> bool {
        self.fits(&self.active.moved(0, 1))
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.is_over()
    }

    /// Apply `change` to a copy of the active piece and commit it only if legal.
    fn try_change(&mut self, change: impl FnOnce(&mut Piece)) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let mut next = self.active;
        change(&mut next);
        if !self.fits(&next) {
            return false;
        }
        self.active = next;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_change(Piece::move_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_change(Piece::move_right)
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.try_change(Piece::rotate_clockwise)
    }

    pub fn rotate_counterclockwise(&mut self) -> bool {
        self.try_change(Piece::rotate_counterclockwise)
    }

    /// Single downward step; locks the piece when it cannot fall.
    pub fn move_down(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.step_down();
        true
    }

    /// Automatic gravity step fired by the driver's clock.
    pub fn tick(&mut self) -> bool {
        self.move_down()
    }

    /// Hard drop: fall while legal, then one more step which locks.
    pub fn drop_block(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        while self.can_move_down() {
            self.active.move_down();
        }
        self.step_down();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    fn step_down(&mut self) {
        if self.can_move_down() {
            self.active.move_down();
        } else {
            self.lock_active();
        }
    }

    /// Lock the active piece, clear full lines and spawn the next piece.
    fn lock_active(&mut self) {
        let piece = self.active;
        debug!(
            shape = %piece.kind(),
            color = piece.color().as_str(),
            x = piece.offset_x(),
            y = piece.offset_y(),
            "piece locked"
        );
        self.background.lock_cells(&piece.cells(), piece.color());

        let lines_cleared = self.background.clear_full_lines().len() as u32;
        if lines_cleared > 0 {
            self.score += lines_cleared;
            info!(lines = lines_cleared, score = self.score, "lines cleared");
        }

        self.active = Self::spawn_from(&mut self.rng);

        self.over = self.spawn_blocked();
        let game_over = self.over;
        if game_over {
            info!(score = self.score, "game over");
        }
        self.last_event = Some(LockEvent {
            lines_cleared,
            game_over,
        });
    }

    /// Dispatch an intent to the matching operation
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::MoveDown => self.move_down(),
            Intent::Drop => self.drop_block(),
            Intent::RotateCw => self.rotate_clockwise(),
            Intent::RotateCcw => self.rotate_counterclockwise(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells = self.render_grid().to_rows();
        out.active = Some(ActiveSnapshot::from(self.active));
        out.score = self.score;
        out.paused = self.paused;
        out.game_over = self.is_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
