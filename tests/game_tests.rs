//! Engine tests - movement legality, locking, line clears and state machine

use blockfall::core::{Game, GameStatus, Grid, LockEvent, Piece, RotationIndex};
use blockfall::types::{BlockColor, Intent, ShapeKind, COLUMNS, ROWS};

fn spawned(kind: ShapeKind, rotation: u8) -> Piece {
    let mut piece = Piece::new(kind, BlockColor::Orange, RotationIndex::new(rotation).unwrap());
    piece.spawn(COLUMNS);
    piece
}

fn blocked_spawn() -> Game {
    let mut grid = Grid::new();
    for x in 0..COLUMNS as i8 {
        grid.set(x, 0, Some(BlockColor::Red));
    }
    Game::from_state(grid, spawned(ShapeKind::T, 1), 11)
}

#[test]
fn test_o_piece_scenario() {
    let mut game = Game::from_state(Grid::new(), spawned(ShapeKind::O, 1), 1);
    assert_eq!(game.active().offset_x(), 5);
    assert_eq!(game.active().offset_y(), -2);

    game.move_down();
    game.move_down();

    assert_eq!(game.active().offset_y(), 0);
    assert_eq!(
        game.active().cells().as_slice(),
        &[(5, 0), (6, 0), (5, 1), (6, 1)]
    );
    assert_eq!(game.background().filled_count(), 0);
}

#[test]
fn test_bottom_row_gap_fill_scores_one() {
    let mut grid = Grid::new();
    for x in 0..COLUMNS as i8 {
        if x != 7 {
            grid.set(x, 20, Some(BlockColor::Blue));
        }
    }
    // Upright I dropped into column 7 fills the gap.
    let piece = spawned(ShapeKind::I, 2).with_offset(7, -4);
    let mut game = Game::from_state(grid, piece, 2);
    assert_eq!(game.total_score(), 0);

    game.drop_block();

    assert_eq!(game.total_score(), 1);
    assert_eq!(
        game.take_last_event(),
        Some(LockEvent {
            lines_cleared: 1,
            game_over: false
        })
    );
    // Remaining three cells of the I sit on the floor in column 7.
    for y in 18..ROWS as i8 {
        assert_eq!(game.background().get(7, y), Some(Some(BlockColor::Orange)));
    }
    assert_eq!(game.background().filled_count(), 3);
}

#[test]
fn test_two_simultaneous_lines() {
    let mut grid = Grid::new();
    for y in [19, 20] {
        for x in 0..COLUMNS as i8 {
            if x != 0 && x != 1 {
                grid.set(x, y, Some(BlockColor::Green));
            }
        }
    }
    let piece = spawned(ShapeKind::O, 1).with_offset(0, 5);
    let mut game = Game::from_state(grid, piece, 3);

    game.drop_block();
    assert_eq!(game.total_score(), 2);
    assert_eq!(game.background().filled_count(), 0);
}

#[test]
fn test_toggle_pause_while_over() {
    let mut game = blocked_spawn();
    assert!(game.is_over());
    assert!(!game.is_paused());

    game.toggle_pause();
    assert!(!game.is_paused());
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn test_drop_i_piece_on_empty_grid() {
    let mut game = Game::from_state(Grid::new(), spawned(ShapeKind::I, 1), 4);
    game.drop_block();

    let bottom: Vec<_> = (0..COLUMNS as i8)
        .filter(|&x| game.background().is_occupied(x, 20))
        .collect();
    assert_eq!(bottom, vec![4, 5, 6, 7]);
    assert!(game.background().is_row_empty(19));
    assert!(!game.is_over());
}

#[test]
fn test_illegal_moves_leave_state_unchanged() {
    let mut game = Game::from_state(Grid::new(), spawned(ShapeKind::O, 1).with_offset(0, 19), 5);
    let before = *game.active();

    assert!(!game.move_left());
    assert_eq!(*game.active(), before);
    assert_eq!(game.background().filled_count(), 0);
}

#[test]
fn test_move_down_locks_resting_piece() {
    let mut game = Game::from_state(Grid::new(), spawned(ShapeKind::O, 1).with_offset(3, 19), 5);
    assert!(!game.can_move_down());

    game.move_down();
    assert_eq!(game.background().filled_count(), 4);
    assert_eq!(game.background().get(3, 19), Some(Some(BlockColor::Orange)));
    assert!(game.active().offset_y() < 0);
}

#[test]
fn test_lock_above_grid_only_writes_visible_cells() {
    let mut grid = Grid::new();
    grid.set(5, 1, Some(BlockColor::Red));
    // Upright I with only its lowest cell inside the grid, resting on (5, 1).
    let piece = spawned(ShapeKind::I, 2).with_offset(5, -3);
    let mut game = Game::from_state(grid, piece, 6);

    game.move_down();
    assert_eq!(game.background().filled_count(), 2);
    assert_eq!(game.background().get(5, 0), Some(Some(BlockColor::Orange)));
}

#[test]
fn test_controls_are_noops_when_over() {
    let mut game = blocked_spawn();
    let before = *game.active();
    let grid = *game.background();

    for intent in [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::MoveDown,
        Intent::Drop,
        Intent::RotateCw,
        Intent::RotateCcw,
        Intent::TogglePause,
    ] {
        assert!(!game.apply(intent), "{intent:?} should be ignored");
    }
    assert_eq!(*game.active(), before);
    assert_eq!(*game.background(), grid);
}

#[test]
fn test_pause_toggles_and_blocks() {
    let mut game = Game::with_seed(8);
    assert!(game.apply(Intent::TogglePause));
    assert_eq!(game.status(), GameStatus::Paused);

    let before = *game.active();
    assert!(!game.apply(Intent::Drop));
    assert!(!game.tick());
    assert_eq!(*game.active(), before);

    assert!(game.apply(Intent::TogglePause));
    assert!(game.tick());
}

#[test]
fn test_restart_from_game_over() {
    let mut game = blocked_spawn();
    game.restart();

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.background().filled_count(), 0);
    assert_eq!(game.total_score(), 0);
    assert_eq!(game.active().bottom_edge(), 0);
}

#[test]
fn test_start_resets_paused_game() {
    let mut game = Game::with_seed(21);
    game.toggle_pause();
    game.start();
    assert!(!game.is_paused());
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_game_eventually_ends_without_input() {
    let mut game = Game::with_seed(2024);
    let mut locks = 0;
    for _ in 0..20_000 {
        if game.is_over() {
            break;
        }
        game.drop_block();
        if game.take_last_event().is_some() {
            locks += 1;
        }
    }
    assert!(game.is_over());
    assert!(locks > 0);
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn test_render_cells_overlay_active_piece() {
    let mut game = Game::from_state(Grid::new(), spawned(ShapeKind::O, 1), 9);
    game.move_down();
    game.move_down();

    let cells: Vec<_> = game.render_cells().collect();
    assert_eq!(cells.len(), ROWS * COLUMNS);
    assert_eq!(cells.iter().filter(|c| c.is_some()).count(), 4);
    assert_eq!(cells[5], Some(BlockColor::Orange));
    assert_eq!(cells[COLUMNS + 6], Some(BlockColor::Orange));
    // Background stays clean while the piece is falling.
    assert_eq!(game.background().filled_count(), 0);
}

#[test]
fn test_sliding_over_filled_column_is_not_game_over() {
    let mut grid = Grid::new();
    for y in 0..ROWS as i8 {
        grid.set(0, y, Some(BlockColor::Red));
    }
    let mut game = Game::from_state(grid, spawned(ShapeKind::O, 1), 12);
    assert!(!game.is_over());

    while game.move_left() {}
    assert_eq!(game.active().offset_x(), 0);
    assert!(!game.can_move_down());
    assert!(!game.is_over());
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.take_last_event(), None);

    // Still controllable: step out and back.
    assert!(game.move_right());
    assert!(game.move_left());

    // Gravity locks it (every cell above the grid) and spawns the next piece.
    assert!(game.tick());
    assert_eq!(
        game.take_last_event(),
        Some(LockEvent {
            lines_cleared: 0,
            game_over: false
        })
    );
    assert!(!game.is_over());
    assert_eq!(game.background().filled_count(), ROWS);
}

#[test]
fn test_rotation_rejected_below_floor() {
    // Flat I on the last row; turning upright would reach past row 20.
    let piece = spawned(ShapeKind::I, 1).with_offset(4, 20);
    let mut game = Game::from_state(Grid::new(), piece, 13);

    assert!(!game.rotate_clockwise());
    assert!(!game.rotate_counterclockwise());
    assert_eq!((game.active().offset_x(), game.active().offset_y()), (4, 20));
    assert_eq!(game.active().rotation_index(), 1);
    assert_eq!(game.background().filled_count(), 0);
}

#[test]
fn test_rotation_rejected_by_settled_cell() {
    let mut grid = Grid::new();
    grid.set(4, 7, Some(BlockColor::Green));
    // Upright at x = 4 would cover rows 5..=8, including (4, 7).
    let piece = spawned(ShapeKind::I, 1).with_offset(4, 5);
    let mut game = Game::from_state(grid, piece, 14);

    assert!(!game.rotate_clockwise());
    assert!(!game.rotate_counterclockwise());
    assert_eq!((game.active().offset_x(), game.active().offset_y()), (4, 5));
    assert_eq!(game.active().rotation_index(), 1);
    assert_eq!(game.background().filled_count(), 1);
}
