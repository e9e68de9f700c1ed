//! Integration tests for the full game loop

use blockfall::core::GameState;
use blockfall::types::{Command, GameStatus, PieceKind, Signal, BOARD_HEIGHT, BOARD_WIDTH};

fn fresh(kind: PieceKind) -> GameState {
    let mut state = GameState::new(12345);
    assert!(state.spawn(kind));
    state.drain_signals().count();
    state
}

fn occupied_cells(state: &GameState) -> Vec<(i8, i8)> {
    let mut cells = Vec::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if state.board().is_occupied(x, y) {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn test_square_hard_drop_to_bottom_left() {
    let mut state = fresh(PieceKind::O);
    let start = state.active().unwrap();
    assert_eq!((start.x, start.y), (4, 0));

    while state.apply(Command::MoveLeft) {}
    assert_eq!(state.active().unwrap().x, 0);

    assert!(state.apply(Command::HardDrop));

    assert_eq!(occupied_cells(&state), vec![(0, 18), (1, 18), (0, 19), (1, 19)]);
    // 18 rows descended plus the colliding step that ended the drop.
    assert_eq!(state.score(), 2 * 19);
    assert_eq!(state.status(), GameStatus::Running);

    let signals: Vec<Signal> = state.drain_signals().collect();
    assert_eq!(
        signals,
        vec![Signal::Move, Signal::Move, Signal::Move, Signal::Move, Signal::HardDrop]
    );
}

#[test]
fn test_completing_bottom_row_runs_clear_cycle() {
    let mut state = fresh(PieceKind::I);
    // Vertical I sits in matrix column 1, so x = 3 drops it into column 4.
    state.board_mut().fill_row_except(19, &[4], PieceKind::L);
    let level = state.level();

    state.apply(Command::HardDrop);
    assert_eq!(state.status(), GameStatus::Clearing);
    assert_eq!(state.lines(), 1);
    let after_drop = 2 * 17;
    assert_eq!(state.score(), after_drop + 100 * level);

    // Frames within the threshold keep the row on screen.
    for _ in 0..18 {
        state.tick(16);
    }
    assert_eq!(state.status(), GameStatus::Clearing);
    assert!(state.board().is_row_full(19));

    for _ in 0..2 {
        state.tick(16);
    }
    assert_eq!(state.status(), GameStatus::Running);
    assert!(!state.board().is_row_full(19));

    // The rest of the I column slid down by one row.
    assert_eq!(occupied_cells(&state), vec![(4, 17), (4, 18), (4, 19)]);
    assert!(state.active().is_some());

    let signals: Vec<Signal> = state.drain_signals().collect();
    assert_eq!(signals, vec![Signal::HardDrop, Signal::Clear { rows: 1 }]);
}

#[test]
fn test_four_row_clear() {
    let mut state = fresh(PieceKind::I);
    for y in 16..20 {
        state.board_mut().fill_row_except(y, &[4], PieceKind::T);
    }

    let points = state.hard_drop();
    assert_eq!(points, 2 * 17);
    assert_eq!(state.clearing_rows(), &[19, 18, 17, 16]);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.score(), 2 * 17 + 800);

    state.tick(301);
    assert!(occupied_cells(&state).is_empty());
}

#[test]
fn test_soft_drop_command_scores_and_locks() {
    let mut state = fresh(PieceKind::O);
    for _ in 0..18 {
        state.apply(Command::SoftDrop);
    }
    assert_eq!(state.active().unwrap().y, 18);
    assert_eq!(state.score(), 18);

    let next = state.next_piece();
    state.apply(Command::SoftDrop);
    assert_eq!(state.score(), 19);
    assert_eq!(state.active().unwrap().kind, next);
    assert_eq!(state.drain_signals().last(), Some(Signal::Lock));
}

#[test]
fn test_gravity_through_frame_clock() {
    let mut state = fresh(PieceKind::T);
    let mut now = 5_000u64;
    state.advance_to(now);

    // 62 frames of 16ms = 992ms, still below the 1000ms interval.
    for _ in 0..62 {
        now += 16;
        state.advance_to(now);
    }
    assert_eq!(state.active().unwrap().y, 0);

    now += 16;
    state.advance_to(now);
    assert_eq!(state.active().unwrap().y, 1);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_game_over_and_reset() {
    let mut state = fresh(PieceKind::O);
    for y in 2..BOARD_HEIGHT as i8 {
        state.board_mut().fill_row_except(y, &[0], PieceKind::S);
    }

    state.apply(Command::HardDrop);
    assert_eq!(state.status(), GameStatus::GameOver);
    let final_score = state.score();
    assert!(state
        .drain_signals()
        .any(|s| s == Signal::GameOver { score: final_score }));

    // Nothing but reset gets through.
    for cmd in [
        Command::MoveLeft,
        Command::RotateCw,
        Command::HardDrop,
        Command::SoftDrop,
        Command::TogglePause,
    ] {
        assert!(!state.apply(cmd), "{:?}", cmd);
    }
    assert!(!state.tick(60_000));
    assert_eq!(state.score(), final_score);

    let episode = state.episode_id();
    state.apply(Command::Reset);
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.episode_id(), episode + 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.drop_interval_ms(), 1000);
    assert!(occupied_cells(&state).is_empty());
}

#[test]
fn test_reset_from_running_and_paused() {
    let mut state = fresh(PieceKind::T);
    state.apply(Command::HardDrop);
    state.apply(Command::TogglePause);
    assert_eq!(state.status(), GameStatus::Paused);

    state.apply(Command::Reset);
    assert_eq!(state.status(), GameStatus::Running);
    assert!(occupied_cells(&state).is_empty());
}

#[test]
fn test_unrecognized_command_name_is_ignored() {
    assert_eq!(Command::from_str("hold"), None);
    assert_eq!(Command::from_str("rotateCW"), Some(Command::RotateCw));
}
