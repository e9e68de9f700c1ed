//! Core game logic - pure, deterministic, and testable
//!
//! Holds all the rules: the board, the piece catalog, the falling piece
//! controller, scoring and the game state machine. There is no dependency on
//! a terminal or any other I/O; the only outward channel is a queue of
//! [`Signal`](types::Signal)s that a front end drains for sound or visual cues.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merge, full-row scan and compaction
//! - [`pieces`]: shape matrices and the matrix rotation transform
//! - [`game_state`]: active piece, kicks, drops, clear animation, pause, timing
//! - [`rng`]: seeded uniform piece source with a one-piece preview
//! - [`scoring`]: line points, drop bonuses and the level curve
//! - [`snapshot`]: copyable view of a frame for renderers
//!
//! # Rules
//!
//! - Pieces are chosen uniformly at random; there is no bag and no hold.
//! - Rotation transposes the matrix and then reverses rows (clockwise) or the
//!   row order (counter-clockwise). On collision the piece tries horizontal
//!   kicks of +1, -1, +2, ... before giving up.
//! - A locked piece that completes rows starts a 300ms flash; the rows are
//!   removed and the next piece spawns once it ends.
//! - A piece that cannot spawn ends the game.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, GameStatus, Signal};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::HardDrop);
//! assert!(game.score() > 0); // hard drop awards points
//!
//! let signals: Vec<Signal> = game.drain_signals().collect();
//! assert!(signals.contains(&Signal::HardDrop));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance_to`](game_state::GameState::advance_to) with a
//! monotonic millisecond clock every frame, or
//! [`GameState::tick`](game_state::GameState::tick) with an explicit delta.
//! Gravity fires once the accumulated time exceeds the level's interval.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullRows};
pub use game_state::{GameState, Tetromino};
pub use pieces::Shape;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
