//! Shared types and constants
//!
//! Pure data shared by the core engine, the input mapper and the terminal
//! front end. Nothing in here depends on a rendering or I/O backend.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//! | `CLEAR_ANIMATION_MS` | 300 | Line-clear flash before rows are removed |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.id(), 7);
//! assert_eq!(PieceKind::from_id(7), Some(PieceKind::T));
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! assert_eq!(Command::from_str("jump"), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Duration of the line-clear flash. Rows are removed once the elapsed
/// animation time is strictly greater than this.
pub const CLEAR_ANIMATION_MS: u32 = 300;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear base points indexed by cleared-row count, multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row travelled during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Points awarded for every soft-drop command
pub const SOFT_DROP_POINTS: u32 = 1;

/// The seven piece kinds
///
/// The numeric id (1-7) is what locked board cells and shape matrices store,
/// and what presentation layers use for colour lookup:
/// - **I** = 1, cyan bar
/// - **L** = 2, orange
/// - **J** = 3, blue
/// - **O** = 4, yellow square
/// - **Z** = 5, red
/// - **S** = 6, green
/// - **T** = 7, purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    /// All kinds in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Numeric cell id (1-7).
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::O => 4,
            PieceKind::Z => 5,
            PieceKind::S => 6,
            PieceKind::T => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. `0` and anything above 7 map to `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Upper-case letter, as shown in the side panel.
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::O => "O",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::T => "T",
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Cw,
    Ccw,
}

impl RotateDir {
    pub fn reverse(self) -> Self {
        match self {
            RotateDir::Cw => RotateDir::Ccw,
            RotateDir::Ccw => RotateDir::Cw,
        }
    }
}

/// Player commands consumed by the engine.
///
/// Human input and any scripted driver go through the same enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell (1 point, locks when blocked)
    SoftDrop,
    /// Drop piece to the floor and lock (2 points per row)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause
    TogglePause,
    /// Start a fresh game (the only way out of game over)
    Reset,
}

impl Command {
    /// Parse a command name (case-insensitive camelCase)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "togglepause" | "pause" => Some(Command::TogglePause),
            "reset" | "restart" => Some(Command::Reset),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::TogglePause => "togglePause",
            Command::Reset => "reset",
        }
    }
}

/// Discrete events emitted by the engine, in order, for cue playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The piece moved sideways
    Move,
    /// The piece rotated (possibly after a kick)
    Rotate,
    /// The piece locked after a soft drop or gravity step
    Lock,
    /// The piece locked after a hard drop
    HardDrop,
    /// One or more rows are full and the clear animation started
    Clear { rows: u8 },
    /// The next piece could not spawn
    GameOver { score: u32 },
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Move => "move",
            Signal::Rotate => "rotate",
            Signal::Lock => "lock",
            Signal::HardDrop => "hard-drop",
            Signal::Clear { .. } => "clear",
            Signal::GameOver { .. } => "game-over",
        }
    }
}

/// Top-level machine state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    /// Full rows are flashing; gravity and spawn are suspended
    Clearing,
    Paused,
    /// Terminal until a reset
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Clearing => "clearing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game-over",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by the specified piece kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_ids_round_trip_through_from_id() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn piece_ids_follow_colour_table_order() {
        let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(PieceKind::O.id(), 4);
    }

    #[test]
    fn command_names_parse_back() {
        let all = [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::RotateCw,
            Command::RotateCcw,
            Command::TogglePause,
            Command::Reset,
        ];
        for cmd in all {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn scoring_constants() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(CLEAR_ANIMATION_MS, 300);
        assert_eq!(HARD_DROP_POINTS_PER_ROW, 2);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
    }

    #[test]
    fn rotate_dir_reverse() {
        assert_eq!(RotateDir::Cw.reverse(), RotateDir::Ccw);
        assert_eq!(RotateDir::Ccw.reverse(), RotateDir::Cw);
    }
}
