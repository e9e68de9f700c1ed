use crate::game_state::Tetromino;
use crate::pieces::Shape;
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of the occupied cells, optionally moved to another row.
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, y + dy))
    }
}

/// Everything a frame needs to draw, copied out of the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as kind ids, 0 = empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub next_shape: Shape,
    pub status: GameStatus,
    /// Rows currently flashing before removal.
    pub clearing_rows: [bool; BOARD_HEIGHT as usize],
    pub clear_elapsed_ms: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub episode_id: u32,
    pub seed: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            next_shape: Shape::spawn(PieceKind::I),
            status: GameStatus::Running,
            clearing_rows: [false; BOARD_HEIGHT as usize],
            clear_elapsed_ms: 0,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: 0,
            episode_id: 0,
            seed: 0,
        }
    }
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn clearing(&self) -> bool {
        self.clearing_rows.iter().any(|&r| r)
    }
}
