//! Game state module - the single owner of everything a running game needs
//!
//! Ties together board, piece catalog, RNG and scoring. Handles the falling
//! piece (move, rotate with kicks, soft/hard drop), the lock → clear → spawn
//! cycle, gravity timing, pause and game over.
//!
//! State machine:
//!
//! ```text
//!   Running ──lock with full rows──▶ Clearing ──elapsed > 300ms──▶ Running
//!      │  ▲                              │
//!      ▼  │ toggle pause                 ▼ toggle pause (resumes into Clearing)
//!     Paused                           Paused
//!
//!   Running ──spawn blocked──▶ GameOver ──reset──▶ Running
//! ```

use std::vec::Drain;

use tracing::{debug, info};

use crate::board::{Board, FullRows};
use crate::pieces::Shape;
use crate::rng::PieceQueue;
use crate::scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece at its spawn position: horizontally centred, origin on row 0.
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::spawn(kind);
        Self {
            kind,
            shape,
            x: (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8,
            y: 0,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Rows waiting to be removed while the flash plays.
#[derive(Debug, Clone)]
struct ClearAnimation {
    rows: FullRows,
    elapsed_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    status: GameStatus,
    clearing: Option<ClearAnimation>,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Time accumulated towards the next gravity step.
    drop_timer_ms: u32,
    /// Timestamp of the previous `advance_to` call; `None` right after a
    /// resume so the next frame sees a zero delta.
    last_frame_ms: Option<u64>,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    signals: Vec<Signal>,
}

impl GameState {
    /// Create a running game with the first piece already spawned.
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed),
            status: GameStatus::Running,
            clearing: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0,
            last_frame_ms: None,
            episode_id: 0,
            signals: Vec::with_capacity(16),
        };
        state.spawn_next();
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Kind of the queued next piece.
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions (tests, benches, puzzles).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Rows pending removal; empty unless a clear is in progress.
    pub fn clearing_rows(&self) -> &[usize] {
        self.clearing.as_ref().map_or(&[], |c| c.rows.as_slice())
    }

    /// Elapsed flash time, if a clear is in progress.
    pub fn clear_elapsed_ms(&self) -> Option<u32> {
        self.clearing.as_ref().map(|c| c.elapsed_ms)
    }

    /// Signals emitted since the last drain, oldest first.
    pub fn pending_signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Hand queued signals to the presentation layer.
    pub fn drain_signals(&mut self) -> Drain<'_, Signal> {
        self.signals.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_id_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.queue.peek();
        out.next_shape = Shape::spawn(out.next);
        out.status = self.status;
        out.clearing_rows = [false; BOARD_HEIGHT as usize];
        for &y in self.clearing_rows() {
            out.clearing_rows[y] = true;
        }
        out.clear_elapsed_ms = self.clear_elapsed_ms().unwrap_or(0);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.episode_id = self.episode_id;
        out.seed = self.queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the active piece with a freshly spawned `kind`.
    ///
    /// Returns false and ends the game when the spawn position is obstructed.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Tetromino::new(kind);
        self.active = Some(piece);

        if piece.collides(&self.board) {
            self.end_game();
            return false;
        }

        debug!(kind = kind.letter(), x = piece.x, "spawned piece");
        true
    }

    /// Promote the queued piece and draw a new preview.
    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        self.spawn(kind)
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        self.clearing = None;
        self.signals.push(Signal::GameOver { score: self.score });
        info!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game over"
        );
    }

    /// The active piece, if the player is allowed to act on it right now.
    fn controllable(&self) -> Option<Tetromino> {
        if self.status != GameStatus::Running {
            return None;
        }
        self.active
    }

    /// Shift the piece one column (`dir` is -1 or +1).
    pub fn move_piece(&mut self, dir: i8) -> bool {
        let Some(mut piece) = self.controllable() else {
            return false;
        };

        piece.x += dir;
        if piece.collides(&self.board) {
            return false;
        }

        self.active = Some(piece);
        self.signals.push(Signal::Move);
        true
    }

    /// Rotate in place, falling back to horizontal kicks.
    ///
    /// Kick offsets run 1, -2, 3, -4, ... and are applied cumulatively to x.
    /// Once the next offset would exceed the matrix width the rotation is
    /// abandoned and the piece keeps its old shape and column.
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        let Some(mut piece) = self.controllable() else {
            return false;
        };

        piece.shape.rotate(dir);
        let width = piece.shape.size() as i8;
        let mut offset: i8 = 1;

        while piece.collides(&self.board) {
            piece.x += offset;
            offset = -(offset + offset.signum());
            if offset > width {
                return false;
            }
        }

        self.active = Some(piece);
        self.signals.push(Signal::Rotate);
        true
    }

    /// Move the piece down one row, locking it if it cannot go further.
    ///
    /// Returns true when the piece locked. No points are awarded here; the
    /// player command adds its own bonus.
    pub fn soft_drop(&mut self) -> bool {
        if self.controllable().is_none() {
            return false;
        }
        self.step_down()
    }

    /// One gravity step (shared by gravity and soft drop).
    fn step_down(&mut self) -> bool {
        self.drop_timer_ms = 0;

        let Some(mut piece) = self.active else {
            return false;
        };

        piece.y += 1;
        if piece.collides(&self.board) {
            self.lock_piece(Signal::Lock);
            return true;
        }

        self.active = Some(piece);
        false
    }

    /// Drop the piece to the floor and lock it. Returns the bonus awarded.
    ///
    /// Two points are paid for every step attempted, including the final one
    /// that hits the stack.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(mut piece) = self.controllable() else {
            return 0;
        };

        let mut steps: u32 = 0;
        while !piece.collides(&self.board) {
            piece.y += 1;
            steps += 1;
        }
        piece.y -= 1;

        let points = hard_drop_score(steps);
        self.score = self.score.saturating_add(points);
        self.active = Some(piece);
        self.drop_timer_ms = 0;

        self.lock_piece(Signal::HardDrop);
        points
    }

    /// Merge the active piece and move on to clearing or the next spawn.
    fn lock_piece(&mut self, signal: Signal) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y, piece.kind);
        self.signals.push(signal);
        debug!(kind = piece.kind.letter(), x = piece.x, y = piece.y, "locked piece");

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next();
        } else {
            self.begin_clear(rows);
        }
    }

    fn begin_clear(&mut self, rows: FullRows) {
        let count = rows.len();

        let points = line_clear_score(count, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(count as u32);
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_ms(self.level);

        debug!(
            rows = count,
            points,
            lines = self.lines,
            level = self.level,
            "clearing rows"
        );

        self.clearing = Some(ClearAnimation {
            rows,
            elapsed_ms: 0,
        });
        self.status = GameStatus::Clearing;
        self.signals.push(Signal::Clear { rows: count as u8 });
    }

    fn finish_clear(&mut self) {
        if let Some(anim) = self.clearing.take() {
            self.board.clear_rows(&anim.rows);
        }
        self.status = GameStatus::Running;
        self.spawn_next();
    }

    /// Calculate the ghost piece Y position (where the piece would land)
    ///
    /// Works on a copy; the real piece is never touched.
    pub fn ghost_y(&self) -> Option<i8> {
        let mut ghost = self.active?;
        while !ghost.collides(&self.board) {
            ghost.y += 1;
        }
        Some(ghost.y - 1)
    }

    /// Advance the game by `elapsed_ms`.
    ///
    /// Returns true when something visible happened (a gravity step, a lock
    /// or the end of a clear).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.status {
            GameStatus::Paused | GameStatus::GameOver => false,
            GameStatus::Clearing => {
                let Some(anim) = self.clearing.as_mut() else {
                    self.status = GameStatus::Running;
                    return false;
                };
                anim.elapsed_ms = anim.elapsed_ms.saturating_add(elapsed_ms);
                if anim.elapsed_ms <= CLEAR_ANIMATION_MS {
                    return false;
                }
                self.finish_clear();
                true
            }
            GameStatus::Running => {
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms > self.drop_interval_ms {
                    self.step_down();
                    return true;
                }
                false
            }
        }
    }

    /// Frame-clock entry point: advance to a monotonic timestamp.
    ///
    /// The first call after construction, a reset or a resume only records
    /// the timestamp.
    pub fn advance_to(&mut self, now_ms: u64) -> bool {
        let delta = match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_frame_ms = Some(now_ms);
        self.tick(u32::try_from(delta).unwrap_or(u32::MAX))
    }

    /// Switch between playing and paused. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running | GameStatus::Clearing => {
                self.status = GameStatus::Paused;
                info!("paused");
                true
            }
            GameStatus::Paused => {
                self.status = if self.clearing.is_some() {
                    GameStatus::Clearing
                } else {
                    GameStatus::Running
                };
                self.last_frame_ms = None;
                info!("resumed");
                true
            }
            GameStatus::GameOver => false,
        }
    }

    /// Start over with an empty board. The piece sequence continues.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.clearing = None;
        self.status = GameStatus::Running;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0;
        self.last_frame_ms = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        info!(episode = self.episode_id, "reset");
        self.spawn_next();
    }

    /// Apply a player command. Returns false when it had no effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Reset => {
                self.reset();
                true
            }
            Command::TogglePause => self.toggle_pause(),
            _ if self.controllable().is_none() => false,
            Command::MoveLeft => self.move_piece(-1),
            Command::MoveRight => self.move_piece(1),
            Command::SoftDrop => {
                // The bonus lands after the step, so a lock that ends the
                // game reports the score without it.
                self.step_down();
                self.score = self.score.saturating_add(SOFT_DROP_POINTS);
                true
            }
            Command::HardDrop => {
                self.hard_drop();
                true
            }
            Command::RotateCw => self.rotate(RotateDir::Cw),
            Command::RotateCcw => self.rotate(RotateDir::Ccw),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
