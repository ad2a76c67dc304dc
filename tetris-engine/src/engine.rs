/// Game state machine
use std::time::Duration;

use crate::config::{EngineConfig, GAME_OVER_ROWS};
use crate::error::Result;
use crate::fall_timer::FallTimer;
use crate::geometry::Piece;
use crate::grid::{Grid, Position};
use crate::spawner::{spawn_position, PieceSource, Spawner};
use crate::state::{GameSnapshot, GameState, GameStatus};

/// Direction of a translation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    SoftDrop,
}

impl Direction {
    fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::SoftDrop => (0, 1),
        }
    }
}

/// Discrete commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// What happened when a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    /// Rows that were full right after the lock, ascending, indexed before compaction
    pub cleared_rows: Vec<usize>,
    /// Grid with the piece written in, before full rows were removed
    pub pre_clear: Grid,
    /// The game ended because the next piece had no room at its spawn position
    pub spawn_blocked: bool,
}

/// Outcome of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// Fall interval not reached, or the game is already over
    Idle,
    /// The piece descended one row
    Fell,
    /// The piece locked and the next one spawned
    Locked(LockReport),
    /// The piece locked and the game ended
    GameOver(LockReport),
}

/// Owns the grid, the active piece, the fall timer and the score.
///
/// Every mutation goes through a command or a tick. Rejected commands are silent no-ops,
/// and once the game is over nothing changes any more.
pub struct Engine {
    config: EngineConfig,
    state: GameState,
    timer: FallTimer,
    source: Box<dyn PieceSource>,
    last_cleared_rows: Vec<usize>,
}

impl Engine {
    /// Start a game with the random spawner, seeded from the config if a seed is set
    pub fn new(config: EngineConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => Self::with_source(config, Spawner::seeded(seed)),
            None => Self::with_source(config, Spawner::from_entropy()),
        }
    }

    /// Start a game drawing pieces from `source`
    pub fn with_source(config: EngineConfig, source: impl PieceSource + 'static) -> Result<Self> {
        config.validate()?;
        let mut source: Box<dyn PieceSource> = Box::new(source);
        let grid = Grid::new(config.cols, config.rows);
        let piece = source.next_piece();
        let position = spawn_position(config.cols, piece.shape());
        let status = if grid.collide(piece.shape(), position) {
            tracing::info!("First piece {:?} has no room, game over", piece.kind());
            GameStatus::GameOver
        } else {
            GameStatus::Running
        };
        tracing::debug!(
            "Engine started on {}x{} grid, fall interval {:?}",
            config.cols,
            config.rows,
            config.fall_interval
        );
        Ok(Engine {
            timer: FallTimer::new(config.fall_interval),
            config,
            state: GameState {
                grid,
                piece,
                position,
                score: 0,
                status,
            },
            source,
            last_cleared_rows: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.state.piece
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_running(&self) -> bool {
        self.state.status == GameStatus::Running
    }

    /// Rows removed by the most recent lock; emptied by the next command or tick
    pub fn last_cleared_rows(&self) -> &[usize] {
        &self.last_cleared_rows
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Apply an input command. Returns true if the piece moved or turned.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(Direction::Left),
            Command::MoveRight => self.move_piece(Direction::Right),
            Command::SoftDrop => self.move_piece(Direction::SoftDrop),
            Command::Rotate => self.rotate_piece(),
        }
    }

    /// Translate the active piece one cell, if the target is free
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        self.last_cleared_rows.clear();
        if !self.is_running() {
            return false;
        }
        let (dx, dy) = direction.delta();
        let candidate = self.state.position.offset(dx, dy);
        if self.state.grid.collide(self.state.piece.shape(), candidate) {
            tracing::trace!("Move {:?} rejected at {:?}", direction, self.state.position);
            return false;
        }
        self.state.position = candidate;
        true
    }

    /// Turn the active piece a quarter in place, if the turned shape fits. No wall kicks.
    pub fn rotate_piece(&mut self) -> bool {
        self.last_cleared_rows.clear();
        if !self.is_running() {
            return false;
        }
        let rotated = self.state.piece.rotated();
        if self.state.grid.collide(rotated.shape(), self.state.position) {
            tracing::trace!("Rotation rejected at {:?}", self.state.position);
            return false;
        }
        self.state.piece = rotated;
        true
    }

    /// Advance the fall timer by `elapsed` and run a gravity step when it fires
    pub fn tick(&mut self, elapsed: Duration) -> StepResult {
        self.last_cleared_rows.clear();
        if !self.is_running() {
            return StepResult::Idle;
        }
        if !self.timer.tick(elapsed) {
            return StepResult::Idle;
        }
        self.gravity_step()
    }

    fn gravity_step(&mut self) -> StepResult {
        let candidate = self.state.position.offset(0, 1);
        if !self.state.grid.collide(self.state.piece.shape(), candidate) {
            self.state.position = candidate;
            return StepResult::Fell;
        }

        let state = &mut self.state;
        state
            .grid
            .lock(state.piece.shape(), state.position, state.piece.cell_type());
        let pre_clear = state.grid.clone();
        let cleared_rows = state.grid.clear_full_rows();
        state.score += cleared_rows.len() as u64;
        tracing::debug!(
            "Locked {:?} at {:?}, cleared rows {:?}, score {}",
            state.piece.kind(),
            state.position,
            cleared_rows,
            state.score
        );
        self.last_cleared_rows = cleared_rows.clone();

        let mut report = LockReport {
            cleared_rows,
            pre_clear,
            spawn_blocked: false,
        };

        if (0..GAME_OVER_ROWS).any(|y| !self.state.grid.is_row_empty(y)) {
            self.state.status = GameStatus::GameOver;
            tracing::info!("Stack reached the top rows, game over with score {}", self.state.score);
            return StepResult::GameOver(report);
        }

        if !self.spawn_next() {
            report.spawn_blocked = true;
            return StepResult::GameOver(report);
        }
        StepResult::Locked(report)
    }

    // Draw the next piece; it is only placed if its spawn position is free
    fn spawn_next(&mut self) -> bool {
        let piece = self.source.next_piece();
        let position = spawn_position(self.config.cols, piece.shape());
        if self.state.grid.collide(piece.shape(), position) {
            self.state.status = GameStatus::GameOver;
            tracing::info!(
                "No room to spawn {:?} at {:?}, game over with score {}",
                piece.kind(),
                position,
                self.state.score
            );
            return false;
        }
        tracing::debug!("Spawned {:?} at {:?}", piece.kind(), position);
        self.state.piece = piece;
        self.state.position = position;
        true
    }
}
