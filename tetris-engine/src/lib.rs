//! # tetris-engine
//!
//! Game-state engine for a falling-block puzzle on a fixed grid.
//!
//! ## Overview
//!
//! The engine owns the grid, the active piece, the fall timer and the score. Input sources
//! send discrete [`Command`]s, a clock driver calls [`Engine::tick`] with elapsed time, and
//! renderers read [`Engine::snapshot`] or the individual queries. Nothing here draws,
//! reads keys or sleeps.
//!
//! ## Rules
//!
//! - Seven tetrominoes, drawn uniformly at random, spawned centred two rows above the grid
//! - Moves and rotations that would collide are ignored; there are no wall kicks
//! - When gravity cannot move the piece down it locks, full rows are removed and each
//!   removed row scores one point
//! - The game ends when either of the two top rows holds a block after a lock, or when the
//!   next piece has no room to spawn
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tetris_engine::{Command, Engine, EngineConfig, StepResult};
//!
//! let mut engine = Engine::new(EngineConfig::default().with_seed(1)).unwrap();
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::Rotate);
//!
//! match engine.tick(Duration::from_millis(500)) {
//!     StepResult::Locked(report) => println!("cleared {:?}", report.cleared_rows),
//!     StepResult::GameOver(_) => println!("game over, score {}", engine.score()),
//!     StepResult::Fell | StepResult::Idle => {}
//! }
//! ```

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod fall_timer;
pub mod geometry;
pub mod grid;
pub mod spawner;
pub mod state;

// Re-exports for convenience
pub use config::{EngineConfig, COLS, DEFAULT_FALL_INTERVAL, GAME_OVER_ROWS, ROWS, SPAWN_Y};
pub use engine::{Command, Direction, Engine, LockReport, StepResult};
pub use error::{EngineError, Result};
pub use fall_timer::FallTimer;
pub use geometry::{rotate, CellType, Piece, PieceKind, Shape};
pub use grid::{Grid, Position};
pub use spawner::{spawn_position, PieceSource, Spawner};
pub use state::{GameSnapshot, GameStatus};
