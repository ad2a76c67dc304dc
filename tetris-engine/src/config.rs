//! Configuration for an Engine

use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::geometry::PieceKind;

/// Default number of grid columns
pub const COLS: usize = 10;

/// Default number of grid rows
pub const ROWS: usize = 20;

/// Default time between automatic gravity steps
pub const DEFAULT_FALL_INTERVAL: Duration = Duration::from_millis(500);

/// Row offset every new piece starts at, two rows above the visible grid
pub const SPAWN_Y: isize = -2;

/// Number of top rows that end the game when occupied after a lock
pub const GAME_OVER_ROWS: usize = 2;

/// Main configuration for an Engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid width, fixed for the lifetime of a game
    pub cols: usize,

    /// Grid height, fixed for the lifetime of a game
    pub rows: usize,

    /// Accumulated tick time that triggers one gravity step
    pub fall_interval: Duration,

    /// Seed for the piece spawner (entropy-seeded if None)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
            fall_interval: DEFAULT_FALL_INTERVAL,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid dimensions
    pub fn with_dimensions(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    /// Set the fall interval
    pub fn with_fall_interval(mut self, fall_interval: Duration) -> Self {
        self.fall_interval = fall_interval;
        self
    }

    /// Set the spawner seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Smallest grid width that fits the widest catalog piece
    pub fn min_cols() -> usize {
        PieceKind::ALL
            .iter()
            .map(|kind| kind.base_shape().width())
            .max()
            .unwrap_or(1)
    }

    /// Check construction preconditions
    pub fn validate(&self) -> Result<()> {
        let min_cols = Self::min_cols();
        if self.cols < min_cols || self.rows < GAME_OVER_ROWS {
            return Err(EngineError::InvalidDimensions {
                cols: self.cols,
                rows: self.rows,
                min_cols,
                min_rows: GAME_OVER_ROWS,
            });
        }
        if self.fall_interval.is_zero() {
            return Err(EngineError::InvalidFallInterval);
        }
        Ok(())
    }
}
