/// Error types for the tetris-engine library
use thiserror::Error;

/// Result type alias for engine construction
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur when building an engine
///
/// Gameplay itself never fails: rejected moves are no-ops and game over is a state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Grid too small to hold every catalog piece or the game-over rows
    #[error("Invalid grid dimensions: {cols}x{rows} (need at least {min_cols}x{min_rows})")]
    InvalidDimensions {
        /// Requested column count
        cols: usize,
        /// Requested row count
        rows: usize,
        /// Smallest accepted column count
        min_cols: usize,
        /// Smallest accepted row count
        min_rows: usize,
    },

    /// Fall interval must be non-zero
    #[error("Invalid fall interval: must be greater than zero")]
    InvalidFallInterval,

    /// Serialized grid whose cells do not match its declared dimensions
    #[error("Malformed grid: {0}")]
    MalformedGrid(String),
}
