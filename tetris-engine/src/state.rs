use serde::{Deserialize, Serialize};

use crate::geometry::Piece;
use crate::grid::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    /// Terminal: only a new engine can resume play
    GameOver,
}

/// Everything that changes during a game, owned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GameState {
    pub grid: Grid,
    pub piece: Piece,
    pub position: Position,
    pub score: u64,
    pub status: GameStatus,
}

/// Read-only copy of the game for renderers and remote observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub piece: Piece,
    pub position: Position,
    pub score: u64,
    pub game_over: bool,
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            piece: self.piece.clone(),
            position: self.position,
            score: self.score,
            game_over: self.status == GameStatus::GameOver,
        }
    }
}

impl GameSnapshot {
    /// Grid with the active piece drawn in; parts above the grid are clipped
    pub fn composite(&self) -> Grid {
        let mut grid = self.grid.clone();
        if !self.game_over {
            grid.lock(self.piece.shape(), self.position, self.piece.cell_type());
        }
        grid
    }
}
