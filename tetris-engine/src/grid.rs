use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geometry::{CellType, Shape};

/// Offset of a shape's top-left corner relative to the grid's top-left.
/// `y` may be negative while a piece is still above the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub fn new(x: isize, y: isize) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: isize, dy: isize) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed-size playfield. Every row always holds exactly `cols` cells.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<CellType>>,
}

// Unchecked wire form, validated before it becomes a Grid
#[derive(Deserialize)]
struct RawGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<CellType>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = EngineError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.cells.len() != raw.rows {
            return Err(EngineError::MalformedGrid(format!(
                "expected {} rows, found {}",
                raw.rows,
                raw.cells.len()
            )));
        }
        let ragged = raw.cells.iter().enumerate().find(|(_, row)| row.len() != raw.cols);
        if let Some((y, row)) = ragged {
            return Err(EngineError::MalformedGrid(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                raw.cols
            )));
        }
        Ok(Grid {
            cols: raw.cols,
            rows: raw.rows,
            cells: raw.cells,
        })
    }
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Grid {
            cols,
            rows,
            cells: vec![vec![CellType::Empty; cols]; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at column `x`, row `y`, or None outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<CellType> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Set a cell; writes outside the grid are ignored
    pub fn set(&mut self, x: usize, y: usize, cell_type: CellType) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = cell_type;
        }
    }

    pub fn row(&self, y: usize) -> Option<&[CellType]> {
        self.cells.get(y).map(Vec::as_slice)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellType]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(CellType::is_occupied))
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).is_none_or(|row| row.iter().all(CellType::is_empty))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    /// Whether `shape` placed at `position` overlaps a wall, the floor or a locked cell.
    ///
    /// Cells above the grid (`y < 0`) are still checked against the side walls but never
    /// against grid contents.
    pub fn collide(&self, shape: &Shape, position: Position) -> bool {
        shape.occupied().any(|(cell_x, cell_y)| {
            let x = position.x + cell_x as isize;
            let y = position.y + cell_y as isize;
            if x < 0 || x >= self.cols as isize || y >= self.rows as isize {
                return true;
            }
            y >= 0 && self.cells[y as usize][x as usize].is_occupied()
        })
    }

    /// Write the occupied cells of `shape` at `position` with `cell_type`.
    /// Cells above the grid are dropped.
    pub fn lock(&mut self, shape: &Shape, position: Position, cell_type: CellType) {
        for (cell_x, cell_y) in shape.occupied() {
            let x = position.x + cell_x as isize;
            let y = position.y + cell_y as isize;
            if x >= 0 && y >= 0 {
                self.set(x as usize, y as usize, cell_type);
            }
        }
    }

    /// Remove every full row and refill from the top with empty rows.
    ///
    /// Returns the indices the full rows had before compaction, ascending.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let cleared: Vec<usize> = (0..self.rows).filter(|y| self.is_row_full(*y)).collect();
        if cleared.is_empty() {
            return cleared;
        }
        let cols = self.cols;
        self.cells.retain(|row| !row.iter().all(CellType::is_occupied));
        let refill = std::iter::repeat_with(|| vec![CellType::Empty; cols]).take(cleared.len());
        self.cells.splice(0..0, refill);
        cleared
    }
}
