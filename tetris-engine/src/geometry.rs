use serde::{Deserialize, Serialize};

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty,
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl CellType {
    pub fn is_empty(&self) -> bool {
        *self == CellType::Empty
    }

    pub fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    /// Piece kind this cell was locked from, if any
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            CellType::Empty => None,
            CellType::I => Some(PieceKind::I),
            CellType::J => Some(PieceKind::J),
            CellType::L => Some(PieceKind::L),
            CellType::O => Some(PieceKind::O),
            CellType::S => Some(PieceKind::S),
            CellType::T => Some(PieceKind::T),
            CellType::Z => Some(PieceKind::Z),
        }
    }
}

/// The seven canonical tetrominoes. Doubles as the colour identifier of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

const SHAPE_I: &[&[bool]] = &[&[true, true, true, true]];
const SHAPE_J: &[&[bool]] = &[&[true, false, false], &[true, true, true]];
const SHAPE_L: &[&[bool]] = &[&[false, false, true], &[true, true, true]];
const SHAPE_O: &[&[bool]] = &[&[true, true], &[true, true]];
const SHAPE_S: &[&[bool]] = &[&[false, true, true], &[true, true, false]];
const SHAPE_T: &[&[bool]] = &[&[false, true, false], &[true, true, true]];
const SHAPE_Z: &[&[bool]] = &[&[true, true, false], &[false, true, true]];

impl PieceKind {
    /// Catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Unrotated matrix of this piece
    pub fn base_shape(&self) -> Shape {
        let rows = match self {
            PieceKind::I => SHAPE_I,
            PieceKind::J => SHAPE_J,
            PieceKind::L => SHAPE_L,
            PieceKind::O => SHAPE_O,
            PieceKind::S => SHAPE_S,
            PieceKind::T => SHAPE_T,
            PieceKind::Z => SHAPE_Z,
        };
        Shape::from_rows(rows.iter().map(|row| row.to_vec()).collect())
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            PieceKind::I => CellType::I,
            PieceKind::J => CellType::J,
            PieceKind::L => CellType::L,
            PieceKind::O => CellType::O,
            PieceKind::S => CellType::S,
            PieceKind::T => CellType::T,
            PieceKind::Z => CellType::Z,
        }
    }
}

/// Boolean occupancy matrix of a piece in one orientation, stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl From<Vec<Vec<bool>>> for Shape {
    fn from(rows: Vec<Vec<bool>>) -> Self {
        Shape::from_rows(rows)
    }
}

impl From<Shape> for Vec<Vec<bool>> {
    fn from(shape: Shape) -> Self {
        shape.rows
    }
}

impl Shape {
    /// Build a shape from rows. Short rows are padded with empty cells to the widest row.
    pub fn from_rows(mut rows: Vec<Vec<bool>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, false);
        }
        Shape { rows }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Occupancy at column `x`, row `y`; false outside the matrix
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Coordinates `(x, y)` of every occupied cell, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn rotated(&self) -> Shape {
        rotate(self)
    }
}

/// Quarter-turn rotation: transpose, then reverse the row order.
///
/// Row `i`, column `j` of the result is row `j`, column `width - 1 - i` of the input,
/// so a `h x w` shape becomes `w x h`. Four applications give back the input.
pub fn rotate(shape: &Shape) -> Shape {
    let width = shape.width();
    let height = shape.height();
    let rows = (0..width)
        .map(|i| (0..height).map(|j| shape.get(width - 1 - i, j)).collect())
        .collect();
    Shape { rows }
}

/// A shape together with the kind it was spawned as
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: Shape,
    kind: PieceKind,
}

impl Piece {
    /// Piece in its base orientation
    pub fn new(kind: PieceKind) -> Self {
        Piece {
            shape: kind.base_shape(),
            kind,
        }
    }

    /// Piece with an arbitrary shape, e.g. one restored from a snapshot
    pub fn with_shape(shape: Shape, kind: PieceKind) -> Self {
        Piece { shape, kind }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cell_type(&self) -> CellType {
        self.kind.cell_type()
    }

    /// Same piece turned a quarter, colour unchanged
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: rotate(&self.shape),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: &[&[u8]]) -> Shape {
        Shape::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| *c != 0).collect())
                .collect(),
        )
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let t = PieceKind::T.base_shape();
        assert_eq!((t.width(), t.height()), (3, 2));
        let r = rotate(&t);
        assert_eq!((r.width(), r.height()), (2, 3));
    }

    #[test]
    fn test_rotate_follows_transpose_reverse() {
        // out[i][j] = in[j][w - 1 - i]
        let j = PieceKind::J.base_shape();
        assert_eq!(rotate(&j), shape(&[&[0, 1], &[0, 1], &[1, 1]]));

        let t = PieceKind::T.base_shape();
        assert_eq!(rotate(&t), shape(&[&[0, 1], &[1, 1], &[0, 1]]));

        let i = PieceKind::I.base_shape();
        assert_eq!(rotate(&i), shape(&[&[1], &[1], &[1], &[1]]));
    }

    #[test]
    fn test_four_rotations_restore_every_piece() {
        for kind in PieceKind::ALL {
            let base = kind.base_shape();
            let mut s = base.clone();
            for _ in 0..4 {
                s = rotate(&s);
            }
            assert_eq!(s, base, "{:?} not restored", kind);
        }
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for kind in PieceKind::ALL {
            let mut s = kind.base_shape();
            for _ in 0..4 {
                assert_eq!(s.cell_count(), 4);
                s = s.rotated();
            }
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let o = PieceKind::O.base_shape();
        assert_eq!(rotate(&o), o);
    }

    #[test]
    fn test_catalog_matches_canonical_matrices() {
        assert_eq!(PieceKind::I.base_shape(), shape(&[&[1, 1, 1, 1]]));
        assert_eq!(PieceKind::L.base_shape(), shape(&[&[0, 0, 1], &[1, 1, 1]]));
        assert_eq!(PieceKind::O.base_shape(), shape(&[&[1, 1], &[1, 1]]));
        assert_eq!(PieceKind::S.base_shape(), shape(&[&[0, 1, 1], &[1, 1, 0]]));
        assert_eq!(PieceKind::Z.base_shape(), shape(&[&[1, 1, 0], &[0, 1, 1]]));
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let s = Shape::from_rows(vec![vec![true], vec![true, true, true]]);
        assert_eq!(s.width(), 3);
        assert!(!s.get(2, 0));
        assert!(s.get(2, 1));
    }

    #[test]
    fn test_json_ragged_rows_are_padded() {
        let s: Shape = serde_json::from_str("[[true],[true,true,true]]").unwrap();
        assert_eq!(s.width(), 3);
        assert_eq!(s.height(), 2);
        assert!(s.rows().iter().all(|row| row.len() == 3));
        assert_eq!(serde_json::to_string(&s).unwrap(), "[[true,false,false],[true,true,true]]");
    }

    #[test]
    fn test_occupied_is_row_major() {
        let s = PieceKind::S.base_shape();
        let cells: Vec<_> = s.occupied().collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_piece_rotation_keeps_colour() {
        let piece = Piece::new(PieceKind::Z);
        let rotated = piece.rotated();
        assert_eq!(rotated.kind(), PieceKind::Z);
        assert_eq!(rotated.cell_type(), CellType::Z);
        assert_eq!(rotated.shape(), &rotate(piece.shape()));
    }

    #[test]
    fn test_cell_type_kind_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.cell_type().kind(), Some(kind));
        }
        assert_eq!(CellType::Empty.kind(), None);
        assert!(CellType::Empty.is_empty());
    }
}
