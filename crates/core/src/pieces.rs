//! Pieces module - tetromino templates, matrix rotation and wall kicks
//!
//! Shapes are small occupancy matrices (at most 4x4). Rotation replaces the
//! matrix with its clockwise turn (transpose, then reverse each row); the
//! rotated shape is then tried at a fixed list of kick offsets.

use serde::Serialize;

use crate::types::{ColorTag, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest matrix side used by any template
pub const MAX_SHAPE_SIDE: usize = 4;

/// Offsets tried by [`try_rotate`], in priority order:
/// in place, left, right, up, up-left, up-right.
pub const WALL_KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Occupancy matrix of a piece
///
/// Only the top-left `rows x cols` region of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns None if the matrix is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    const fn from_matrix<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < R {
            let mut x = 0;
            while x < C {
                cells[y][x] = m[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupancy at (row, col); false outside the matrix
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Occupied cells as (dx, dy) offsets from the top-left corner
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |y| {
            (0..self.cols as usize)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Matrix rows as 0/1 vectors (for display and debugging)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|y| {
                (0..self.cols as usize)
                    .map(|x| u8::from(self.cells[y][x]))
                    .collect()
            })
            .collect()
    }

    /// Clockwise quarter turn; see [`rotate`]
    pub fn rotated(&self) -> Self {
        rotate(self)
    }
}

/// Rotate a matrix 90° clockwise: transpose, then reverse each row.
///
/// A `rows x cols` matrix becomes `cols x rows`; cell `(i, j)` of the result is
/// cell `(rows - 1 - j, i)` of the input.
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
    for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
        for (j, out) in out_row.iter_mut().enumerate().take(rows) {
            *out = shape.cells[rows - 1 - j][i];
        }
    }
    Shape {
        rows: shape.cols,
        cols: shape.rows,
        cells,
    }
}

const I_SHAPE: Shape = Shape::from_matrix([[1, 1, 1, 1]]);
const J_SHAPE: Shape = Shape::from_matrix([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = Shape::from_matrix([[0, 0, 1], [1, 1, 1]]);
const O_SHAPE: Shape = Shape::from_matrix([[1, 1], [1, 1]]);
const S_SHAPE: Shape = Shape::from_matrix([[0, 1, 1], [1, 1, 0]]);
const T_SHAPE: Shape = Shape::from_matrix([[0, 1, 0], [1, 1, 1]]);
const Z_SHAPE: Shape = Shape::from_matrix([[1, 1, 0], [0, 1, 1]]);

/// Spawn orientation of a piece kind
pub fn template_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Immutable template data for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorTag,
    pub category: &'static str,
}

impl PieceTemplate {
    pub fn of(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: template_shape(kind),
            color: kind.color(),
            category: kind.category(),
        }
    }
}

/// Active falling piece
///
/// `y` may be negative while the piece is above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino in its template orientation at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: template_shape(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> ColorTag {
        self.kind.color()
    }

    /// Same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Try to rotate a piece with wall kicks.
///
/// `collides(shape, x, y)` reports whether a placement is blocked. Returns the
/// rotated shape and the kick offset that was applied, or None if every offset
/// collides (the caller keeps the original shape and position).
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = rotate(shape);

    WALL_KICKS
        .iter()
        .copied()
        .find(|&(dx, dy)| !collides(&rotated, x + dx, y + dy))
        .map(|kick| (rotated, kick))
}
