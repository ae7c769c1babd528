//! Board module - manages the game grid
//!
//! The board is a 10x22 grid: 20 visible rows plus 2 hidden buffer rows on top.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..21
//! (top to bottom). Rows 0 and 1 are the buffer; visible row `r` is grid row
//! `r + BUFFER_ROWS`.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS, TOTAL_HEIGHT};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (TOTAL_HEIGHT as usize);

/// Row indices returned by line scans (every row may be full in theory)
pub type RowSet = ArrayVec<usize, { TOTAL_HEIGHT as usize }>;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= TOTAL_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Full grid height, buffer rows included
    pub fn height(&self) -> u8 {
        TOTAL_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `shape` placed with its top-left corner at (x, y) collides.
    ///
    /// A placement collides when any occupied cell of the shape lands outside
    /// the columns, at or below the bottom of the grid, or on a filled cell.
    /// Cells above the grid (y < 0) are only checked against the side walls.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 {
                return true;
            }
            if py >= TOTAL_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= TOTAL_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of every full row, top to bottom, buffer rows included
    pub fn full_rows(&self) -> RowSet {
        (0..TOTAL_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove all full rows at once and return their indices (top to bottom).
    ///
    /// Remaining rows shift down by the number removed and empty rows are
    /// inserted at the top, so the grid keeps its fixed height.
    /// Uses a two-pointer pass with zero allocation.
    pub fn clear_full_rows(&mut self) -> RowSet {
        let mut cleared_rows = RowSet::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = TOTAL_HEIGHT as usize;

        for read_y in (0..TOTAL_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Bake `shape` into the board at (x, y) with the given kind.
    ///
    /// Returns false, leaving the board untouched, if any cell would land out
    /// of bounds (including above the grid) or on an occupied cell.
    pub fn lock_piece(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> bool {
        let fits = shape
            .minos()
            .all(|(dx, dy)| matches!(self.get(x + dx, y + dy), Some(None)));
        if !fits {
            return false;
        }

        for (dx, dy) in shape.minos() {
            self.set(x + dx, y + dy, Some(kind));
        }

        true
    }

    /// True if any hidden buffer row holds a locked cell (stack overflow)
    pub fn buffer_occupied(&self) -> bool {
        let end = (BUFFER_ROWS as usize) * (BOARD_WIDTH as usize);
        self.cells[..end].iter().any(|cell| cell.is_some())
    }

    /// Visible rows only (buffer excluded), top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        let width = BOARD_WIDTH as usize;
        self.cells[(BUFFER_ROWS as usize) * width..].chunks_exact(width)
    }

    /// Write the visible rows into a fixed grid for snapshots
    pub fn write_visible_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.visible_rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Number of locked cells on the whole grid
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
