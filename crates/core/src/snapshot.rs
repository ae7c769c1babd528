//! Read-only view of a session for hosts and renderers
//!
//! Snapshots only expose the 20 visible rows. Row indices in this module are
//! visible-row indices (0 = top visible row), not grid rows.

use serde::Serialize;

use crate::discovery::SkillReveal;
use crate::game_state::Phase;
use crate::pieces::{Shape, Tetromino};
use crate::types::{
    Cell, ColorTag, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS, NEXT_QUEUE_LEN,
};

pub type VisibleGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: ColorTag,
    pub shape: Shape,
    /// Grid column of the shape's left edge
    pub x: i8,
    /// Grid row of the shape's top edge (buffer rows included, may be negative)
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Occupied cells as (column, visible row), skipping cells above the visible area
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape.minos().filter_map(move |(dx, dy)| {
            let x = self.x + dx;
            let y = self.y + dy - BUFFER_ROWS as i8;
            (x >= 0 && y >= 0).then_some((x as usize, y as usize))
        })
    }
}

/// Revealed and total skill counts of one category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryProgress {
    pub key: String,
    pub name: String,
    pub revealed: u32,
    pub total: u32,
}

impl CategoryProgress {
    /// Share of the category revealed, 0..=100
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.revealed.min(self.total) * 100 / self.total) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: VisibleGrid,
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_interval_ms: f64,
    pub paused: bool,
    pub game_over: bool,
    pub phase: Phase,
    /// Discovered skills in catalog order
    pub discovered: Vec<SkillReveal>,
    pub progress: Vec<CategoryProgress>,
    pub total_skills: usize,
    /// Latest reveal notification still showing
    pub reveal: Option<SkillReveal>,
    /// Visible rows flashing before removal
    pub clearing_rows: Vec<usize>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.next_queue = [PieceKind::I; NEXT_QUEUE_LEN];
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.fall_interval_ms = 0.0;
        self.paused = false;
        self.game_over = false;
        self.phase = Phase::Spawning;
        self.discovered.clear();
        self.progress.clear();
        self.total_skills = 0;
        self.reveal = None;
        self.clearing_rows.clear();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn is_row_clearing(&self, row: usize) -> bool {
        self.clearing_rows.contains(&row)
    }

    /// Board cell with the active piece composited on top
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        let locked = self.board.get(y).and_then(|row| row.get(x)).copied().flatten();
        if locked.is_some() {
            return locked;
        }
        self.active.and_then(|active| {
            active
                .visible_cells()
                .any(|cell| cell == (x, y))
                .then_some(active.kind)
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            hold: None,
            can_hold: true,
            next_queue: [PieceKind::I; NEXT_QUEUE_LEN],
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: 0.0,
            paused: false,
            game_over: false,
            phase: Phase::Spawning,
            discovered: Vec::new(),
            progress: Vec::new(),
            total_skills: 0,
            reveal: None,
            clearing_rows: Vec::new(),
        }
    }
}
