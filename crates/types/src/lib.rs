//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine, the runtime and the
//! terminal host alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows
//! - **Buffer rows**: 2 hidden rows above the visible area (spawn and overflow)
//! - **Total height**: 22 rows (grid rows 0-1 are the buffer, 2-21 are visible)
//! - **Spawn position**: column 4, grid row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Runtime timer period (~60 FPS) |
//! | `INITIAL_FALL_MS` | 800 | Fall interval at level 1 |
//! | `FALL_DECAY` | 0.8 | Interval multiplier per level-up |
//! | `MIN_FALL_MS` | 50 | Fall interval floor |
//! | `REVEAL_DURATION_MS` | 3000 | Lifetime of a skill reveal notification |
//! | `LINE_CLEAR_FLASH_MS` | 500 | Time full rows stay flagged before removal |
//!
//! # Examples
//!
//! ```
//! use skills_tetris_types::{GameCommand, PieceKind, BOARD_WIDTH, TOTAL_HEIGHT};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.category(), "aiml");
//!
//! let command = GameCommand::from_str("hardDrop").unwrap();
//! assert_eq!(command, GameCommand::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(TOTAL_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Visible board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows above the visible area
pub const BUFFER_ROWS: u8 = 2;

/// Full grid height including the buffer rows
pub const TOTAL_HEIGHT: u8 = BOARD_HEIGHT + BUFFER_ROWS;

/// Spawn column for new pieces (`BOARD_WIDTH / 2 - 1`)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Spawn row for new pieces (top of the buffer zone)
pub const SPAWN_Y: i8 = 0;

/// Number of upcoming pieces kept in the preview queue
pub const NEXT_QUEUE_LEN: usize = 3;

/// Runtime timer period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1
pub const INITIAL_FALL_MS: f64 = 800.0;

/// Multiplier applied to the fall interval on every level-up
pub const FALL_DECAY: f64 = 0.8;

/// Fall interval floor
pub const MIN_FALL_MS: f64 = 50.0;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per cleared line
pub const POINTS_PER_LINE: u32 = 100;

/// Lifetime of the transient "skill revealed" notification
pub const REVEAL_DURATION_MS: u32 = 3000;

/// How long full rows stay flagged before they are removed
pub const LINE_CLEAR_FLASH_MS: u32 = 500;


/// The seven tetromino piece kinds
///
/// Each kind carries a display color tag and the skill category it reveals
/// when it locks.
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

impl PieceKind {
    /// All kinds in template order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use skills_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Display color tag used by hosts to paint this piece
    pub fn color(&self) -> ColorTag {
        match self {
            PieceKind::I => ColorTag::Chart1,
            PieceKind::J => ColorTag::Chart2,
            PieceKind::L => ColorTag::Chart3,
            PieceKind::O => ColorTag::Chart4,
            PieceKind::S => ColorTag::Chart5,
            PieceKind::T => ColorTag::Primary,
            PieceKind::Z => ColorTag::Accent,
        }
    }

    /// Skill catalog category revealed when this piece locks
    ///
    /// The mapping is fixed; two kinds may share a category.
    pub fn category(&self) -> &'static str {
        match self {
            PieceKind::I | PieceKind::T => "aiml",
            PieceKind::J | PieceKind::Z => "data",
            PieceKind::L => "mlops",
            PieceKind::O => "backend",
            PieceKind::S => "cloud",
        }
    }
}

/// Theme color tags shared with the host's stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    #[serde(rename = "chart-1")]
    Chart1,
    #[serde(rename = "chart-2")]
    Chart2,
    #[serde(rename = "chart-3")]
    Chart3,
    #[serde(rename = "chart-4")]
    Chart4,
    #[serde(rename = "chart-5")]
    Chart5,
    Primary,
    Accent,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Chart1 => "chart-1",
            ColorTag::Chart2 => "chart-2",
            ColorTag::Chart3 => "chart-3",
            ColorTag::Chart4 => "chart-4",
            ColorTag::Chart5 => "chart-5",
            ColorTag::Primary => "primary",
            ColorTag::Accent => "accent",
        }
    }
}

/// Skill proficiency, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Novice => "novice",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Advanced => "advanced",
            Proficiency::Expert => "expert",
        }
    }

    /// Progress bar fill used by the portfolio's classic skills view
    pub fn progress_percent(&self) -> u8 {
        match self {
            Proficiency::Novice => 25,
            Proficiency::Intermediate => 50,
            Proficiency::Advanced => 75,
            Proficiency::Expert => 100,
        }
    }
}

/// Discrete player commands accepted by the engine
///
/// Every command is a zero-argument action. Hosts forward them from keyboard
/// input or UI buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameCommand {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if blocked
    SoftDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Stash the active piece (once per piece)
    Hold,
    /// Flip the paused flag
    TogglePause,
    /// Start a fresh session
    Reset,
}

impl GameCommand {
    pub const ALL: [GameCommand; 8] = [
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::SoftDrop,
        GameCommand::Rotate,
        GameCommand::HardDrop,
        GameCommand::Hold,
        GameCommand::TogglePause,
        GameCommand::Reset,
    ];

    /// Parse command from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use skills_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("hold"), Some(GameCommand::Hold));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" => Some(GameCommand::HardDrop),
            "hold" => Some(GameCommand::Hold),
            "togglepause" | "pause" => Some(GameCommand::TogglePause),
            "reset" => Some(GameCommand::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Hold => "hold",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Reset => "reset",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell; the kind gives its color and category
pub type Cell = Option<PieceKind>;
