//! Terminal rendering for the skills game.
//!
//! Renders snapshots into a small framebuffer that is flushed to a terminal
//! backend, without a widget toolkit:
//!
//! - [`fb`]: glyph grid and styles
//! - [`game_view`]: pure snapshot to framebuffer mapping
//! - [`renderer`]: crossterm output with full and diff redraws

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use skills_tetris_core as core;
pub use skills_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
