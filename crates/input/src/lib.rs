//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]. Kept apart
//! from the renderer so hosts can swap either side.

pub mod map;

pub use skills_tetris_types as types;

pub use map::{handle_key_event, should_quit};
