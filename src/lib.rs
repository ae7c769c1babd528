//! Skills Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so hosts and integration tests
//! can use `skills_tetris::{core, runtime, input, term, types}`.

pub use skills_tetris_core as core;
pub use skills_tetris_input as input;
pub use skills_tetris_runtime as runtime;
pub use skills_tetris_term as term;
pub use skills_tetris_types as types;
