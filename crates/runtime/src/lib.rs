//! Message-passing runtime for the skills game engine.
//!
//! The engine is single-threaded and synchronous; this crate gives it one
//! owning task that serializes player commands and timer ticks.

pub mod config;
pub mod game_loop;
pub mod runtime;

pub use config::RuntimeConfig;
pub use game_loop::{spawn_game_loop, GameHandle};
pub use runtime::GameRuntime;
