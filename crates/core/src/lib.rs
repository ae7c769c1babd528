//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state management and simulation of the
//! skills discovery game. It has no dependency on rendering, terminals or
//! async runtimes:
//!
//! - **Deterministic**: the same seed and the same commands replay the same game
//! - **Testable**: every rule is exercised by unit tests next to the code
//! - **Portable**: hosts drive it through commands and timer ticks
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 visible grid plus two hidden buffer rows, collision and line clearing
//! - [`pieces`]: tetromino matrices, the pure `rotate` and wall kicks
//! - [`rng`]: seedable random source and the three-piece preview queue
//! - [`catalog`]: the skill catalog the game reveals
//! - [`discovery`]: discovered skills and the transient reveal notification
//! - [`scoring`]: line points, levels and fall speed
//! - [`config`]: engine tuning and environment overrides
//! - [`game_state`]: the session engine
//! - [`snapshot`]: read-only view for hosts
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each new piece is drawn independently from the seven templates
//! - **Rotation**: clockwise matrix rotation with six fixed wall-kick offsets
//! - **Hold**: one hold per piece, re-permitted when a piece locks
//! - **Skill reveal**: every lock reveals one hidden skill from the piece's category
//! - **Scoring**: 100 points per line, a level every 10 lines, fall interval x0.8 per level
//!
//! # Example
//!
//! ```
//! use skills_tetris_core::{EngineConfig, GameState, SkillCatalog};
//! use skills_tetris_types::GameCommand;
//!
//! let catalog = SkillCatalog::builtin().unwrap();
//! let mut game = GameState::new(catalog, EngineConfig::with_seed(12345)).unwrap();
//! game.start();
//!
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::Rotate);
//! game.apply_command(GameCommand::HardDrop);
//!
//! // Every lock reveals a skill.
//! assert_eq!(game.discovery().len(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds; the fall interval starts at 800ms and is never below 50ms.

pub mod board;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use skills_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{Skill, SkillCatalog, SkillCategory};
pub use config::EngineConfig;
pub use discovery::{Discovery, RevealNotice, SkillReveal};
pub use error::{CatalogError, ConfigError};
pub use game_state::{GameEvent, GameState, Phase};
pub use pieces::{rotate, try_rotate, PieceTemplate, Shape, Tetromino};
pub use rng::{seeded_rng, GameRng, PieceQueue};
pub use snapshot::{ActiveSnapshot, CategoryProgress, GameSnapshot};
