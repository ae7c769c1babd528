//! Construction-time errors.
//!
//! The simulation itself never fails: illegal moves are no-ops and fatal board
//! states end the game. Only building an engine from a bad catalog or bad
//! timing values is reported as an error.

use std::path::PathBuf;

use thiserror::Error;

/// Skill catalog could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Catalog JSON did not match the expected shape.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Catalog has no categories.
    #[error("catalog has no categories")]
    Empty,
    /// A category key is blank.
    #[error("catalog contains a blank category key")]
    BlankCategoryKey,
    /// A category lists no skills.
    #[error("category {0:?} has no skills")]
    EmptyCategory(String),
    /// A skill name is blank.
    #[error("category {0:?} contains a skill with a blank name")]
    BlankSkillName(String),
    /// The same skill name appears twice.
    #[error("skill {0:?} appears more than once")]
    DuplicateSkill(String),
}

/// Engine or runtime configuration is invalid.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("initial fall interval must be positive, got {0}")]
    InvalidInitialFall(f64),
    #[error("minimum fall interval must be positive and not exceed the initial interval, got {0}")]
    InvalidMinFall(f64),
    #[error("fall decay must be in (0, 1], got {0}")]
    InvalidFallDecay(f64),
    #[error("lines per level must be at least 1")]
    ZeroLinesPerLevel,
    #[error("tick period must be at least 1ms")]
    ZeroTick,
    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
}
