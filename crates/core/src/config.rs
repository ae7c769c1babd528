//! Engine configuration
//!
//! Defaults reproduce the portfolio game's tuning. Values can be overridden
//! from environment variables:
//!
//! - `SKILLS_TETRIS_SEED`: RNG seed (default: 1)
//! - `SKILLS_TETRIS_LINE_CLEAR_MS`: clear flash duration, 0 clears instantly (default: 500)
//! - `SKILLS_TETRIS_REVEAL_MS`: reveal notification lifetime (default: 3000)

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{
    FALL_DECAY, INITIAL_FALL_MS, LINES_PER_LEVEL, LINE_CLEAR_FLASH_MS, MIN_FALL_MS,
    POINTS_PER_LINE, REVEAL_DURATION_MS,
};

/// Tuning values for one engine instance
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub seed: u64,
    pub initial_fall_ms: f64,
    pub fall_decay: f64,
    pub min_fall_ms: f64,
    pub lines_per_level: u32,
    pub points_per_line: u32,
    pub reveal_duration_ms: u32,
    pub line_clear_delay_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            initial_fall_ms: INITIAL_FALL_MS,
            fall_decay: FALL_DECAY,
            min_fall_ms: MIN_FALL_MS,
            lines_per_level: LINES_PER_LEVEL,
            points_per_line: POINTS_PER_LINE,
            reveal_duration_ms: REVEAL_DURATION_MS,
            line_clear_delay_ms: LINE_CLEAR_FLASH_MS,
        }
    }
}

impl EngineConfig {
    /// Default tuning with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            seed: env_or("SKILLS_TETRIS_SEED", defaults.seed)?,
            line_clear_delay_ms: env_or("SKILLS_TETRIS_LINE_CLEAR_MS", defaults.line_clear_delay_ms)?,
            reveal_duration_ms: env_or("SKILLS_TETRIS_REVEAL_MS", defaults.reveal_duration_ms)?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or break the fall timer
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_fall_ms.is_finite() && self.initial_fall_ms > 0.0) {
            return Err(ConfigError::InvalidInitialFall(self.initial_fall_ms));
        }
        if !(self.min_fall_ms.is_finite()
            && self.min_fall_ms > 0.0
            && self.min_fall_ms <= self.initial_fall_ms)
        {
            return Err(ConfigError::InvalidMinFall(self.min_fall_ms));
        }
        if !(self.fall_decay > 0.0 && self.fall_decay <= 1.0) {
            return Err(ConfigError::InvalidFallDecay(self.fall_decay));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }
}

/// Parse an environment variable, using `default` when it is unset or blank
pub fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(default),
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var, value }),
        Err(_) => Ok(default),
    }
}
