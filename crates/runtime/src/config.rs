//! Runtime configuration
//!
//! - `SKILLS_TETRIS_TICK_MS`: timer tick period (default: 16)
//! - `SKILLS_TETRIS_MAX_PENDING`: command channel capacity (default: 32)

use skills_tetris_core::config::env_or;
use skills_tetris_core::ConfigError;
use skills_tetris_types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub tick_ms: u32,
    pub max_pending_commands: usize,
    /// Events buffered per subscriber before the oldest are dropped
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            max_pending_commands: 32,
            event_capacity: 256,
        }
    }
}

impl RuntimeConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let tick_ms = env_or("SKILLS_TETRIS_TICK_MS", defaults.tick_ms)?;
        if tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        let max_pending_commands: usize =
            env_or("SKILLS_TETRIS_MAX_PENDING", defaults.max_pending_commands)?;

        Ok(Self {
            tick_ms,
            max_pending_commands: max_pending_commands.max(1),
            ..defaults
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.max_pending_commands, 32);
    }

    #[test]
    fn test_from_env_without_overrides() {
        // Only meaningful when the variables are unset in the test environment.
        if std::env::var_os("SKILLS_TETRIS_TICK_MS").is_none()
            && std::env::var_os("SKILLS_TETRIS_MAX_PENDING").is_none()
        {
            assert_eq!(RuntimeConfig::from_env().unwrap(), RuntimeConfig::default());
        }
    }
}
