//! Scoring module - line points, levels and fall speed
//!
//! Rules:
//! - Every cleared line is worth a flat amount (100 by default); there are no
//!   multi-line, combo or level multipliers.
//! - The level starts at 1 and goes up by one for every full block of
//!   `lines_per_level` cumulative lines.
//! - Each level-up multiplies the fall interval by the decay factor, never
//!   going below the floor.

use crate::config::EngineConfig;

/// Points for clearing `lines` rows at once
pub fn line_clear_points(lines: u32, config: &EngineConfig) -> u32 {
    lines.saturating_mul(config.points_per_line)
}

/// Level reached after `total_lines` cumulative cleared lines
pub fn level_for_lines(total_lines: u32, config: &EngineConfig) -> u32 {
    1 + total_lines / config.lines_per_level
}

/// Fall interval after one level-up
pub fn next_fall_interval(current_ms: f64, config: &EngineConfig) -> f64 {
    (current_ms * config.fall_decay).max(config.min_fall_ms)
}

/// Fall interval at a given level, starting from the initial interval
pub fn fall_interval_for_level(level: u32, config: &EngineConfig) -> f64 {
    (1..level).fold(config.initial_fall_ms, |ms, _| next_fall_interval(ms, config))
}
