//! Scoring module - points and levels from cleared rows
//!
//! A lock that clears `count` rows awards `count * line_score`, multiplied by
//! `multi_line_multiplier` when two or more rows clear together. The level is
//! derived from the running line total and never goes down.

use crate::config::GameConfig;

/// Points for clearing `count` rows in a single lock.
///
/// ```
/// use tetrimino_core::{scoring::line_clear_score, GameConfig};
///
/// let rules = GameConfig::default();
/// assert_eq!(line_clear_score(0, &rules), 0);
/// assert_eq!(line_clear_score(1, &rules), 10);
/// assert_eq!(line_clear_score(2, &rules), 40);
/// assert_eq!(line_clear_score(4, &rules), 80);
/// ```
pub fn line_clear_score(count: u32, config: &GameConfig) -> u32 {
    let multiplier = if count > 1 {
        config.multi_line_multiplier
    } else {
        1
    };
    count
        .saturating_mul(config.line_score)
        .saturating_mul(multiplier)
}

/// Level for a cumulative number of cleared rows (starts at 1).
pub fn level_for_lines(lines: u32, config: &GameConfig) -> u32 {
    lines / config.lines_per_level + 1
}

/// True once `level` reaches the configured win level.
pub fn is_winning_level(level: u32, config: &GameConfig) -> bool {
    config.win_level > 0 && level >= config.win_level
}
