//! Game configuration
//!
//! All tunable rules live here instead of being scattered as literals. The
//! defaults are the reference rules: a 10x20 field, 10 points per row with a
//! x2 multiplier for multi-row clears, a new level every 10 rows, and a win at
//! level 10.

use std::fmt;

use serde::Deserialize;

use crate::types::{FallingMode, Seconds, FIELD_HEIGHT, FIELD_WIDTH};

/// How the next piece kind is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Every kind equally likely on every draw.
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds.
    Bag,
}

impl Randomizer {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }
}

/// Rules of a game session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Points per cleared row.
    pub line_score: u32,
    /// Per-row multiplier when two or more rows clear in one lock.
    pub multi_line_multiplier: u32,
    pub lines_per_level: u32,
    /// Level that ends the session with a win. `0` disables winning.
    ///
    /// Levels start at 1, so `1` wins on the very first lock whether or not
    /// it clears a row.
    pub win_level: u32,
    /// Normal fall interval before level adjustment.
    pub normal_interval: Seconds,
    /// How much faster normal gravity gets per level.
    pub level_step: Seconds,
    /// Floor for the normal interval.
    pub min_interval: Seconds,
    pub fast_interval: Seconds,
    pub drop_interval: Seconds,
    pub randomizer: Randomizer,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH as usize,
            height: FIELD_HEIGHT as usize,
            line_score: 10,
            multi_line_multiplier: 2,
            lines_per_level: 10,
            win_level: 10,
            normal_interval: 0.8,
            level_step: 0.07,
            min_interval: 0.05,
            fast_interval: 0.05,
            drop_interval: 0.005,
            randomizer: Randomizer::Uniform,
        }
    }
}

/// Largest accepted field dimension.
pub const MAX_DIMENSION: usize = 255;

/// Narrowest field where the I piece fits at the spawn position.
pub const MIN_WIDTH: usize = 6;

impl GameConfig {
    /// Seconds between gravity ticks for a falling mode at a level.
    pub fn speed(&self, mode: FallingMode, level: u32) -> Seconds {
        match mode {
            FallingMode::Normal => (self.normal_interval - f64::from(level) * self.level_step)
                .max(self.min_interval),
            FallingMode::Fast => self.fast_interval,
            FallingMode::Drop => self.drop_interval,
        }
    }

    /// Check the rules are playable, field dimensions included.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.width > MAX_DIMENSION {
            return Err(ConfigError::Width(self.width));
        }
        if self.height < 1 || self.height > MAX_DIMENSION {
            return Err(ConfigError::Height(self.height));
        }
        self.validate_rules()
    }

    /// Check everything except the field dimensions: level progression and
    /// gravity intervals. A game on a prepared field only needs this.
    pub fn validate_rules(&self) -> Result<(), ConfigError> {
        if self.lines_per_level == 0 {
            return Err(ConfigError::LinesPerLevel);
        }
        let intervals = [
            ("normal_interval", self.normal_interval),
            ("min_interval", self.min_interval),
            ("fast_interval", self.fast_interval),
            ("drop_interval", self.drop_interval),
        ];
        for (name, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Interval { name, value });
            }
        }
        if !self.level_step.is_finite() || self.level_step < 0.0 {
            return Err(ConfigError::Interval {
                name: "level_step",
                value: self.level_step,
            });
        }
        Ok(())
    }
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Width(usize),
    Height(usize),
    LinesPerLevel,
    Interval { name: &'static str, value: Seconds },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Width(w) => write!(
                f,
                "field width {} is outside {}..={}",
                w, MIN_WIDTH, MAX_DIMENSION
            ),
            ConfigError::Height(h) => {
                write!(f, "field height {} is outside 1..={}", h, MAX_DIMENSION)
            }
            ConfigError::LinesPerLevel => write!(f, "lines_per_level must be at least 1"),
            ConfigError::Interval { name, value } => {
                write!(f, "{} must be a positive number of seconds, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
