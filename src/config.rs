//! Command line arguments and configuration loading.
//!
//! Precedence, lowest first: built-in defaults, the optional JSON file given by
//! `--config`, then individual command line overrides. The merged result is
//! validated before any game is created.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::core::{GameConfig, Randomizer};

/// Terminal falling-block puzzle game.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file with game rules; missing fields keep their defaults.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field width in cells.
    #[arg(long)]
    pub width: Option<usize>,

    /// Field height in cells.
    #[arg(long)]
    pub height: Option<usize>,

    /// Seed for the piece generator. Defaults to the system clock.
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Level that wins the game; 0 plays forever.
    #[arg(long)]
    pub win_level: Option<u32>,

    /// Piece randomizer: `uniform` or `bag`.
    #[arg(long, value_parser = parse_randomizer)]
    pub randomizer: Option<Randomizer>,

    /// Write log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_randomizer(s: &str) -> Result<Randomizer, String> {
    Randomizer::from_str(s).ok_or_else(|| format!("unknown randomizer `{}` (expected uniform or bag)", s))
}

impl Args {
    /// Defaults, then the config file, then overrides; validated.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_file(path)?,
            None => GameConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate().context("invalid game configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(win_level) = self.win_level {
            config.win_level = win_level;
        }
        if let Some(randomizer) = self.randomizer {
            config.randomizer = randomizer;
        }
    }

    /// The requested seed, or one derived from the wall clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// Read a [`GameConfig`] from a JSON file.
pub fn load_file(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}
