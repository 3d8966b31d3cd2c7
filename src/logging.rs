//! Logger setup for the binary.
//!
//! Logging is off unless `RUST_LOG` asks for it. The game owns the alternate
//! screen, so anything written to stderr while playing lands on top of the
//! frame; pass a log file to keep the two apart.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Install the global logger. Call once, before the terminal is taken over.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("off"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
        // A file target is only useful if something gets written to it.
        if std::env::var_os("RUST_LOG").is_none() {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    builder.try_init().context("logger already initialized")?;
    Ok(())
}
