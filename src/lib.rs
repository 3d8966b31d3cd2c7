//! Terminal falling-block puzzle game (workspace facade crate).
//!
//! The simulation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetrimino::{core, input, term, types}` and adds what the
//! binary needs around them: command line and file configuration, logging
//! setup, and key-release emulation for terminals that cannot report releases.

pub mod config;
pub mod fall_fast;
pub mod logging;

pub use tetrimino_core as core;
pub use tetrimino_input as input;
pub use tetrimino_term as term;
pub use tetrimino_types as types;
