//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the whole simulation: field, falling piece, collision and
//! locking, line clears, scoring, leveling, and the session state machine.
//! It does no I/O and never reads a clock:
//!
//! - **Deterministic**: the piece generator is seeded per session
//! - **Testable**: time is a plain `f64` of elapsed seconds supplied by the caller
//! - **Portable**: renderers only consume [`GameSnapshot`]s
//!
//! # Module Structure
//!
//! - [`pieces`]: the shape catalog (square masks and colors for the 7 kinds)
//! - [`piece`]: a falling piece and its pure rotate/move transforms
//! - [`field`]: the grid of locked cells, collision test and row deletion
//! - [`scoring`]: points per clear and level derivation
//! - [`config`]: tunable rules with reference defaults
//! - [`rng`]: seeded piece generation (uniform or 7-bag)
//! - [`game`]: the session state machine driven by actions and time
//! - [`snapshot`]: read-only copies for rendering
//!
//! # Example
//!
//! ```
//! use tetrimino_core::{Game, GameConfig};
//! use tetrimino_types::{Action, GamePhase};
//!
//! let mut game = Game::new(GameConfig::default(), 12345);
//! game.apply(Action::Play, 0.0);
//! game.update(0.0); // first tick spawns a piece
//! assert!(game.current().is_some());
//!
//! game.apply(Action::ShiftLeft, 0.1);
//! game.apply(Action::Rotate, 0.2);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```
//!
//! # Timing
//!
//! Gravity is a schedule, not a timer. [`Game::update`] ticks once when the
//! supplied time reaches the scheduled tick and then reschedules one interval
//! later. The interval depends on the falling mode and the level.

pub mod config;
pub mod field;
pub mod game;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrimino_types as types;

pub use config::{ConfigError, GameConfig, Randomizer};
pub use field::Field;
pub use game::Game;
pub use piece::Piece;
pub use pieces::{color, mask, Mask, MaskCells};
pub use rng::{PieceGenerator, SimpleRng};
pub use snapshot::{CurrentSnapshot, GameSnapshot};
