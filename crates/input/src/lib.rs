//! Terminal input module.
//!
//! Decodes `crossterm` key events into [`crate::types::Action`]s. The result
//! depends on the game phase, so the same key can start, pause or resume.
//! Nothing here touches the game itself.

pub mod map;

pub use tetrimino_types as types;

pub use map::{decode, decode_event, edge_of, should_quit, Binding, BINDINGS};
