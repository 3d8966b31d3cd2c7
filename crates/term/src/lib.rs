//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] draws a core
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] flushes framebuffers to the terminal. No widget or
//! layout library is involved, which keeps precise control over the cell
//! aspect ratio (2 columns per field cell by default).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetrimino_core as core;
pub use tetrimino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
