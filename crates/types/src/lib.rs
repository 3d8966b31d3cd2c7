//! Shared vocabulary for the game - plain data with no dependencies
//!
//! Everything here is consumed by more than one crate: the simulation core uses
//! it to describe state, the input layer produces [`Action`]s, and the renderer
//! reads [`PieceKind`] colors and the current [`GamePhase`].
//!
//! # Coordinates
//!
//! Grid coordinates are `(x, y)` with `x` growing to the right and `y` growing
//! downwards. Row 0 is the top of the field.
//!
//! # Reference dimensions
//!
//! | Constant | Value |
//! |----------|-------|
//! | `FIELD_WIDTH` | 10 |
//! | `FIELD_HEIGHT` | 20 |
//!
//! # Examples
//!
//! ```
//! use tetrimino_types::{GridOffset, PieceKind, GamePhase};
//!
//! let pos = GridOffset::new(4, 0) + GridOffset::DOWN;
//! assert_eq!(pos, GridOffset::new(4, 1));
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert!(GamePhase::GameOver.is_finished());
//! ```

use std::ops::{Add, AddAssign, Neg, Sub};

/// Reference field width in cells.
pub const FIELD_WIDTH: u8 = 10;

/// Reference field height in cells.
pub const FIELD_HEIGHT: u8 = 20;

/// Elapsed time in seconds, supplied by the caller from a monotonic clock.
pub type Seconds = f64;

/// Integer (column, row) pair.
///
/// Used both for absolute field coordinates and for relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridOffset {
    pub x: i32,
    pub y: i32,
}

impl GridOffset {
    pub const ORIGIN: GridOffset = GridOffset::new(0, 0);
    /// One row down (gravity).
    pub const DOWN: GridOffset = GridOffset::new(0, 1);
    pub const LEFT: GridOffset = GridOffset::new(-1, 0);
    pub const RIGHT: GridOffset = GridOffset::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridOffset {
    type Output = GridOffset;

    fn add(self, rhs: GridOffset) -> GridOffset {
        GridOffset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridOffset {
    type Output = GridOffset;

    fn sub(self, rhs: GridOffset) -> GridOffset {
        GridOffset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for GridOffset {
    fn add_assign(&mut self, rhs: GridOffset) {
        *self = *self + rhs;
    }
}

impl Neg for GridOffset {
    type Output = GridOffset;

    fn neg(self) -> GridOffset {
        GridOffset::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for GridOffset {
    fn from((x, y): (i32, i32)) -> Self {
        GridOffset::new(x, y)
    }
}

/// The seven tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrimino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }
}

/// Opaque display color carried by the piece catalog.
///
/// The core never interprets it; renderers map it to whatever their backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// A cell of the field: empty, or holding the kind that was locked there.
pub type Cell = Option<PieceKind>;

/// Top-level phase of a game session
///
/// ```text
/// Starting -> Playing <-> Paused
///                |
///                +-> GameOver | Winning
///
/// any phase --Exit--> Exiting (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Waiting for the player to start.
    Starting,
    Playing,
    Paused,
    /// A freshly spawned piece collided immediately.
    GameOver,
    /// The win level was reached.
    Winning,
    /// The session is over and the outer loop should stop.
    Exiting,
}

impl GamePhase {
    /// True for the phases that end a session without exiting the program.
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Winning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Starting => "starting",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
            GamePhase::Winning => "winning",
            GamePhase::Exiting => "exiting",
        }
    }
}

/// Key edge: a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Press,
    Release,
}

/// Abstract commands accepted by the game
///
/// These are input-device independent. The input layer decodes raw key events
/// into at most one action each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Start a session (or a new one after game over / win).
    Play,
    Pause,
    Resume,
    /// Rotate the falling piece 90° clockwise.
    Rotate,
    ShiftLeft,
    ShiftRight,
    /// Fast fall while held: `Press` begins it, `Release` ends it.
    FallFast(Edge),
    /// Let the piece fall at drop speed until it locks.
    Drop,
    Exit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Play => "play",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Rotate => "rotate",
            Action::ShiftLeft => "shiftLeft",
            Action::ShiftRight => "shiftRight",
            Action::FallFast(Edge::Press) => "fallFastBegin",
            Action::FallFast(Edge::Release) => "fallFastEnd",
            Action::Drop => "drop",
            Action::Exit => "exit",
        }
    }
}

/// Horizontal shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn offset(&self) -> GridOffset {
        match self {
            Direction::Left => GridOffset::LEFT,
            Direction::Right => GridOffset::RIGHT,
        }
    }
}

/// Gravity regime of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FallingMode {
    /// Level-dependent gravity.
    #[default]
    Normal,
    /// Held fast fall.
    Fast,
    /// Drop until locked.
    Drop,
}
