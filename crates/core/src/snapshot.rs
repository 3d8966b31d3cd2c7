//! Snapshot module - read-only copies of game state for renderers
//!
//! [`Game::snapshot_into`](crate::game::Game::snapshot_into) refills an existing
//! snapshot in place, so a render loop can keep one around without reallocating.

use crate::field::Field;
use crate::piece::Piece;
use crate::pieces::MaskCells;
use crate::types::{FallingMode, GamePhase, GridOffset, PieceKind};

/// Read-only copy of the falling piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSnapshot {
    pub kind: PieceKind,
    pub position: GridOffset,
    /// Absolute field coordinates of the occupied cells.
    pub cells: MaskCells,
}

impl From<Piece> for CurrentSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            position: value.position(),
            cells: value.occupied_cells(),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub field: Field,
    pub current: Option<CurrentSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub phase: GamePhase,
    pub falling_mode: FallingMode,
}

impl GameSnapshot {
    /// True if `cell` is covered by the falling piece.
    pub fn current_covers(&self, cell: GridOffset) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.cells.contains(&cell))
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: Field::default(),
            current: None,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            phase: GamePhase::Starting,
            falling_mode: FallingMode::Normal,
        }
    }
}
