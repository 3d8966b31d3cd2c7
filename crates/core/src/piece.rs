//! Piece module - a live falling tetromino
//!
//! Transforms never mutate: [`Piece::rotated`] and [`Piece::moved`] return a
//! candidate value that the caller tests against the field before committing.

use crate::pieces::{self, Mask, MaskCells};
use crate::types::{GridOffset, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cells: Mask,
    position: GridOffset,
}

impl Piece {
    /// Create a piece in its canonical orientation with its mask's top-left at `position`.
    pub fn new(kind: PieceKind, position: GridOffset) -> Self {
        Self {
            kind,
            cells: pieces::mask(kind),
            position,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Current (possibly rotated) mask.
    pub fn mask(&self) -> &Mask {
        &self.cells
    }

    /// Top-left anchor of the mask in field coordinates.
    pub fn position(&self) -> GridOffset {
        self.position
    }

    /// Copy rotated 90° clockwise in place; position unchanged.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            cells: self.cells.rotated(),
            ..*self
        }
    }

    /// Copy translated by `offset`; mask unchanged.
    #[must_use]
    pub fn moved(&self, offset: GridOffset) -> Self {
        Self {
            position: self.position + offset,
            ..*self
        }
    }

    /// Absolute field coordinates of every occupied cell.
    pub fn occupied_cells(&self) -> MaskCells {
        let mut cells = self.cells.cells();
        for cell in cells.iter_mut() {
            *cell += self.position;
        }
        cells
    }
}
