//! Pieces module - the seven canonical shapes and their display colors
//!
//! Every kind has a square boolean mask in its unrotated orientation. Masks are
//! padded to a square (2x2, 3x3 or 4x4) so a 90° rotation in place keeps the
//! piece visually centered on its own grid.

use arrayvec::ArrayVec;

use crate::types::{Color, GridOffset, PieceKind};

/// Largest mask side (the I piece).
pub const MAX_MASK_SIDE: usize = 4;

/// Occupied offsets of a mask, at most one per mask cell.
pub type MaskCells = ArrayVec<GridOffset, { MAX_MASK_SIDE * MAX_MASK_SIDE }>;

/// Square occupancy grid of a piece, indexed `[y][x]`.
///
/// Only the top-left `side x side` region is meaningful; the rest stays `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    side: u8,
    bits: [[bool; MAX_MASK_SIDE]; MAX_MASK_SIDE],
}

impl Mask {
    /// Build a mask from row strings where `#` marks an occupied cell.
    ///
    /// Panics unless the rows form a square of side 1..=4.
    pub fn from_rows(rows: &[&str]) -> Self {
        let side = rows.len();
        assert!(
            (1..=MAX_MASK_SIDE).contains(&side),
            "mask side must be 1..={}, got {}",
            MAX_MASK_SIDE,
            side
        );
        let mut bits = [[false; MAX_MASK_SIDE]; MAX_MASK_SIDE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), side, "mask must be square");
            for (x, ch) in row.chars().enumerate() {
                bits[y][x] = ch == '#';
            }
        }
        Self {
            side: side as u8,
            bits,
        }
    }

    pub fn side(&self) -> usize {
        self.side as usize
    }

    /// Occupancy at `(x, y)`; `false` outside the square.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.side() && y < self.side() && self.bits[y][x]
    }

    /// Clockwise quarter turn around the mask's own center.
    ///
    /// `new[y][x] = old[N - 1 - x][y]`; the side length never changes.
    pub fn rotated(&self) -> Self {
        let n = self.side();
        let mut bits = [[false; MAX_MASK_SIDE]; MAX_MASK_SIDE];
        for (y, row) in bits.iter_mut().enumerate().take(n) {
            for (x, bit) in row.iter_mut().enumerate().take(n) {
                *bit = self.bits[n - 1 - x][y];
            }
        }
        Self {
            side: self.side,
            bits,
        }
    }

    /// Relative offsets of occupied cells in row-major order.
    pub fn cells(&self) -> MaskCells {
        let mut out = MaskCells::new();
        for y in 0..self.side() {
            for x in 0..self.side() {
                if self.bits[y][x] {
                    out.push(GridOffset::new(x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.bits.iter().flatten().filter(|b| **b).count()
    }
}

/// Canonical (unrotated) mask for a piece kind.
pub fn mask(kind: PieceKind) -> Mask {
    match kind {
        PieceKind::I => Mask::from_rows(&["....", "####", "....", "...."]),
        PieceKind::J => Mask::from_rows(&["###", "..#", "..."]),
        PieceKind::L => Mask::from_rows(&["###", "#..", "..."]),
        PieceKind::O => Mask::from_rows(&["##", "##"]),
        PieceKind::S => Mask::from_rows(&[".##", "##.", "..."]),
        PieceKind::T => Mask::from_rows(&["###", ".#.", "..."]),
        PieceKind::Z => Mask::from_rows(&["##.", ".##", "..."]),
    }
}

/// Display color for a piece kind.
pub fn color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::from_hex(0x800000), // maroon
        PieceKind::J => Color::from_hex(0xD3D3D3), // lightgrey
        PieceKind::L => Color::from_hex(0x800080), // purple
        PieceKind::O => Color::from_hex(0x6A5ACD), // slateblue
        PieceKind::S => Color::from_hex(0x006400), // darkgreen
        PieceKind::T => Color::from_hex(0xA52A2A), // brown
        PieceKind::Z => Color::from_hex(0x008080), // teal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_is_a_tetromino() {
        for kind in PieceKind::ALL {
            let m = mask(kind);
            assert_eq!(m.count(), 4, "{:?} should have 4 cells", kind);
            assert_eq!(m.cells().len(), 4);
        }
    }

    #[test]
    fn mask_sides() {
        assert_eq!(mask(PieceKind::I).side(), 4);
        assert_eq!(mask(PieceKind::O).side(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(mask(kind).side(), 3);
        }
    }

    #[test]
    fn t_rotates_clockwise() {
        // ###      ..#
        // .#.  ->  .##
        // ...      ..#
        let rotated = mask(PieceKind::T).rotated();
        assert_eq!(rotated, Mask::from_rows(&["..#", ".##", "..#"]));
    }

    #[test]
    fn i_rotates_to_a_column() {
        let rotated = mask(PieceKind::I).rotated();
        assert_eq!(rotated, Mask::from_rows(&["..#.", "..#.", "..#.", "..#."]));
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = mask(PieceKind::O);
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn cells_are_row_major() {
        let cells = mask(PieceKind::S).cells();
        let expected = [(1, 0), (2, 0), (0, 1), (1, 1)].map(GridOffset::from);
        assert_eq!(cells.as_slice(), &expected);
    }

    #[test]
    fn get_outside_side_is_empty() {
        let o = mask(PieceKind::O);
        assert!(o.get(1, 1));
        assert!(!o.get(2, 0));
        assert!(!o.get(0, 3));
    }

    #[test]
    fn colors_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(color(a), color(b));
                }
            }
        }
    }
}
