//! Field module - the grid of locked cells
//!
//! Each cell is empty or holds the [`PieceKind`] that locked there.
//! Storage is a flat row-major vector (`y * width + x`); row 0 is the top.
//! Width and height are fixed for the lifetime of the field.

use crate::piece::Piece;
use crate::types::{Cell, GridOffset, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "field dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a field from rows of text: `.` is empty, a piece letter is a locked cell.
    ///
    /// Panics on ragged rows or unknown characters.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut field = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "row {} has the wrong width", y);
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell {:?}", other)),
                    ),
                };
                field.cells[y * width + x] = cell;
            }
        }
        field
    }

    #[inline(always)]
    fn index(&self, cell: GridOffset) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(cell.y as usize * self.width + cell.x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, cell: GridOffset) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Cell contents, or `None` when out of range.
    pub fn get(&self, cell: GridOffset) -> Option<Cell> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Returns false (and writes nothing) when out of range.
    pub fn set(&mut self, cell: GridOffset, value: Cell) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// True if any occupied cell of `piece` is out of bounds or already filled.
    ///
    /// This single test covers walls, floor and locked blocks alike.
    pub fn touching(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .iter()
            .any(|&cell| !matches!(self.get(cell), Some(None)))
    }

    /// Lock `piece` into the field, writing its kind into every occupied cell.
    ///
    /// Nothing is written and `false` is returned if the piece is touching.
    #[must_use]
    pub fn put(&mut self, piece: &Piece) -> bool {
        if self.touching(piece) {
            return false;
        }
        let kind = piece.kind();
        for cell in piece.occupied_cells() {
            self.set(cell, Some(kind));
        }
        true
    }

    /// True if row `y` exists and has no empty cell.
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|c| c.is_some()))
    }

    /// First filled row, scanning top to bottom.
    pub fn find_filled_row(&self) -> Option<usize> {
        (0..self.height).find(|&y| self.is_row_filled(y))
    }

    /// Remove row `y`, shifting every row above it down by one and blanking row 0.
    ///
    /// Panics if `y` is out of range.
    pub fn delete_row(&mut self, y: usize) {
        assert!(y < self.height, "row {} out of range (height {})", y, self.height);
        let width = self.width;
        // Rows [0, y) move to [1, y + 1); copy_within handles the overlap.
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Delete filled rows until none remain; returns how many were removed.
    pub fn delete_filled_rows(&mut self) -> usize {
        let mut count = 0;
        while let Some(y) = self.find_filled_row() {
            self.delete_row(y);
            count += 1;
        }
        count
    }

    /// Canonical spawn anchor: horizontally centered-left, top row.
    pub fn spawn_position(&self) -> GridOffset {
        GridOffset::new((self.width as i32 - 1) / 2, 0)
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH as usize, FIELD_HEIGHT as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        let field = Field::default();
        assert_eq!(field.index(GridOffset::new(0, 0)), Some(0));
        assert_eq!(field.index(GridOffset::new(9, 0)), Some(9));
        assert_eq!(field.index(GridOffset::new(0, 1)), Some(10));
        assert_eq!(field.index(GridOffset::new(9, 19)), Some(199));
        assert_eq!(field.index(GridOffset::new(-1, 0)), None);
        assert_eq!(field.index(GridOffset::new(10, 0)), None);
        assert_eq!(field.index(GridOffset::new(0, 20)), None);
    }

    #[test]
    fn from_rows_reads_letters() {
        let field = Field::from_rows(&["I..", ".t.", "..Z"]);
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 3);
        assert_eq!(field.get(GridOffset::new(0, 0)), Some(Some(PieceKind::I)));
        assert_eq!(field.get(GridOffset::new(1, 1)), Some(Some(PieceKind::T)));
        assert_eq!(field.get(GridOffset::new(2, 2)), Some(Some(PieceKind::Z)));
        assert_eq!(field.get(GridOffset::new(1, 0)), Some(None));
    }

    #[test]
    fn delete_row_shifts_rows_above() {
        let mut field = Field::from_rows(&["I..", ".J.", "LLL", "..O"]);
        field.delete_row(2);
        assert_eq!(field, Field::from_rows(&["...", "I..", ".J.", "..O"]));
    }

    #[test]
    fn delete_top_row_only_blanks_it() {
        let mut field = Field::from_rows(&["SSS", "T.."]);
        field.delete_row(0);
        assert_eq!(field, Field::from_rows(&["...", "T.."]));
    }

    #[test]
    fn spawn_position_on_reference_field() {
        assert_eq!(Field::default().spawn_position(), GridOffset::new(4, 0));
    }

    #[test]
    #[should_panic]
    fn zero_width_is_rejected() {
        let _ = Field::new(0, 20);
    }
}
