//! Square board storage for packing puzzles.
//!
//! The board is a flat row-major vector where each cell holds the piece type
//! covering it, or 0 for empty.

use std::fmt;

use crate::pieces::PieceType;

/// A `size × size` grid of piece types, 0 meaning empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<PieceType>,
}

impl Board {
    /// Creates an all-empty board.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates an all-empty board, or `None` when `size × size` cells
    /// cannot be counted or allocated.
    pub fn try_empty(size: usize) -> Option<Self> {
        let cell_count = size.checked_mul(size)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(cell_count).ok()?;
        cells.resize(cell_count, 0);
        Some(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Converts signed coordinates to a cell index, or `None` when off-board.
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    /// Returns the piece type at `(row, col)`, or `None` when off-board.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<PieceType> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// True when every cell is on the board and empty.
    ///
    /// Stops at the first cell that fails.
    pub fn can_place<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        cells
            .into_iter()
            .all(|(row, col)| self.get(row, col) == Some(0))
    }

    /// Writes `piece_type` into every given cell. Off-board cells are ignored.
    pub fn place<I>(&mut self, cells: I, piece_type: PieceType)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (row, col) in cells {
            if let Some(idx) = self.index(row, col) {
                self.cells[idx] = piece_type;
            }
        }
    }

    /// Clears every given cell back to empty.
    pub fn remove<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        self.place(cells, 0);
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[PieceType]> {
        // chunks(0) panics, and a zero-sized board has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Copies the board into nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<PieceType>> {
        self.rows().map(<[PieceType]>::to_vec).collect()
    }

    /// Number of cells holding `piece_type`.
    pub fn count(&self, piece_type: PieceType) -> usize {
        self.cells.iter().filter(|&&cell| cell == piece_type).count()
    }
}

/// Character used for a piece type when printing a board.
///
/// Empty cells show as '.', 1-9 as digits, 10-35 as letters, the rest as '#'.
pub fn cell_char(piece_type: PieceType) -> char {
    match piece_type {
        0 => '.',
        1..=35 => char::from_digit(piece_type, 36)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('#'),
        _ => '#',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                write!(f, "{}", cell_char(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::empty(3);
        assert_eq!(board.size(), 3);
        assert!(board.is_empty());
        assert_eq!(board.to_rows(), vec![vec![0; 3]; 3]);
    }

    #[test]
    fn test_try_empty_rejects_unallocatable_sizes() {
        assert_eq!(Board::try_empty(4), Some(Board::empty(4)));
        assert_eq!(Board::try_empty(usize::MAX), None);
        assert_eq!(Board::try_empty(i32::MAX as usize), None);
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let board = Board::empty(2);
        assert_eq!(board.get(0, 0), Some(0));
        assert_eq!(board.get(1, 1), Some(0));
        assert_eq!(board.get(2, 0), None);
        assert_eq!(board.get(0, 2), None);
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
    }

    #[test]
    fn test_place_then_remove_restores_board() {
        let mut board = Board::empty(3);
        let cells = [(0, 0), (0, 1), (1, 0)];
        assert!(board.can_place(cells));

        board.place(cells, 4);
        assert_eq!(board.count(4), 3);
        assert!(!board.can_place([(1, 0), (2, 0)]));

        board.remove(cells);
        assert!(board.is_empty());
    }

    #[test]
    fn test_can_place_rejects_off_board_cells() {
        let board = Board::empty(2);
        assert!(!board.can_place([(0, 0), (0, 2)]));
        assert!(!board.can_place([(-1, 0)]));
    }

    #[test]
    fn test_cell_chars() {
        assert_eq!(cell_char(0), '.');
        assert_eq!(cell_char(7), '7');
        assert_eq!(cell_char(10), 'A');
        assert_eq!(cell_char(11), 'B');
        assert_eq!(cell_char(35), 'Z');
        assert_eq!(cell_char(36), '#');
    }

    #[test]
    fn test_display() {
        let mut board = Board::empty(3);
        board.place([(0, 0), (0, 1), (0, 2)], 3);
        board.place([(1, 0), (2, 0)], 2);
        board.place([(2, 2)], 11);
        insta::assert_snapshot!(board.to_string(), @r"
        333
        2..
        2.B
        ");
    }
}
