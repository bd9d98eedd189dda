//! Polyomino Packing Solver Library
//!
//! Places an ordered sequence of polyomino pieces onto a square board, each
//! piece in one of four rotations, so that nothing overlaps or leaves the
//! board. The search is depth-first and returns the first packing found.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod solver;

pub use error::PackError;
pub use grid::Board;
pub use pieces::{PieceCatalog, PieceShape, PieceType};
pub use solver::{PlacedPiece, SearchStats, Solution, Solver};

/// Packs `pieces` onto a `size × size` board using the standard catalog.
pub fn solve(size: i32, pieces: &[PieceType]) -> Result<Solution, PackError> {
    Solver::new(PieceCatalog::standard()).solve(size, pieces)
}
