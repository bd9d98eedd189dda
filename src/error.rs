//! Error types for the packing solver.

use thiserror::Error;

use crate::pieces::PieceType;

/// Errors reported by catalog construction and by [`crate::Solver::solve`].
///
/// An exhausted search is not an error: it is reported as a
/// [`crate::Solution`] with `found == false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("no pieces to place")]
    NoPieces,

    #[error("board size must be positive, got {size}")]
    InvalidSize { size: i32 },

    #[error("unknown piece type {piece_type}")]
    UnknownPieceType { piece_type: PieceType },

    #[error("search was cancelled")]
    Cancelled,

    #[error("piece type 0 is reserved for empty cells")]
    ReservedPieceType,

    #[error("piece type {piece_type} has an empty shape")]
    EmptyShape { piece_type: PieceType },

    #[error("piece type {piece_type} is defined more than once")]
    DuplicatePieceType { piece_type: PieceType },
}
