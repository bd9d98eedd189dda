//! Piece definitions and the catalog mapping piece types to shapes.
//!
//! Each shape is a list of cell offsets relative to an anchor cell. The
//! standard catalog holds eleven mono- to tetromino shapes numbered 1-11.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::error::PackError;

/// A cell offset `(row_delta, col_delta)` relative to a piece's anchor.
pub type Offset = (i32, i32);

/// Identifier of a piece type. Zero marks an empty board cell.
pub type PieceType = u32;

/// The canonical (unrotated) cells of a piece type. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    offsets: Vec<Offset>,
}

impl PieceShape {
    /// Creates a shape from its offsets, rejecting an empty list.
    pub fn new(piece_type: PieceType, offsets: Vec<Offset>) -> Result<Self, PackError> {
        if offsets.is_empty() {
            return Err(PackError::EmptyShape { piece_type });
        }
        Ok(Self { offsets })
    }

    #[inline]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Number of board cells this piece covers.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.offsets.len()
    }

    /// Draws the shape in its bounding box, `#` for covered cells.
    pub fn picture(&self) -> String {
        let min_row = self.offsets.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let max_row = self.offsets.iter().map(|&(r, _)| r).max().unwrap_or(0);
        let min_col = self.offsets.iter().map(|&(_, c)| c).min().unwrap_or(0);
        let max_col = self.offsets.iter().map(|&(_, c)| c).max().unwrap_or(0);

        let mut output = String::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let covered = self.offsets.contains(&(row, col));
                output.push(if covered { '#' } else { '.' });
            }
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.picture())
    }
}

/// The eleven standard shapes. Entry `i` is piece type `i + 1`.
///
/// These literals decide which solution the search finds first, so they
/// must not be reordered or normalized.
pub const STANDARD_PIECES: &[&[Offset]] = &[
    // single square
    &[(0, 0)],
    // vertical domino
    &[(0, 0), (1, 0)],
    // horizontal I-tromino
    &[(0, 0), (0, 1), (0, 2)],
    // L-tromino
    &[(0, 0), (0, 1), (1, 0)],
    // horizontal I-tetromino
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
    // O-tetromino
    &[(0, 0), (0, 1), (1, 0), (1, 1)],
    // L-tetromino, hook down on the right
    &[(0, 0), (0, 1), (0, 2), (1, 2)],
    // J-tetromino, hook up on the left
    &[(0, 0), (1, 0), (1, 1), (1, 2)],
    // T-tetromino
    &[(0, 0), (0, 1), (0, 2), (1, 1)],
    // Z-tetromino
    &[(0, 0), (0, 1), (1, 1), (1, 2)],
    // S-tetromino
    &[(0, 1), (0, 2), (1, 0), (1, 1)],
];

/// Immutable mapping from piece type to shape.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    shapes: FxHashMap<PieceType, PieceShape>,
}

impl PieceCatalog {
    /// Builds a catalog from `(piece_type, offsets)` entries.
    ///
    /// Fails on piece type 0, on an empty shape, or on a repeated piece type.
    pub fn new<I>(entries: I) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = (PieceType, Vec<Offset>)>,
    {
        let mut shapes = FxHashMap::default();
        for (piece_type, offsets) in entries {
            if piece_type == 0 {
                return Err(PackError::ReservedPieceType);
            }
            let shape = PieceShape::new(piece_type, offsets)?;
            if shapes.insert(piece_type, shape).is_some() {
                return Err(PackError::DuplicatePieceType { piece_type });
            }
        }
        Ok(Self { shapes })
    }

    /// The process-wide standard catalog, built on first use.
    pub fn standard() -> &'static PieceCatalog {
        static STANDARD: OnceLock<PieceCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let shapes = STANDARD_PIECES
                .iter()
                .zip(1..)
                .map(|(offsets, piece_type)| {
                    (
                        piece_type,
                        PieceShape {
                            offsets: offsets.to_vec(),
                        },
                    )
                })
                .collect();
            Self { shapes }
        })
    }

    /// Looks up the canonical shape of `piece_type`.
    pub fn shape_of(&self, piece_type: PieceType) -> Result<&PieceShape, PackError> {
        self.shapes
            .get(&piece_type)
            .ok_or(PackError::UnknownPieceType { piece_type })
    }

    pub fn contains(&self, piece_type: PieceType) -> bool {
        self.shapes.contains_key(&piece_type)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Entries in ascending piece-type order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceType, &PieceShape)> {
        let mut entries: Vec<_> = self.shapes.iter().map(|(&id, shape)| (id, shape)).collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries.into_iter()
    }
}
