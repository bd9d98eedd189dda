//! Depth-first backtracking packing solver.
//!
//! Pieces are placed in the order given. For each piece the candidates are
//! visited anchor row first, then anchor column, then rotation index, and the
//! first complete packing found is returned. The board is mutated in place
//! and every placement is undone on backtrack.
//!
//! Search state lives in an explicit stack of frames, one per placed piece,
//! so the call stack does not grow with the number of pieces.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::PackError;
use crate::geometry::{distinct_rotations, Placement};
use crate::grid::Board;
use crate::pieces::{PieceCatalog, PieceShape, PieceType};

/// A piece type together with where it was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub piece_type: PieceType,
    pub placement: Placement,
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate placements checked for feasibility.
    pub candidates_checked: u64,
    /// Candidates that fit and were written to the board.
    pub placements: u64,
    /// Placements undone after their subtree failed.
    pub backtracks: u64,
}

/// Outcome of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The packed board, or an all-empty board when nothing fits.
    pub board: Board,
    /// Whether every piece was placed.
    pub found: bool,
    /// Chosen placement per piece in input order. Empty when not found.
    pub placements: Vec<PlacedPiece>,
    pub stats: SearchStats,
}

/// Everything the search needs to know about one piece in the sequence.
struct PieceEntry<'a> {
    piece_type: PieceType,
    shape: &'a PieceShape,
    rotations: &'a [usize],
}

/// Search position for one piece in the sequence.
#[derive(Default)]
struct Frame {
    /// Linear index of the next candidate to check.
    next_candidate: usize,
    /// Placement currently on the board for this piece, if any.
    placed: Option<Placement>,
}

/// Packs piece sequences using shapes from a catalog.
pub struct Solver<'a> {
    catalog: &'a PieceCatalog,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> Solver<'a> {
    pub fn new(catalog: &'a PieceCatalog) -> Self {
        Self {
            catalog,
            cancel: None,
        }
    }

    /// Makes the search stop with [`PackError::Cancelled`] once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Checks the inputs, returning the empty board and the shape of each
    /// piece in sequence order.
    fn validate(
        &self,
        size: i32,
        pieces: &[PieceType],
    ) -> Result<(Board, Vec<&'a PieceShape>), PackError> {
        if pieces.is_empty() {
            return Err(PackError::NoPieces);
        }
        if size <= 0 {
            return Err(PackError::InvalidSize { size });
        }
        let shapes = pieces
            .iter()
            .map(|&piece_type| self.catalog.shape_of(piece_type))
            .collect::<Result<Vec<_>, _>>()?;
        // positive after the check above; too many cells to allocate is still invalid
        let board = Board::try_empty(size as usize).ok_or(PackError::InvalidSize { size })?;
        Ok((board, shapes))
    }

    /// Places `pieces` in order on a `size × size` board.
    ///
    /// Returns the first packing in row, column, rotation order. When no
    /// packing exists the solution has `found == false` and an empty board.
    pub fn solve(&self, size: i32, pieces: &[PieceType]) -> Result<Solution, PackError> {
        let (mut board, shapes) = self.validate(size, pieces)?;
        let side = board.size();

        // rotations are computed once per distinct piece type
        let mut rotation_table: FxHashMap<PieceType, Vec<usize>> = FxHashMap::default();
        for (&piece_type, &shape) in pieces.iter().zip(&shapes) {
            rotation_table
                .entry(piece_type)
                .or_insert_with(|| distinct_rotations(shape));
        }

        let entries: Vec<PieceEntry<'_>> = pieces
            .iter()
            .zip(&shapes)
            .map(|(&piece_type, &shape)| PieceEntry {
                piece_type,
                shape,
                rotations: &rotation_table[&piece_type],
            })
            .collect();

        log::debug!("packing {:?} onto a {side}x{side} board", pieces);
        let mut stats = SearchStats::default();
        let found = self.search(&mut board, side, &entries, &mut stats)?;

        let solution = match found {
            Some(placed) => Solution {
                board,
                found: true,
                placements: placed,
                stats,
            },
            None => {
                // every placement has been undone
                debug_assert!(board.is_empty());
                Solution {
                    board,
                    found: false,
                    placements: Vec::new(),
                    stats,
                }
            }
        };

        log::debug!(
            "search {}: {} candidates checked, {} placements, {} backtracks",
            if solution.found { "succeeded" } else { "exhausted" },
            stats.candidates_checked,
            stats.placements,
            stats.backtracks
        );

        Ok(solution)
    }

    /// Runs the depth-first search, leaving the packing on `board` on success.
    ///
    /// Each frame walks the candidates for one piece. When a frame is
    /// revisited after its subtree failed, its current placement is removed
    /// before the next candidate is tried.
    fn search(
        &self,
        board: &mut Board,
        side: usize,
        entries: &[PieceEntry<'_>],
        stats: &mut SearchStats,
    ) -> Result<Option<Vec<PlacedPiece>>, PackError> {
        let mut frames: Vec<Frame> = vec![Frame::default()];

        while !frames.is_empty() {
            let depth = frames.len() - 1;
            if depth == entries.len() {
                let placed = entries
                    .iter()
                    .zip(&frames)
                    .filter_map(|(entry, frame)| {
                        frame.placed.map(|placement| PlacedPiece {
                            piece_type: entry.piece_type,
                            placement,
                        })
                    })
                    .collect();
                return Ok(Some(placed));
            }

            let entry = &entries[depth];
            let frame = &mut frames[depth];
            let offsets = entry.shape.offsets();

            if let Some(previous) = frame.placed.take() {
                board.remove(previous.cells(offsets));
                stats.backtracks += 1;
                log::trace!(
                    "piece {} (#{depth}) leaves ({}, {}) rotation {}",
                    entry.piece_type,
                    previous.row,
                    previous.col,
                    previous.rotation
                );
            }

            let rotations_per_cell = entry.rotations.len();
            let total_candidates = side * side * rotations_per_cell;
            let mut advanced = false;

            while frame.next_candidate < total_candidates {
                if self.is_cancelled() {
                    return Err(PackError::Cancelled);
                }

                let candidate = frame.next_candidate;
                frame.next_candidate += 1;

                // candidate index = (row * side + col) * rotations + rotation slot
                let cell = candidate / rotations_per_cell;
                let placement = Placement {
                    row: (cell / side) as i32,
                    col: (cell % side) as i32,
                    rotation: entry.rotations[candidate % rotations_per_cell],
                };

                stats.candidates_checked += 1;
                if board.can_place(placement.cells(offsets)) {
                    board.place(placement.cells(offsets), entry.piece_type);
                    stats.placements += 1;
                    frame.placed = Some(placement);
                    advanced = true;
                    break;
                }
            }

            if advanced {
                frames.push(Frame::default());
            } else {
                frames.pop();
            }
        }

        Ok(None)
    }
}
