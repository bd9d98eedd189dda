//! Rotation and placement geometry on the square grid.
//!
//! A piece can be turned in 90 degree steps. Offsets are `(row, col)` with
//! rows growing downwards, so a clockwise quarter turn maps `(dr, dc)` to
//! `(dc, -dr)`.

use crate::pieces::{Offset, PieceShape};

/// Number of rotations tried per anchor cell.
pub const NUM_ROTATIONS: usize = 4;

/// Rotation transforms, indexed by rotation index.
///
/// The index order is part of the search order: rotation 0 is tried first.
pub const ROTATIONS: [fn(Offset) -> Offset; NUM_ROTATIONS] = [
    |(dr, dc)| (dr, dc),   // 0 degrees
    |(dr, dc)| (dc, -dr),  // 90 degrees clockwise
    |(dr, dc)| (-dr, -dc), // 180 degrees
    |(dr, dc)| (-dc, dr),  // 270 degrees clockwise
];

/// Where and how a single piece sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    /// Index into [`ROTATIONS`].
    pub rotation: usize,
}

impl Placement {
    /// Absolute board cells covered by `offsets` under this placement.
    ///
    /// Cells may lie outside the board; callers check bounds.
    pub fn cells<'a>(&self, offsets: &'a [Offset]) -> impl Iterator<Item = (i32, i32)> + 'a {
        let rotate = ROTATIONS[self.rotation];
        let (row, col) = (self.row, self.col);
        offsets.iter().map(move |&offset| {
            let (dr, dc) = rotate(offset);
            (row + dr, col + dc)
        })
    }
}

/// Applies rotation `rotation` to every offset of a shape.
pub fn rotate_offsets(offsets: &[Offset], rotation: usize) -> Vec<Offset> {
    let rotate = ROTATIONS[rotation];
    offsets.iter().map(|&offset| rotate(offset)).collect()
}

/// Returns the rotation indices that produce pairwise distinct offset sets.
///
/// Offsets are compared without normalizing, so two kept-apart rotations
/// cover different cells from the same anchor. Of each group of identical
/// rotations only the lowest index is kept, which leaves the order in which
/// distinct placements are visited unchanged.
pub fn distinct_rotations(shape: &PieceShape) -> Vec<usize> {
    let mut seen: Vec<Vec<Offset>> = Vec::with_capacity(NUM_ROTATIONS);
    let mut rotations = Vec::with_capacity(NUM_ROTATIONS);

    for rotation in 0..NUM_ROTATIONS {
        let mut cells = rotate_offsets(shape.offsets(), rotation);
        cells.sort_unstable();
        cells.dedup();
        if !seen.contains(&cells) {
            seen.push(cells);
            rotations.push(rotation);
        }
    }

    rotations
}
