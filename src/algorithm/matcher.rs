//! Greedy shape matching between block anchors and overlapped cells
//!
//! Matching assigns each block anchor its nearest unclaimed contact cell,
//! then checks that the assigned cells reproduce the block's rigid layout.
//! The assignment is greedy rather than globally optimal, which is accepted
//! behavior for shapes of this size.

use crate::algorithm::block::Block;
use crate::algorithm::hitset::HitSet;
use crate::io::configuration::SNAP_OFFSET_TOLERANCE;
use crate::spatial::board::Board;
use crate::spatial::cell::CellCoord;
use bitvec::prelude::BitVec;

/// Outcome of one snap evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum SnapResult {
    /// No acceptable correspondence this tick
    Unsnapped,
    /// The contacted cells reproduce the block's layout
    Snapped {
        /// Assigned cells, one per block sub-cell, in anchor order
        cells: Vec<CellCoord>,
        /// Mean position of the assigned cells
        mean: [f64; 2],
        /// Whether every assigned cell is currently unoccupied
        legal: bool,
    },
}

impl SnapResult {
    /// Whether a correspondence was found
    pub const fn is_snapped(&self) -> bool {
        matches!(self, Self::Snapped { .. })
    }

    /// Whether a correspondence was found and may be committed
    pub const fn is_legal(&self) -> bool {
        matches!(self, Self::Snapped { legal: true, .. })
    }
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

// Sort key is x then y; shapes whose offsets tie on x fall through to y
// alone, so mirrored layouts inside the tolerance can alias.
fn sort_offsets(offsets: &mut [[f64; 2]]) {
    offsets.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
}

/// Match the block against the currently contacted cells
///
/// Runs once per tick after the overlap queue is drained:
///
/// 1. Fewer distinct contacts than sub-cells is an immediate miss.
/// 2. Each anchor, in the block's fixed order, claims its nearest
///    unclaimed contact cell; distance ties keep the earliest cell in
///    row-major order.
/// 3. The assigned cells' offsets from their mean must reproduce the
///    anchors' offsets from the pivot, compared pairwise after both
///    lists are sorted by `(x, y)` and allowing the fixed tolerance.
///
/// A successful match reports legality: whether every assigned cell is
/// currently free.
pub fn evaluate_snap(board: &Board, block: &Block, hits: &HitSet) -> SnapResult {
    if hits.distinct_cells() < block.cell_count() {
        return SnapResult::Unsnapped;
    }

    // Contacts for cells the board no longer owns are skipped.
    let candidates: Vec<(CellCoord, [f64; 2])> = hits
        .cells()
        .filter_map(|coord| {
            board
                .cell_at(coord.row as i32, coord.column as i32)
                .map(|cell| (coord, cell.position()))
        })
        .collect();
    if candidates.len() < block.cell_count() {
        return SnapResult::Unsnapped;
    }

    let mut claimed: BitVec = BitVec::repeat(false, candidates.len());
    let mut assigned: Vec<(CellCoord, [f64; 2])> = Vec::with_capacity(block.cell_count());
    for anchor in block.anchor_positions() {
        let mut best: Option<(usize, f64)> = None;
        for (index, (_, position)) in candidates.iter().enumerate() {
            if claimed.get(index).is_some_and(|bit| *bit) {
                continue;
            }
            let separation = distance(anchor, *position);
            if best.is_none_or(|(_, closest)| separation < closest) {
                best = Some((index, separation));
            }
        }
        let Some((index, _)) = best else {
            return SnapResult::Unsnapped;
        };
        claimed.set(index, true);
        if let Some(entry) = candidates.get(index) {
            assigned.push(*entry);
        }
    }

    if assigned.len() != block.cell_count() {
        return SnapResult::Unsnapped;
    }

    let count = assigned.len() as f64;
    let mean = [
        assigned.iter().map(|(_, position)| position[0]).sum::<f64>() / count,
        assigned.iter().map(|(_, position)| position[1]).sum::<f64>() / count,
    ];

    let mut block_offsets: Vec<[f64; 2]> = block.anchor_offsets().collect();
    let mut cell_offsets: Vec<[f64; 2]> = assigned
        .iter()
        .map(|(_, position)| [position[0] - mean[0], position[1] - mean[1]])
        .collect();
    sort_offsets(&mut block_offsets);
    sort_offsets(&mut cell_offsets);

    let layout_matches = block_offsets
        .iter()
        .zip(&cell_offsets)
        .all(|(block_offset, cell_offset)| {
            distance(*block_offset, *cell_offset) <= SNAP_OFFSET_TOLERANCE
        });
    if !layout_matches {
        return SnapResult::Unsnapped;
    }

    let legal = assigned.iter().all(|(coord, _)| {
        board
            .cell_at(coord.row as i32, coord.column as i32)
            .is_none_or(|cell| !cell.is_occupied())
    });

    SnapResult::Snapped {
        cells: assigned.into_iter().map(|(coord, _)| coord).collect(),
        mean,
        legal,
    }
}
