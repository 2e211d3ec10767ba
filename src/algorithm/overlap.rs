//! Reference AABB overlap driver
//!
//! Stands in for the physics collaborator: each frame it intersects the
//! block's sub-cell boxes with every cell's trigger extent, diffs the
//! result against the previous frame, and emits paired begin/end events.
//! Embeddings with a real physics layer feed the session from their own
//! callbacks instead.

use crate::algorithm::block::Block;
use crate::algorithm::session::OverlapEvent;
use crate::spatial::board::Board;
use crate::spatial::cell::{Cell, CellCoord};
use std::collections::BTreeSet;

/// Per-drag contact state for the reference driver
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: BTreeSet<(usize, CellCoord)>,
}

fn boxes_overlap(center: [f64; 2], extent: [f64; 2], cell: &Cell) -> bool {
    let cell_center = cell.position();
    let cell_extent = cell.extent();
    2.0 * (center[0] - cell_center[0]).abs() < extent[0] + cell_extent[0]
        && 2.0 * (center[1] - cell_center[1]).abs() < extent[1] + cell_extent[1]
}

impl ContactTracker {
    /// Create a tracker with no active contacts
    pub const fn new() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    /// Recompute contacts for the block's current pose
    ///
    /// Returns begin events for fresh contacts followed by end events for
    /// dropped ones. Sub-cell boxes use the board's cell extent, since a
    /// block is built from cells of the same size.
    pub fn diff(&mut self, block: &Block, board: &Board) -> Vec<OverlapEvent> {
        let extent = board.cell_at(0, 0).map_or([0.0, 0.0], Cell::extent);

        let mut current = BTreeSet::new();
        for (sub_cell, position) in block.anchor_positions().enumerate() {
            for cell in board.cells() {
                if boxes_overlap(position, extent, cell) {
                    current.insert((sub_cell, cell.coord()));
                }
            }
        }

        let mut events = Vec::new();
        for &(sub_cell, cell) in current.difference(&self.active) {
            events.push(OverlapEvent::Begin { sub_cell, cell });
        }
        for &(sub_cell, cell) in self.active.difference(&current) {
            events.push(OverlapEvent::End { sub_cell, cell });
        }
        self.active = current;
        events
    }

    /// Forget every active contact without emitting events
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
