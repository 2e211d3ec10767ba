//! Drag session state machine and per-tick pipeline
//!
//! One session covers one drag from pickup to release. Overlap events queue
//! as they arrive and are consumed at the next tick, after which the snap is
//! evaluated and the indicator updated; the frame order is always events,
//! then input, then evaluation, then presentation.

use crate::algorithm::block::Block;
use crate::algorithm::hitset::HitSet;
use crate::algorithm::indicator::{IndicatorTint, SnapIndicator};
use crate::algorithm::matcher::{SnapResult, evaluate_snap};
use crate::spatial::board::Board;
use crate::spatial::cell::CellCoord;
use crate::spatial::scene::CellVisual;
use log::debug;
use std::collections::VecDeque;

/// Overlap notification from the physics collaborator
///
/// Payloads carry integer identities only; nothing downstream re-derives a
/// cell from a name or a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    /// A block sub-cell entered a cell's trigger region
    Begin {
        /// Index of the sub-cell within the block
        sub_cell: usize,
        /// The contacted cell
        cell: CellCoord,
    },
    /// A block sub-cell left a cell's trigger region
    End {
        /// Index of the sub-cell within the block
        sub_cell: usize,
        /// The formerly contacted cell
        cell: CellCoord,
    },
}

/// Outcome of releasing a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    /// The snap was legal; these cells are now occupied
    Committed(Vec<CellCoord>),
    /// No legal snap was active; the board is unchanged
    Discarded,
}

/// One live drag of a block over the board
#[derive(Debug)]
pub struct DragSession {
    block: Block,
    hits: HitSet,
    queue: VecDeque<OverlapEvent>,
    last: SnapResult,
}

impl DragSession {
    /// Start dragging a block
    pub const fn begin(block: Block) -> Self {
        Self {
            block,
            hits: HitSet::new(),
            queue: VecDeque::new(),
            last: SnapResult::Unsnapped,
        }
    }

    /// Queue an overlap event for the next tick
    pub fn push_overlap(&mut self, event: OverlapEvent) {
        self.queue.push_back(event);
    }

    /// Move the block pivot to a new world position
    pub const fn move_to(&mut self, pivot: [f64; 2]) {
        self.block.move_to(pivot);
    }

    /// Toggle the block to its next allowed rotation
    ///
    /// Takes effect immediately; the next evaluation uses the new basis.
    pub const fn rotate(&mut self) {
        self.block.toggle_rotation();
    }

    /// The dragged block
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Result of the most recent evaluation
    pub const fn last_result(&self) -> &SnapResult {
        &self.last
    }

    /// Run one frame: drain queued events, evaluate, update the indicator
    ///
    /// Must run after the physics collaborator has resolved overlaps for
    /// the tick; evaluating against a stale queue yields a stale match.
    pub fn tick(&mut self, board: &Board, indicator: &mut dyn SnapIndicator) -> &SnapResult {
        while let Some(event) = self.queue.pop_front() {
            match event {
                OverlapEvent::Begin { cell, .. } => self.hits.begin(cell),
                OverlapEvent::End { cell, .. } => self.hits.end(cell),
            }
        }

        self.last = evaluate_snap(board, &self.block, &self.hits);
        match &self.last {
            SnapResult::Snapped { mean, legal, .. } => {
                indicator.place(*mean, self.block.rotation());
                indicator.tint(if *legal {
                    IndicatorTint::Available
                } else {
                    IndicatorTint::Blocked
                });
                indicator.set_visible(true);
            }
            SnapResult::Unsnapped => indicator.set_visible(false),
        }
        &self.last
    }

    /// Release the block, committing a legal snap
    ///
    /// The decision reads the most recent evaluation; events queued since
    /// the last tick are deliberately not consumed here. A legal snap marks
    /// every assigned cell occupied in one authoritative step. What happens
    /// to the block object afterwards is the embedding's decision.
    pub fn release(
        self,
        board: &mut Board,
        visual: &mut dyn CellVisual,
        indicator: &mut dyn SnapIndicator,
    ) -> CommitResult {
        indicator.set_visible(false);
        match self.last {
            SnapResult::Snapped { cells, legal: true, .. } => {
                for coord in &cells {
                    board.set_occupation(*coord, true, visual);
                }
                debug!("committed {} cells", cells.len());
                CommitResult::Committed(cells)
            }
            _ => CommitResult::Discarded,
        }
    }

    /// Abandon the drag before release
    ///
    /// Clears the contact state and hides the indicator; nothing else needs
    /// cleanup because no commit exists before release.
    pub fn abandon(&mut self, indicator: &mut dyn SnapIndicator) {
        self.queue.clear();
        self.hits.clear();
        self.last = SnapResult::Unsnapped;
        indicator.set_visible(false);
    }
}
