//! Draggable rigid block shapes and discrete rotation

use crate::io::error::{Result, invalid_parameter};

/// Discrete rotation applied to block anchor offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    Deg0,
    /// Quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three-quarter turn
    Deg270,
}

impl Rotation {
    /// Rotate an offset around the origin
    pub const fn apply(self, offset: [f64; 2]) -> [f64; 2] {
        match self {
            Self::Deg0 => offset,
            Self::Deg90 => [-offset[1], offset[0]],
            Self::Deg180 => [-offset[0], -offset[1]],
            Self::Deg270 => [offset[1], -offset[0]],
        }
    }

    /// Rotation angle in degrees, for indicator placement
    pub const fn degrees(self) -> f64 {
        match self {
            Self::Deg0 => 0.0,
            Self::Deg90 => 90.0,
            Self::Deg180 => 180.0,
            Self::Deg270 => 270.0,
        }
    }
}

/// Default rotation cycle: the upright and quarter-turned bases
pub const DEFAULT_ROTATIONS: [Rotation; 2] = [Rotation::Deg0, Rotation::Deg90];

/// A rigid multi-cell shape dragged over the board
///
/// Anchors are fixed offsets from the pivot; the pivot follows the drag.
/// Rotating swaps the offset basis immediately, so the next evaluation
/// already sees the rotated shape.
#[derive(Debug, Clone)]
pub struct Block {
    anchors: Vec<[f64; 2]>,
    rotations: Vec<Rotation>,
    rotation_index: usize,
    pivot: [f64; 2],
}

impl Block {
    /// Create a block from raw anchor offsets
    ///
    /// # Errors
    ///
    /// Returns an error when `anchors` or `rotations` is empty.
    pub fn new(anchors: Vec<[f64; 2]>, rotations: Vec<Rotation>) -> Result<Self> {
        if anchors.is_empty() {
            return Err(invalid_parameter(
                "anchors",
                &"[]",
                &"a block needs at least one sub-cell",
            ));
        }
        if rotations.is_empty() {
            return Err(invalid_parameter(
                "rotations",
                &"[]",
                &"a block needs at least one allowed rotation",
            ));
        }
        Ok(Self {
            anchors,
            rotations,
            rotation_index: 0,
            pivot: [0.0, 0.0],
        })
    }

    /// Create a block from integer cell offsets scaled by the board pitch
    ///
    /// Offsets are `[x, y]` in cell units. Anchors are centered on the
    /// shape centroid, so the pivot sits at the middle of the shape.
    ///
    /// # Errors
    ///
    /// Returns an error when `cells` or `rotations` is empty.
    pub fn from_cell_offsets(
        cells: &[[i32; 2]],
        pitch: [f64; 2],
        rotations: Vec<Rotation>,
    ) -> Result<Self> {
        if cells.is_empty() {
            return Err(invalid_parameter(
                "cells",
                &"[]",
                &"a block needs at least one sub-cell",
            ));
        }
        let count = cells.len() as f64;
        let centroid = [
            cells.iter().map(|cell| f64::from(cell[0])).sum::<f64>() / count,
            cells.iter().map(|cell| f64::from(cell[1])).sum::<f64>() / count,
        ];
        let anchors = cells
            .iter()
            .map(|cell| {
                [
                    (f64::from(cell[0]) - centroid[0]) * pitch[0],
                    (f64::from(cell[1]) - centroid[1]) * pitch[1],
                ]
            })
            .collect();
        Self::new(anchors, rotations)
    }

    /// Number of sub-cells in the shape
    pub const fn cell_count(&self) -> usize {
        self.anchors.len()
    }

    /// Current rotation state
    pub fn rotation(&self) -> Rotation {
        self.rotations
            .get(self.rotation_index)
            .copied()
            .unwrap_or(Rotation::Deg0)
    }

    /// Advance to the next rotation in the allowed cycle
    pub const fn toggle_rotation(&mut self) {
        self.rotation_index = (self.rotation_index + 1) % self.rotations.len();
    }

    /// Current pivot world position
    pub const fn pivot(&self) -> [f64; 2] {
        self.pivot
    }

    /// Move the pivot to a new world position
    pub const fn move_to(&mut self, pivot: [f64; 2]) {
        self.pivot = pivot;
    }

    /// Anchor offsets from the pivot in the current rotation basis
    pub fn anchor_offsets(&self) -> impl Iterator<Item = [f64; 2]> {
        let rotation = self.rotation();
        self.anchors.iter().map(move |offset| rotation.apply(*offset))
    }

    /// Anchor world positions in a fixed, stable order
    pub fn anchor_positions(&self) -> impl Iterator<Item = [f64; 2]> {
        let pivot = self.pivot;
        self.anchor_offsets()
            .map(move |offset| [pivot[0] + offset[0], pivot[1] + offset[1]])
    }
}
