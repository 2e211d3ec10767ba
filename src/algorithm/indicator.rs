//! Snap indicator presentation seam
//!
//! While a drag is live, the matcher reports where the block would land and
//! whether the landing is legal. Embeddings render that however they like;
//! the no-op indicator covers headless use.

use crate::algorithm::block::Rotation;

/// Tints distinguishing a legal landing from a blocked one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorTint {
    /// Every matched cell is free
    Available,
    /// At least one matched cell is occupied
    Blocked,
}

/// Scene-side sink for snap indicator updates
pub trait SnapIndicator {
    /// Show or hide the indicator
    fn set_visible(&mut self, visible: bool);

    /// Place the indicator at a world position with the block's rotation
    fn place(&mut self, position: [f64; 2], rotation: Rotation);

    /// Tint the indicator by landing legality
    fn tint(&mut self, tint: IndicatorTint);
}

/// Indicator that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIndicator;

impl SnapIndicator for NullIndicator {
    fn set_visible(&mut self, _visible: bool) {}

    fn place(&mut self, _position: [f64; 2], _rotation: Rotation) {}

    fn tint(&mut self, _tint: IndicatorTint) {}
}
