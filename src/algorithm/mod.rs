//! Snap matching between dragged blocks and board cells

/// Block shapes and discrete rotation
pub mod block;
/// Reference-counted contact tracking
pub mod hitset;
/// Snap indicator presentation seam
pub mod indicator;
/// Greedy shape matching and layout validation
pub mod matcher;
/// Reference AABB overlap driver
pub mod overlap;
/// Drag session state machine and per-tick pipeline
pub mod session;

pub use block::{Block, Rotation};
pub use matcher::SnapResult;
pub use session::{CommitResult, DragSession, OverlapEvent};
