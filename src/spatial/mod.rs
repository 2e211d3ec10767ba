//! Spatial data structures and board queries
//!
//! This module contains the board-side functionality:
//! - Cell identity, placement, and occupation state
//! - Board generation, procedural seeding, and integrity repair
//! - Column label encoding and scene collaborator seams

/// Board generation, seeding, and occupancy queries
pub mod board;
/// Cell identity and placement
pub mod cell;
/// Bijective base-26 column labels
pub mod labels;
/// Scene collaborator seams for cell hosting and presentation
pub mod scene;

pub use board::{Board, BoardConfig};
pub use cell::{Cell, CellCoord};
