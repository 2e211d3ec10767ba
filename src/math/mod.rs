//! Mathematical utilities for procedural seeding

/// Seeded coherent gradient noise
pub mod noise;
