//! Input/output operations, configuration, and error handling

/// Command-line interface and batch board processing
pub mod cli;
/// Parameter ranges, defaults, and tolerances
pub mod configuration;
/// Error types for board and export operations
pub mod error;
/// Progress display for batch generation
pub mod progress;
/// PNG export of board occupancy
pub mod visualization;
