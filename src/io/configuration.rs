//! Parameter ranges, runtime defaults, and matching tolerances

// Board parameter ranges enforced before generation
/// Minimum cells per board side
pub const GRID_SIZE_MIN: usize = 10;
/// Maximum cells per board side
pub const GRID_SIZE_MAX: usize = 30;
/// Lower bound for the cell scale factor (exclusive)
pub const GRID_SCALE_MIN: f64 = 0.1;
/// Upper bound for the cell scale factor (inclusive)
pub const GRID_SCALE_MAX: f64 = 1.0;
/// Lowest accepted seeding threshold
pub const NOISE_THRESHOLD_MIN: f64 = 0.4;
/// Highest accepted seeding threshold
pub const NOISE_THRESHOLD_MAX: f64 = 0.6;

// Default values for configurable parameters
/// Default cells per board side
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Default cell scale factor
pub const DEFAULT_GRID_SCALE: f64 = 1.0;
/// Default seeding threshold
pub const DEFAULT_NOISE_THRESHOLD: f64 = 0.5;
/// Default noise frequency multiplier
pub const DEFAULT_NOISE_SCALE: f64 = 0.3;
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of boards per batch
pub const DEFAULT_BOARD_COUNT: usize = 1;

// Seeding internals
/// Range for the random noise offset pair sampled per seeding attempt
pub const NOISE_OFFSET_RANGE: f64 = 256.0;

// Matching tolerances
/// Maximum distance between corresponding block and cell offsets for a
/// layout to be accepted
pub const SNAP_OFFSET_TOLERANCE: f64 = 1.0;

// Output settings
/// Edge length of one cell in exported renders, in pixels
pub const CELL_PIXELS: usize = 16;
