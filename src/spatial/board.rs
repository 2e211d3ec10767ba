//! Board generation, procedural seeding, integrity repair, and occupancy queries
//!
//! The board owns a square grid of cells in row-major order, so the flat
//! index of a cell is `row * grid_size + column`. Neighbor lookups rely on
//! that layout; any change to the storage must preserve O(1) coordinate
//! lookup.

use crate::io::configuration::{
    GRID_SCALE_MAX, GRID_SCALE_MIN, GRID_SIZE_MAX, GRID_SIZE_MIN, NOISE_OFFSET_RANGE,
    NOISE_THRESHOLD_MAX, NOISE_THRESHOLD_MIN,
};
use crate::io::error::{Result, invalid_parameter, missing_context};
use crate::math::noise::GradientNoise;
use crate::spatial::cell::{Cell, CellCoord};
use crate::spatial::scene::{CellHost, CellVisual, CellVisualState};
use bitvec::prelude::BitVec;
use log::debug;
use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;

const ORTHOGONAL: [[i32; 2]; 4] = [[-1, 0], [1, 0], [0, -1], [0, 1]];

/// Parameters accepted for board generation
#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    /// Cells per board side
    pub grid_size: usize,
    /// Scale applied to the host's rendered cell extent
    pub grid_scale: f64,
    /// Noise sample threshold above which a cell seeds occupied
    pub noise_threshold: f64,
    /// Noise frequency multiplier
    pub noise_scale: f64,
    /// Whether to seed occupation after generation
    pub occupy_on_start: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: crate::io::configuration::DEFAULT_GRID_SIZE,
            grid_scale: crate::io::configuration::DEFAULT_GRID_SCALE,
            noise_threshold: crate::io::configuration::DEFAULT_NOISE_THRESHOLD,
            noise_scale: crate::io::configuration::DEFAULT_NOISE_SCALE,
            occupy_on_start: true,
        }
    }
}

impl BoardConfig {
    /// Check every parameter against its accepted range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter outside its range.
    pub fn validate(&self) -> Result<()> {
        if !(GRID_SIZE_MIN..=GRID_SIZE_MAX).contains(&self.grid_size) {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &format!("must be between {GRID_SIZE_MIN} and {GRID_SIZE_MAX}"),
            ));
        }
        if self.grid_scale <= GRID_SCALE_MIN || self.grid_scale > GRID_SCALE_MAX {
            return Err(invalid_parameter(
                "grid_scale",
                &self.grid_scale,
                &format!("must be greater than {GRID_SCALE_MIN} and at most {GRID_SCALE_MAX}"),
            ));
        }
        if !(NOISE_THRESHOLD_MIN..=NOISE_THRESHOLD_MAX).contains(&self.noise_threshold) {
            return Err(invalid_parameter(
                "noise_threshold",
                &self.noise_threshold,
                &format!("must be between {NOISE_THRESHOLD_MIN} and {NOISE_THRESHOLD_MAX}"),
            ));
        }
        if self.noise_scale <= 0.0 {
            return Err(invalid_parameter(
                "noise_scale",
                &self.noise_scale,
                &"must be positive",
            ));
        }
        Ok(())
    }
}

/// Square grid of cells with procedural occupation
#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    grid_size: usize,
    anchor: [f64; 2],
    pitch: [f64; 2],
    config: BoardConfig,
}

impl Board {
    /// Build a fresh board from the host context
    ///
    /// Cells are laid out row-major from the host anchor; every cell's
    /// trigger extent is the host's rendered extent scaled by
    /// `grid_scale`, and cell spacing matches that extent exactly.
    ///
    /// Parameters and the host anchor are resolved before any other work,
    /// so a failed call leaves whatever board the caller still holds
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is out of range or the host has no
    /// mounted container.
    pub fn generate(config: BoardConfig, host: &dyn CellHost) -> Result<Self> {
        config.validate()?;
        let anchor = host
            .anchor()
            .ok_or_else(|| missing_context("generate", &"cell host has no mounted container"))?;

        let rendered = host.rendered_extent();
        let extent = [
            rendered[0] * config.grid_scale,
            rendered[1] * config.grid_scale,
        ];
        let pitch = extent;
        let size = config.grid_size;

        let cells = Array2::from_shape_fn((size, size), |(row, column)| {
            let position = [
                (column as f64).mul_add(pitch[0], anchor[0]),
                (row as f64).mul_add(pitch[1], anchor[1]),
            ];
            Cell::new(CellCoord::new(row, column), position, extent)
        });

        Ok(Self {
            cells,
            grid_size: size,
            anchor,
            pitch,
            config,
        })
    }

    /// Cells per board side
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// World anchor the board was generated from
    pub const fn anchor(&self) -> [f64; 2] {
        self.anchor
    }

    /// Center-to-center cell spacing
    pub const fn pitch(&self) -> [f64; 2] {
        self.pitch
    }

    /// Configuration the board was generated with
    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of currently occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Bounds-checked cell lookup
    ///
    /// Returns `None` for any coordinate outside `[0, grid_size)` on
    /// either axis.
    pub fn cell_at(&self, row: i32, column: i32) -> Option<&Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        self.cells.get((row as usize, column as usize))
    }

    /// Count occupied cells in the four orthogonal directions
    ///
    /// Off-grid neighbors count as unoccupied.
    pub fn count_occupied_neighbors(&self, coord: CellCoord) -> usize {
        ORTHOGONAL
            .iter()
            .filter(|step| {
                self.cell_at(coord.row as i32 + step[0], coord.column as i32 + step[1])
                    .is_some_and(Cell::is_occupied)
            })
            .count()
    }

    /// Set one cell's occupation flag and report it to the presentation seam
    ///
    /// This is the single authorized mutation path for occupation; seeding,
    /// repair, and commit all route through it. Returns `false` without
    /// side effects for a coordinate the board does not own.
    pub fn set_occupation(
        &mut self,
        coord: CellCoord,
        occupied: bool,
        visual: &mut dyn CellVisual,
    ) -> bool {
        let Some(cell) = self.cells.get_mut((coord.row, coord.column)) else {
            return false;
        };
        cell.set_occupied_flag(occupied);
        let state = if occupied {
            CellVisualState::Occupied
        } else {
            CellVisualState::Free
        };
        visual.set_cell_state(coord, state);
        true
    }

    /// Reset every cell and optionally re-seed occupation from noise
    ///
    /// Seeding samples a freshly offset noise field per attempt and marks
    /// cells whose sample exceeds the threshold. When an attempt occupies
    /// nothing, the whole pass repeats with new offsets; thresholds near
    /// the top of the noise range can spin here for many attempts before
    /// one lands. After an accepted attempt the integrity repair runs once.
    pub fn set_default_state(
        &mut self,
        occupy_on_start: bool,
        noise_threshold: f64,
        noise_scale: f64,
        rng: &mut StdRng,
        visual: &mut dyn CellVisual,
    ) {
        let coords: Vec<CellCoord> = self.cells.iter().map(Cell::coord).collect();
        for coord in &coords {
            self.set_occupation(*coord, false, visual);
        }
        if !occupy_on_start {
            return;
        }

        let noise = GradientNoise::seeded(rng);
        let mut attempt = 0usize;
        loop {
            attempt += 1;
            let offset = [
                rng.random_range(0.0..NOISE_OFFSET_RANGE),
                rng.random_range(0.0..NOISE_OFFSET_RANGE),
            ];
            let mut occupied_any = false;
            for coord in &coords {
                let sample = noise.sample(
                    (coord.column as f64 + offset[0]) * noise_scale,
                    (coord.row as f64 + offset[1]) * noise_scale,
                );
                if sample > noise_threshold {
                    self.set_occupation(*coord, true, visual);
                    occupied_any = true;
                }
            }
            if occupied_any {
                debug!("seeding accepted on attempt {attempt}");
                break;
            }
            debug!("seeding attempt {attempt} left the board empty, resampling");
        }

        self.fix_grid_integrity(visual);
    }

    /// Single-pass connectivity repair
    ///
    /// Both candidate lists are judged against a snapshot taken before any
    /// mutation: unoccupied cells whose four orthogonal neighbors are all
    /// occupied are filled, then occupied cells with no occupied neighbor
    /// are cleared. Fills land before clears and nothing is re-evaluated
    /// against the mutated state, so second-order gaps and islands can
    /// survive a pass.
    pub fn fix_grid_integrity(&mut self, visual: &mut dyn CellVisual) {
        let size = self.grid_size;
        let snapshot: BitVec = self.cells.iter().map(Cell::is_occupied).collect();
        let occupied_at = |row: i32, column: i32| -> bool {
            if row < 0 || column < 0 || row >= size as i32 || column >= size as i32 {
                return false;
            }
            snapshot
                .get(row as usize * size + column as usize)
                .is_some_and(|bit| *bit)
        };

        let mut to_fill = Vec::new();
        let mut to_clear = Vec::new();
        for cell in &self.cells {
            let coord = cell.coord();
            let row = coord.row as i32;
            let column = coord.column as i32;
            let neighbors = ORTHOGONAL
                .iter()
                .filter(|step| occupied_at(row + step[0], column + step[1]))
                .count();
            if cell.is_occupied() {
                if neighbors == 0 {
                    to_clear.push(coord);
                }
            } else if neighbors == 4 {
                to_fill.push(coord);
            }
        }

        let filled = to_fill.len();
        let cleared = to_clear.len();
        for coord in to_fill {
            self.set_occupation(coord, true, visual);
        }
        for coord in to_clear {
            self.set_occupation(coord, false, visual);
        }
        if filled + cleared > 0 {
            debug!("integrity repair filled {filled} gaps, cleared {cleared} islands");
        }
    }
}
