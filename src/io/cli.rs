//! Command-line interface for batch board generation and placement demos

use crate::algorithm::block::{Block, DEFAULT_ROTATIONS};
use crate::algorithm::indicator::NullIndicator;
use crate::algorithm::overlap::ContactTracker;
use crate::algorithm::session::{CommitResult, DragSession};
use crate::io::configuration::{
    DEFAULT_BOARD_COUNT, DEFAULT_GRID_SCALE, DEFAULT_GRID_SIZE, DEFAULT_NOISE_SCALE,
    DEFAULT_NOISE_THRESHOLD, DEFAULT_SEED,
};
use crate::io::error::{BoardError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::visualization::export_board_as_png;
use crate::spatial::board::{Board, BoardConfig};
use crate::spatial::cell::{Cell, CellCoord};
use crate::spatial::scene::{CellVisual, FixedHost, NullCellVisual};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

// Shape catalog for simulated placements, as [x, y] cell offsets
const SHAPES: [&[[i32; 2]]; 3] = [
    &[[0, 0], [1, 0]],
    &[[0, 0], [0, 1], [1, 0]],
    &[[0, 0], [1, 0], [0, 1], [1, 1]],
];

#[derive(Parser)]
#[command(name = "snapgrid")]
#[command(
    author,
    version,
    about = "Generate block-placement boards with procedural seeding"
)]
/// Command-line arguments for the board generation tool
pub struct Cli {
    /// Output directory for board renders
    #[arg(value_name = "OUT_DIR")]
    pub output: PathBuf,

    /// Random seed for reproducible boards
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of boards to generate
    #[arg(short, long, default_value_t = DEFAULT_BOARD_COUNT)]
    pub count: usize,

    /// Cells per board side
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    /// Scale applied to the rendered cell extent
    #[arg(long, default_value_t = DEFAULT_GRID_SCALE)]
    pub grid_scale: f64,

    /// Noise sample threshold above which a cell seeds occupied
    #[arg(short = 't', long, default_value_t = DEFAULT_NOISE_THRESHOLD)]
    pub noise_threshold: f64,

    /// Noise frequency multiplier
    #[arg(long, default_value_t = DEFAULT_NOISE_SCALE)]
    pub noise_scale: f64,

    /// Leave boards empty instead of seeding occupation
    #[arg(short, long)]
    pub empty: bool,

    /// Simulated drag-and-drop placements to attempt per board
    #[arg(short, long, default_value_t = 0)]
    pub place: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch board generation with progress tracking
pub struct BoardProcessor {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl BoardProcessor {
    /// Create a new processor from parsed CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress: None,
        }
    }

    /// Generate, simulate, and export every board in the batch
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation, generation, or export
    /// fails.
    pub fn process(&mut self) -> Result<()> {
        let config = BoardConfig {
            grid_size: self.cli.grid_size,
            grid_scale: self.cli.grid_scale,
            noise_threshold: self.cli.noise_threshold,
            noise_scale: self.cli.noise_scale,
            occupy_on_start: !self.cli.empty,
        };
        config.validate()?;

        std::fs::create_dir_all(&self.cli.output).map_err(|e| BoardError::FileSystem {
            path: self.cli.output.clone(),
            operation: "create directory",
            source: e,
        })?;

        if self.cli.should_show_progress() {
            self.progress = Some(ProgressManager::new(self.cli.count));
        }

        for index in 0..self.cli.count {
            let seed = self.cli.seed.wrapping_add(index as u64);
            if let Some(ref progress) = self.progress {
                progress.start_board(index, seed);
            }

            let mut rng = StdRng::seed_from_u64(seed);
            let host = FixedHost::new([0.0, 0.0], [1.0, 1.0]);
            let mut board = Board::generate(config, &host)?;
            let mut visual = NullCellVisual;
            board.set_default_state(
                config.occupy_on_start,
                config.noise_threshold,
                config.noise_scale,
                &mut rng,
                &mut visual,
            );

            let committed = if self.cli.place > 0 {
                run_placements(&mut board, &mut rng, self.cli.place, &mut visual)?
            } else {
                Vec::new()
            };

            let path = self.cli.output.join(format!("board_{index:03}.png"));
            let path_str = path
                .to_str()
                .ok_or_else(|| invalid_parameter("output", &path.display(), &"not valid UTF-8"))?;
            export_board_as_png(&board, &committed, path_str)?;

            if let Some(ref progress) = self.progress {
                progress.complete_board();
            }
        }

        if let Some(ref progress) = self.progress {
            progress.finish();
        }
        Ok(())
    }
}

/// Drive simulated drag-and-drop placements through the full pipeline
///
/// Each attempt picks a catalog shape and a target cell, moves the pivot so
/// the shape's sub-cells land on cell centers, feeds contacts through the
/// reference overlap driver, ticks the session, and releases. Only legal
/// snaps commit; everything else is discarded, exactly as a live drag
/// would be.
fn run_placements(
    board: &mut Board,
    rng: &mut StdRng,
    attempts: usize,
    visual: &mut dyn CellVisual,
) -> Result<Vec<CellCoord>> {
    let pitch = board.pitch();
    let mut committed = Vec::new();

    for _ in 0..attempts {
        let shape = SHAPES
            .get(rng.random_range(0..SHAPES.len()))
            .copied()
            .unwrap_or(&[[0, 0], [1, 0]]);
        let block = Block::from_cell_offsets(shape, pitch, DEFAULT_ROTATIONS.to_vec())?;
        let mut session = DragSession::begin(block);
        if rng.random::<f64>() < 0.5 {
            session.rotate();
        }

        let target_row = rng.random_range(0..board.grid_size()) as i32;
        let target_column = rng.random_range(0..board.grid_size()) as i32;

        // Land every sub-cell on a cell center by aiming the pivot at the
        // centroid of the target cells under the current rotation.
        let rotation = session.block().rotation();
        let aimed: Option<Vec<[f64; 2]>> = shape
            .iter()
            .map(|&[x, y]| {
                let rotated = rotation.apply([f64::from(x), f64::from(y)]);
                board
                    .cell_at(
                        target_row + rotated[1].round() as i32,
                        target_column + rotated[0].round() as i32,
                    )
                    .map(Cell::position)
            })
            .collect();
        let Some(aimed) = aimed else {
            continue;
        };
        let count = aimed.len() as f64;
        let pivot = [
            aimed.iter().map(|position| position[0]).sum::<f64>() / count,
            aimed.iter().map(|position| position[1]).sum::<f64>() / count,
        ];
        session.move_to(pivot);

        let mut tracker = ContactTracker::new();
        let mut indicator = NullIndicator;
        for event in tracker.diff(session.block(), board) {
            session.push_overlap(event);
        }
        session.tick(board, &mut indicator);

        match session.release(board, visual, &mut indicator) {
            CommitResult::Committed(cells) => committed.extend(cells),
            CommitResult::Discarded => {}
        }
    }

    Ok(committed)
}
