//! Progress display for batch board generation

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Single batch bar over a run of board generations
#[derive(Debug)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar sized to the batch
    pub fn new(board_count: usize) -> Self {
        let bar = ProgressBar::new(board_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar }
    }

    /// Announce the board currently being generated
    pub fn start_board(&self, index: usize, seed: u64) {
        self.bar.set_message(format!("board {index} (seed {seed})"));
    }

    /// Mark the current board as finished
    pub fn complete_board(&self) {
        self.bar.inc(1);
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_with_message("All boards generated");
    }
}
