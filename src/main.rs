//! CLI entry point for batch board generation and placement demos

use clap::Parser;
use snapgrid::io::cli::{BoardProcessor, Cli};

fn main() -> snapgrid::Result<()> {
    let cli = Cli::parse();
    let mut processor = BoardProcessor::new(cli);
    processor.process()
}
