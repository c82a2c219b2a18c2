//! CLI entry point for Markov tile map generation

use clap::Parser;
use markovtile::io::cli::{Cli, MapProcessor, init_tracing};

fn main() -> markovtile::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    let mut processor = MapProcessor::new(cli);
    processor.process()
}
