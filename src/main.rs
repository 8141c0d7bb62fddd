//! CLI entry point for the seeded bouquet mosaic renderer

use clap::Parser;
use pixelbloom::io::cli::{Cli, MosaicProcessor};

fn main() -> pixelbloom::Result<()> {
    let cli = Cli::parse();
    pixelbloom::io::logging::init(cli.verbose, cli.quiet);
    let mut processor = MosaicProcessor::new(cli);
    processor.process()
}
