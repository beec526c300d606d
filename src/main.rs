//! CLI entry point for converting sketches into hatch patterns

use clap::Parser;
use hatchcraft::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> hatchcraft::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
