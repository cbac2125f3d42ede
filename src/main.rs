use clap::Parser;
use ices_processor::cli::{run, Cli};
use ices_processor::error::Result;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    run(cli)
}
