//! CLI entry point for exemplar-based region filling

use clap::Parser;
use regionfill::io::cli::{Cli, FileProcessor};
use regionfill::io::logging::init_logging;

fn main() -> regionfill::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.log_level())?;
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
