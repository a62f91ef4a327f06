//! Stderr logging setup

use crate::io::error::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Log specification for the given verbosity flags
///
/// `quiet` wins over `verbose`.
pub const fn log_level(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Install the global logger writing to stderr
///
/// The returned handle must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if:
/// - The log specification cannot be parsed
/// - A global logger is already installed
pub fn init_logging(level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_str(level)?.log_to_stderr().start()?;
    Ok(handle)
}
