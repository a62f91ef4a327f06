//! Input/output, configuration and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Algorithm constants and runtime fill parameters
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// Image loading and export
pub mod image;
/// Logger installation for the binary
pub mod logging;
/// Multi-file progress bars
pub mod progress;
/// Fill progression capture and GIF export
pub mod visualization;
