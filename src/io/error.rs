//! Error types and context management for region filling operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all region filling operations
#[derive(Debug)]
pub enum InpaintError {
    /// Failed to load an image or mask from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Image and mask do not share the same dimensions
    DimensionMismatch {
        /// Image dimensions (width, height)
        image: (u32, u32),
        /// Mask dimensions (width, height)
        mask: (u32, u32),
    },

    /// Input cannot be filled at all
    ///
    /// Occurs when:
    /// - The image has zero area
    /// - The mask marks every pixel as hole, leaving nothing to copy from
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Exemplar search exhausted every candidate without an admissible patch
    NoExemplarFound {
        /// Fill iteration when this occurred
        iteration: usize,
        /// Target patch center (x, y)
        target: [usize; 2],
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The filled image was requested before the fill front emptied
    FillIncomplete {
        /// Hole pixels still waiting to be filled
        remaining: usize,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Logger could not be installed
    Logger {
        /// Underlying logger error
        source: flexi_logger::FlexiLoggerError,
    },
}

impl fmt::Display for InpaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::DimensionMismatch { image, mask } => {
                write!(
                    f,
                    "Mask size {}x{} does not match image size {}x{}",
                    mask.0, mask.1, image.0, image.1
                )
            }
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input: {reason}")
            }
            Self::NoExemplarFound { iteration, target } => {
                write!(
                    f,
                    "No exemplar patch found at iteration {iteration} for target ({}, {})",
                    target[0], target[1]
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FillIncomplete { remaining } => {
                write!(f, "Fill is incomplete: {remaining} hole pixels remain")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Logger { source } => {
                write!(f, "Failed to initialize logging: {source}")
            }
        }
    }
}

impl std::error::Error for InpaintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Logger { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for region filling results
pub type Result<T> = std::result::Result<T, InpaintError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current fill iteration
    pub iteration: Option<usize>,
    /// Pixel coordinates (x, y) where the error occurred
    pub position: Option<[usize; 2]>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with fill state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<InpaintError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only positional errors benefit from fill state
            if let InpaintError::NoExemplarFound { iteration, target } = &mut error {
                if let Some(iter) = context.iteration {
                    *iteration = iter;
                }
                if let Some(position) = context.position {
                    *target = position;
                }
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for InpaintError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for InpaintError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<flexi_logger::FlexiLoggerError> for InpaintError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        Self::Logger { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> InpaintError {
    InpaintError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap I/O errors for `operation` on `path`, for use with `map_err`
pub fn file_system(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> InpaintError {
    let path = path.to_path_buf();
    move |source| InpaintError::FileSystem {
        path,
        operation,
        source,
    }
}

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> InpaintError {
    InpaintError::InvalidInput {
        reason: reason.to_string(),
    }
}
