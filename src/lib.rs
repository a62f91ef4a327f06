//! Exemplar-based region filling for RGB images
//!
//! Hole pixels marked in a mask are filled one patch at a time. Each step picks
//! the fill-front pixel with the highest priority (confidence times isophote
//! strength) and copies the most similar fully known patch from elsewhere in
//! the image into it.

#![forbid(unsafe_code)]

/// Fill front, priorities, exemplar search and the fill loop
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Convolution and gradient utilities
pub mod math;
/// Canvas, region mask and per-pixel fields
pub mod spatial;

pub use algorithm::executor::{
    ExemplarInpainter, FillSession, InpaintMethod, IterationReport, inpaint,
};
pub use io::configuration::FillConfig;
pub use io::error::{InpaintError, Result};
pub use math::convolution::BoundaryMode;
