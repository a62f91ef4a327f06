//! Pixel grids and the per-pixel fields of a fill
//!
//! This module contains:
//! - The RGB canvas and patch windows
//! - The source/hole region mask
//! - Confidence and isophote fields
//! - The combined fill state

/// Per-pixel confidence and isophote fields
pub mod fields;
/// RGB canvas and clipped patch windows
pub mod grid;
/// Source/hole classification
pub mod region;
/// Mutable state shared by one fill
pub mod state;

pub use state::FillState;
