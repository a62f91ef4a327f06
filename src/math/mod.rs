//! Image filtering primitives

/// 2D convolution with configurable boundary handling
pub mod convolution;
/// Sobel derivatives, isophotes and mask normals
pub mod gradient;
