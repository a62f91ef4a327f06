//! Patch capture and GIF generation for fill visualization

use crate::algorithm::compositor::composite_patch;
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{InpaintError, Result};
use crate::spatial::state::FillState;
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

/// Represents a single patch copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchPlacement {
    /// Fill iteration when the patch was copied
    pub iteration: usize,
    /// Target patch center `[x, y]`
    pub target: [usize; 2],
    /// Exemplar patch center `[x, y]`
    pub exemplar: [usize; 2],
}

/// Captures patch copies for visualization
///
/// Keeps the starting state and the sequence of placements. Because the fill
/// is deterministic, replaying the placements on the starting state rebuilds
/// every intermediate canvas.
pub struct VisualizationCapture {
    placements: Vec<PatchPlacement>,
    initial: FillState,
    half: usize,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all known colors is used for unfilled pixels
    pub fn new(initial: &FillState, half: usize) -> Self {
        let mut sums = [0u64; 3];
        let mut count = 0u64;
        for y in 0..initial.height() {
            for x in 0..initial.width() {
                if !initial.region.is_known(x, y) {
                    continue;
                }
                if let Some(color) = initial.canvas.pixel(x, y) {
                    for (sum, value) in sums.iter_mut().zip(color) {
                        *sum += u64::from(value);
                    }
                    count += 1;
                }
            }
        }

        let empty_color = if count == 0 {
            [128, 128, 128, 255]
        } else {
            [
                (sums[0] / count) as u8,
                (sums[1] / count) as u8,
                (sums[2] / count) as u8,
                255,
            ]
        };

        Self {
            placements: Vec::new(),
            initial: initial.clone(),
            half,
            empty_color,
        }
    }

    /// Records a patch copy
    pub fn record_placement(&mut self, iteration: usize, target: [usize; 2], exemplar: [usize; 2]) {
        self.placements.push(PatchPlacement {
            iteration,
            target,
            exemplar,
        });
    }

    /// Returns all recorded placements
    pub fn placements(&self) -> &[PatchPlacement] {
        &self.placements
    }

    /// Returns the total number of placements
    pub const fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Color used for pixels that are still holes
    pub const fn empty_color(&self) -> [u8; 4] {
        self.empty_color
    }

    /// Rebuild the state after the first `steps` placements
    pub fn replay(&self, steps: usize) -> FillState {
        let mut state = self.initial.clone();
        for placement in self.placements.iter().take(steps) {
            composite_patch(&mut state, placement.target, placement.exemplar, 1.0, self.half);
        }
        state
    }

    /// Render a state with holes painted in the empty color
    pub fn render(&self, state: &FillState) -> RgbaImage {
        RgbaImage::from_fn(state.width() as u32, state.height() as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            if state.region.is_known(x, y) {
                let [r, g, b] = state.canvas.pixel(x, y).unwrap_or([0, 0, 0]);
                Rgba([r, g, b, 255])
            } else {
                Rgba(self.empty_color)
            }
        })
    }

    /// Export the fill progression as a GIF with automatic frame skipping
    ///
    /// If the requested frame delay is shorter than viewers support, frames are
    /// dropped so the apparent speed is kept. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No placements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.placements.is_empty() {
            return Err(InpaintError::InvalidInput {
                reason: "No patch placements captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| InpaintError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| InpaintError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| InpaintError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut state = self.initial.clone();
        let mut frames = vec![Self::frame(self.render(&state), delay_ms)];

        for (index, placement) in self.placements.iter().enumerate() {
            composite_patch(&mut state, placement.target, placement.exemplar, 1.0, self.half);
            if (index + 1) % skip_factor == 0 {
                frames.push(Self::frame(self.render(&state), delay_ms));
            }
        }

        if self.placements.len() % skip_factor != 0 {
            frames.push(Self::frame(self.render(&state), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(self.render(&state), delay_ms.saturating_mul(FINAL_FRAME_HOLD)));

        frames
    }

    fn frame(image: RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(image, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
