use crate::{
    algorithm::compositor::composite_patch,
    algorithm::exemplar::{ExemplarMatch, find_exemplar},
    algorithm::front::FillFront,
    algorithm::priority::{PriorityTerms, score_front, select_target},
    io::configuration::FillConfig,
    io::error::{ErrorContext, InpaintError, Result, WithContext},
    io::visualization::VisualizationCapture,
    math::gradient::MaskNormals,
    spatial::state::FillState,
};
use image::RgbImage;
use std::path::Path;

/// What one fill iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// 1-based iteration number
    pub iteration: usize,
    /// Number of front pixels scored this iteration
    pub front_size: usize,
    /// The front pixel that won the priority contest
    pub target: PriorityTerms,
    /// The patch copied into the target
    pub exemplar: ExemplarMatch,
    /// Cells that went from hole to known
    pub newly_known: usize,
    /// Hole pixels left after this iteration
    pub remaining: usize,
}

/// Exemplar-based region filling run over one image
///
/// Owns every mutable field of the fill. Each iteration rebuilds the fill
/// front, scores it, copies the best-matching exemplar into the winning patch
/// and updates the fields. The run is done once the front is empty.
pub struct FillSession {
    config: FillConfig,
    state: FillState,
    iteration: usize,
    initial_holes: usize,
    finished: bool,
    /// Optional visualization capture
    pub visualization: Option<VisualizationCapture>,
}

impl FillSession {
    /// Validate the inputs and set up all fields
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid (even patch size, bad epsilon)
    /// - Image and mask dimensions differ
    /// - The image has zero area or the mask leaves no known pixel
    pub fn new(image: &RgbImage, mask: &RgbImage, config: FillConfig) -> Result<Self> {
        config.validate()?;
        let state = FillState::initialize(image, mask, &config)?;
        let initial_holes = state.region.hole_count();

        log::debug!(
            "Initialized {}x{} fill with {initial_holes} hole pixels (patch size {})",
            state.width(),
            state.height(),
            config.patch_size
        );

        Ok(Self {
            config,
            state,
            iteration: 0,
            initial_holes,
            finished: false,
            visualization: None,
        })
    }

    /// Access the current fill state
    pub const fn state(&self) -> &FillState {
        &self.state
    }

    /// Access the configuration
    pub const fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Number of iterations that copied a patch
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Hole pixels at the start of the run
    pub const fn initial_hole_count(&self) -> usize {
        self.initial_holes
    }

    /// Hole pixels not yet filled
    pub fn remaining_hole_count(&self) -> usize {
        self.state.region.hole_count()
    }

    /// Whether the fill front has emptied
    pub const fn is_complete(&self) -> bool {
        self.finished
    }

    /// Enable recording of patch copies for a progression GIF
    pub fn enable_visualization(&mut self) {
        self.visualization = Some(VisualizationCapture::new(
            &self.state,
            self.config.half_patch(),
        ));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &Path) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(InpaintError::InvalidParameter {
                    parameter: "visualization",
                    value: "disabled".to_string(),
                    reason: "Visualization was not enabled for this run".to_string(),
                })
            },
            |viz| viz.export_gif(output_path, crate::io::configuration::GIF_FRAME_DELAY_MS),
        )
    }

    /// Execute a single iteration of the fill
    ///
    /// Returns `Ok(true)` when a patch was copied and `Ok(false)` once the
    /// front is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if no admissible exemplar exists for the selected target
    pub fn execute_iteration(&mut self) -> Result<bool> {
        Ok(self.run_iteration()?.is_some())
    }

    /// Run a single iteration and describe what it did
    ///
    /// # Errors
    ///
    /// Returns an error if no admissible exemplar exists for the selected target
    pub fn run_iteration(&mut self) -> Result<Option<IterationReport>> {
        if self.finished {
            return Ok(None);
        }

        // Phase 1: rebuild the fill front, stop when it is gone
        let front = FillFront::detect(&self.state.region, self.config.boundary);
        let Some(target) = self.select_target(&front) else {
            self.finished = true;
            log::info!("Fill complete after {} iterations", self.iteration);
            return Ok(None);
        };

        self.iteration += 1;
        log::debug!(
            "Iteration {}: {} front pixels, {} hole pixels left",
            self.iteration,
            front.len(),
            self.remaining_hole_count()
        );

        // Phase 2: best source patch for the target
        let exemplar = find_exemplar(
            &self.state.canvas,
            &self.state.region,
            target.position,
            self.config.patch_size,
        )
        .with_context(ErrorContext {
            iteration: Some(self.iteration),
            position: Some(target.position),
            operation: Some("exemplar search"),
        })?;

        // Phase 3: copy it in
        let newly_known = composite_patch(
            &mut self.state,
            target.position,
            exemplar.center,
            target.confidence,
            self.config.half_patch(),
        );

        if let Some(ref mut viz) = self.visualization {
            viz.record_placement(self.iteration, target.position, exemplar.center);
        }

        log::trace!(
            "Iteration {}: filled ({}, {}) from ({}, {}), sse {}, priority {:.6}",
            self.iteration,
            target.position[0],
            target.position[1],
            exemplar.center[0],
            exemplar.center[1],
            exemplar.sse,
            target.priority
        );

        Ok(Some(IterationReport {
            iteration: self.iteration,
            front_size: front.len(),
            target,
            exemplar,
            newly_known,
            remaining: self.remaining_hole_count(),
        }))
    }

    /// Score the front and pick the pixel to fill next
    fn select_target(&self, front: &FillFront) -> Option<PriorityTerms> {
        if front.is_empty() {
            return None;
        }
        let normals = MaskNormals::compute(&self.state.region, self.config.boundary);
        let scores = score_front(
            front,
            &self.state.confidence,
            &self.state.isophotes,
            &normals,
            &self.config,
        );
        select_target(&scores)
    }

    /// Iterate until the front is empty
    ///
    /// Returns the number of patches copied.
    ///
    /// # Errors
    ///
    /// Returns an error if any iteration fails to find an exemplar
    pub fn run(&mut self) -> Result<usize> {
        self.run_with(|_| {})
    }

    /// Iterate until the front is empty, reporting every iteration to `observer`
    ///
    /// # Errors
    ///
    /// Returns an error if any iteration fails to find an exemplar
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<usize>
    where
        F: FnMut(&IterationReport),
    {
        while let Some(report) = self.run_iteration()? {
            observer(&report);
        }
        Ok(self.iteration)
    }

    /// Consume the session and return the filled image
    ///
    /// # Errors
    ///
    /// Returns an error if the front has not emptied yet
    pub fn into_image(self) -> Result<RgbImage> {
        if !self.finished {
            return Err(InpaintError::FillIncomplete {
                remaining: self.remaining_hole_count(),
            });
        }
        Ok(self.state.canvas.to_image())
    }
}

/// Fill every hole pixel of `image` marked black in `mask`
///
/// Either the complete image or an error is returned; intermediate canvases
/// are never exposed.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - Image and mask dimensions differ
/// - The image has zero area or the mask leaves no known pixel
/// - Some iteration finds no admissible exemplar
pub fn inpaint(image: &RgbImage, mask: &RgbImage, config: FillConfig) -> Result<RgbImage> {
    let mut session = FillSession::new(image, mask, config)?;
    session.run()?;
    session.into_image()
}

/// Any whole-image hole filling method
///
/// Lets alternative fillers (such as a fast-marching one) stand in for the
/// exemplar method.
pub trait InpaintMethod {
    /// Fill the hole pixels marked black in `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if the method cannot produce a complete image
    fn inpaint(&self, image: &RgbImage, mask: &RgbImage) -> Result<RgbImage>;
}

/// The exemplar-based method as an [`InpaintMethod`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExemplarInpainter {
    /// Fill parameters
    pub config: FillConfig,
}

impl ExemplarInpainter {
    /// Method with the given parameters
    pub const fn new(config: FillConfig) -> Self {
        Self { config }
    }
}

impl InpaintMethod for ExemplarInpainter {
    fn inpaint(&self, image: &RgbImage, mask: &RgbImage) -> Result<RgbImage> {
        inpaint(image, mask, self.config)
    }
}
