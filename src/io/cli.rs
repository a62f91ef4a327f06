//! Command-line interface for batch filling of masked PNG files

use crate::algorithm::executor::FillSession;
use crate::io::configuration::{
    DATA_TERM_EPSILON, FillConfig, MASK_SUFFIX, OUTPUT_SUFFIX, PATCH_SIZE, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, file_system, invalid_input, invalid_parameter};
use crate::io::image::{export_image, load_rgb};
use crate::io::logging;
use crate::io::progress::ProgressManager;
use crate::math::convolution::BoundaryMode;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Boundary handling accepted on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BoundaryArg {
    /// Indices wrap around to the opposite edge
    #[default]
    Wrap,
    /// Indices clamp to the nearest edge pixel
    Clamp,
    /// Indices mirror at the edge
    Reflect,
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Wrap => Self::Wrap,
            BoundaryArg::Clamp => Self::Clamp,
            BoundaryArg::Reflect => Self::Reflect,
        }
    }
}

#[derive(Parser)]
#[command(name = "regionfill")]
#[command(
    author,
    version,
    about = "Fill masked regions of images with exemplar patches"
)]
/// Command-line arguments for the region filling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Mask for a single-file target (defaults to <input>_mask.png)
    #[arg(short, long, value_name = "PATH")]
    pub mask: Option<PathBuf>,

    /// Side length of the square fill patch (odd)
    #[arg(short, long, default_value_t = PATCH_SIZE)]
    pub patch_size: usize,

    /// Boundary handling for the derivative and front filters
    #[arg(short, long, value_enum, default_value_t = BoundaryArg::Wrap)]
    pub boundary: BoundaryArg,

    /// Additive floor of the data term
    #[arg(short, long, default_value_t = DATA_TERM_EPSILON)]
    pub epsilon: f64,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output and non-error logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log per-file summaries
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log specification matching the verbosity flags
    pub const fn log_level(&self) -> &'static str {
        logging::log_level(self.quiet, self.verbose)
    }

    /// Fill parameters taken from the arguments
    pub fn fill_config(&self) -> FillConfig {
        FillConfig {
            patch_size: self.patch_size,
            data_term_epsilon: self.epsilon,
            boundary: self.boundary.into(),
        }
    }
}

/// An input image together with its mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillJob {
    /// Image to fill
    pub input: PathBuf,
    /// Mask marking the hole in black
    pub mask: PathBuf,
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns an error if parameter or target validation fails, or if any
    /// file cannot be loaded, filled or written
    pub fn process(&mut self) -> Result<usize> {
        self.cli.fill_config().validate()?;
        let jobs = self.collect_jobs()?;

        if jobs.is_empty() {
            log::warn!("Nothing to fill in {}", self.cli.target.display());
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        for (index, job) in jobs.iter().enumerate() {
            self.process_file(job, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(jobs.len())
    }

    /// Resolve the target into the jobs to run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is neither a PNG file nor a directory
    /// - `--mask` is combined with a directory target
    /// - The directory cannot be read
    pub fn collect_jobs(&self) -> Result<Vec<FillJob>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_input(&"Target file must be a PNG image"));
            }
            let mask = self
                .cli
                .mask
                .clone()
                .unwrap_or_else(|| mask_path(target));
            Ok(self.job_for(target, mask).into_iter().collect())
        } else if target.is_dir() {
            if let Some(ref mask) = self.cli.mask {
                return Err(invalid_parameter(
                    "mask",
                    &mask.display(),
                    &"an explicit mask requires a single file target",
                ));
            }

            let entries =
                std::fs::read_dir(target).map_err(file_system(target, "read directory"))?;

            let mut jobs = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(file_system(target, "read directory entry"))?
                    .path();
                if is_png(&path) && is_fill_input(&path) {
                    let mask = mask_path(&path);
                    if let Some(job) = self.job_for(&path, mask) {
                        jobs.push(job);
                    }
                }
            }
            jobs.sort_by(|a, b| a.input.cmp(&b.input));
            Ok(jobs)
        } else {
            Err(invalid_input(&"Target must be a PNG file or directory"))
        }
    }

    fn job_for(&self, input: &Path, mask: PathBuf) -> Option<FillJob> {
        if self.cli.skip_existing() && output_path(input).exists() {
            log::info!("Skipping: {} (output exists)", input.display());
            return None;
        }

        if !mask.is_file() {
            log::warn!(
                "Skipping: {} (no mask at {})",
                input.display(),
                mask.display()
            );
            return None;
        }

        Some(FillJob {
            input: input.to_path_buf(),
            mask,
        })
    }

    fn process_file(&mut self, job: &FillJob, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let image = load_rgb(&job.input)?;
        let mask = load_rgb(&job.mask)?;
        let mut session = FillSession::new(&image, &mask, self.cli.fill_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, &job.input, session.initial_hole_count());
        }

        if self.cli.visualize {
            session.enable_visualization();
        }

        let progress = &mut self.progress_manager;
        let iterations = session.run_with(|report| {
            if let Some(pm) = progress.as_mut() {
                pm.update_remaining(index, report.remaining);
            }
        })?;

        if self.cli.visualize && iterations > 0 {
            session.export_visualization(&visualization_path(&job.input))?;
        }

        let output = output_path(&job.input);
        export_image(&session.into_image()?, &output)?;

        log::info!(
            "Filled {} in {iterations} iterations ({:.2?}) -> {}",
            job.input.display(),
            start_time.elapsed(),
            output.display()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

/// Whether a PNG in a target directory is an image to fill
///
/// Masks, filled outputs and visualization outputs are not.
pub fn is_fill_input(path: &Path) -> bool {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    ![MASK_SUFFIX, OUTPUT_SUFFIX, VISUALIZATION_SUFFIX]
        .iter()
        .any(|suffix| stem.ends_with(suffix))
}

fn sibling(input_path: &Path, name: String) -> PathBuf {
    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Default mask location: `<stem>_mask.png` next to the input
pub fn mask_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    sibling(
        input_path,
        format!("{}{MASK_SUFFIX}.png", stem.to_string_lossy()),
    )
}

/// Output location: `<stem>_filled.<ext>` next to the input
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = input_path.extension().unwrap_or_default();
    sibling(
        input_path,
        format!(
            "{}{OUTPUT_SUFFIX}.{}",
            stem.to_string_lossy(),
            extension.to_string_lossy()
        ),
    )
}

/// Animation location: `<stem>_fill.gif` next to the input
pub fn visualization_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    sibling(
        input_path,
        format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy()),
    )
}
