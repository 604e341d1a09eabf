//! Batch processing over an input directory
//!
//! One style snapshot is applied to every supported image in the input
//! directory. Per-file failures are logged and skipped; a single bad file
//! never aborts the run. Output files are written only after compositing
//! succeeds, so a failed item leaves no artifact behind.

use std::path::{Path, PathBuf};

use tapezier_core::directory::{DirectoryError, ensure_output_dir, scan_images};
use tapezier_types::OutputNaming;

use crate::compositor;
use crate::error::RenderError;
use crate::overlays::Overlay;
use crate::renderer::Renderer;

/// Progress notification for one batch item, emitted before the item is
/// processed.
#[derive(Debug, Clone)]
pub struct BatchProgress<'a> {
    /// 1-based index of the current item.
    pub current: usize,
    pub total: usize,
    pub path: &'a Path,
}

/// Outcome of a completed batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub outputs: Vec<PathBuf>,
    /// Inputs skipped after a logged per-file failure.
    pub failed: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.outputs.len()
    }
}

/// Runs one overlay over every image in a directory
pub struct BatchRunner {
    input_dir: PathBuf,
    output_dir: PathBuf,
    naming: OutputNaming,
}

impl BatchRunner {
    /// Create a runner. `naming` typically comes from the overlay kind's
    /// [`Overlay::default_naming`].
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        naming: OutputNaming,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            naming,
        }
    }

    /// Process every supported image in the input directory.
    ///
    /// Directory-level failures (unreadable input dir, no images,
    /// uncreatable output dir) abort before any item is touched;
    /// everything after that is per-item and isolated.
    pub fn run<O: Overlay>(
        &self,
        renderer: &mut Renderer,
        overlay: &O,
        mut progress: impl FnMut(BatchProgress<'_>),
    ) -> Result<BatchReport, DirectoryError> {
        let files = scan_images(&self.input_dir)?;
        ensure_output_dir(&self.output_dir)?;

        let total = files.len();
        let mut report = BatchReport::default();

        for (index, path) in files.iter().enumerate() {
            progress(BatchProgress {
                current: index + 1,
                total,
                path,
            });

            match self.process_one(renderer, overlay, path) {
                Ok(output) => report.outputs.push(output),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping image");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            processed = report.processed(),
            failed = report.failed,
            "batch finished"
        );
        Ok(report)
    }

    fn process_one<O: Overlay>(
        &self,
        renderer: &mut Renderer,
        overlay: &O,
        path: &Path,
    ) -> Result<PathBuf, RenderError> {
        let base = compositor::load_rgba(path)?;
        let composited = overlay.apply(renderer, &base)?;

        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = self.output_dir.join(self.naming.apply(&basename));

        compositor::save_image(&composited, &output)?;
        Ok(output)
    }
}
