//! Interactive slicing session state.
//!
//! A [`Session`] owns everything a front end needs between opening an image
//! and saving its pieces: the decoded source (if any), the cut-line set, and
//! the preview scale factor. Front ends stay thin; they translate clicks
//! and key presses into the operations here and display whatever preview
//! comes back.
//!
//! # Lifecycle
//!
//! Opening an image replaces the previous one and clears the cut lines; the
//! scale factor survives. A failed open changes nothing, so the previous
//! image stays usable. Saving normalizes the cut lines against the current
//! image and hands off to the slicer.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cuts::CutLineSet;
use crate::decode::{decode_image, open_image, DecodeError, Raster};
use crate::preview::{render_preview, to_source_y};
use crate::slicer::{slice_and_save, SliceReport};
use crate::{SliceLimits, SlicerConfig};

/// Errors for session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No source image is loaded.
    #[error("No image loaded")]
    NoImage,

    /// Scale factor must be positive and finite.
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),

    /// No output prefix was given and none can be derived.
    #[error("No output prefix given and no source path to derive one from")]
    MissingOutputPrefix,
}

/// What a click on the preview should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Add a cut line at the clicked position.
    AddCut,
    /// Remove cut lines near the clicked position.
    RemoveNear,
}

/// State of one image-slicing session.
#[derive(Debug, Clone)]
pub struct Session {
    source: Option<Raster>,
    source_path: Option<PathBuf>,
    cuts: CutLineSet,
    scale: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            source: None,
            source_path: None,
            cuts: CutLineSet::new(),
            scale: Self::DEFAULT_SCALE,
        }
    }
}

impl Session {
    /// Preview scale factor a fresh session starts with.
    pub const DEFAULT_SCALE: f64 = 0.3;

    /// Amount one zoom step changes the scale factor.
    pub const ZOOM_STEP: f64 = 0.1;

    /// Zooming out is refused once the scale factor is at or below this,
    /// which keeps it positive. Zooming in has no ceiling.
    pub const ZOOM_FLOOR: f64 = 0.15;

    /// Create a session with no image loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an image file, replacing any previously loaded image.
    ///
    /// On success the cut lines are cleared and the scale factor kept. On
    /// failure the session is untouched, so the previous image (and its cut
    /// lines) stay usable.
    pub fn open(&mut self, path: &Path) -> Result<(), DecodeError> {
        let image = open_image(path)?;
        self.install(image, Some(path.to_path_buf()));
        Ok(())
    }

    /// Open an image from an in-memory buffer.
    ///
    /// Same lifecycle as [`open`](Self::open), but the session has no source
    /// path afterwards, so saving requires an explicit output prefix.
    pub fn open_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let image = decode_image(bytes)?;
        self.install(image, None);
        Ok(())
    }

    fn install(&mut self, image: Raster, path: Option<PathBuf>) {
        log::info!("opened {}x{} image", image.width, image.height);
        self.source = Some(image);
        self.source_path = path;
        self.cuts.clear();
    }

    /// The loaded source image, if any.
    pub fn image(&self) -> Option<&Raster> {
        self.source.as_ref()
    }

    /// Path the current image was opened from, if it came from disk.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The current cut positions, raw (unnormalized).
    pub fn cut_lines(&self) -> &[u32] {
        self.cuts.lines()
    }

    /// The current preview scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Render the current preview, or `None` when no image is loaded.
    pub fn preview(&self) -> Option<Raster> {
        let source = self.source.as_ref()?;
        render_preview(source, self.scale, self.cuts.lines()).ok()
    }

    /// Apply a click on the preview at the given preview-space row.
    ///
    /// The position is mapped to source space at the current scale, the cut
    /// set is edited, and the fresh preview returned. Cut edits work even
    /// with no image loaded (the positions are plain numbers until
    /// normalization); the preview is then `None`.
    pub fn preview_click(&mut self, preview_y: u32, action: ClickAction) -> Option<Raster> {
        let source_y = to_source_y(preview_y, self.scale);
        match action {
            ClickAction::AddCut => self.cuts.add(source_y),
            ClickAction::RemoveNear => self
                .cuts
                .remove_near(source_y, CutLineSet::DEFAULT_REMOVE_RADIUS),
        }
        self.preview()
    }

    /// Add a cut line directly in source pixel space.
    ///
    /// For callers that never go through a preview, like the command line.
    pub fn add_cut(&mut self, source_y: u32) {
        self.cuts.add(source_y);
    }

    /// Remove all cut lines and return the fresh preview.
    pub fn clear_cuts(&mut self) -> Option<Raster> {
        self.cuts.clear();
        self.preview()
    }

    /// Set the preview scale factor and return the fresh preview.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidScale` for non-positive or non-finite
    /// factors; the current factor is kept in that case.
    pub fn set_scale(&mut self, factor: f64) -> Result<Option<Raster>, SessionError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SessionError::InvalidScale(factor));
        }
        self.scale = factor;
        Ok(self.preview())
    }

    /// Step the scale factor up by [`ZOOM_STEP`](Self::ZOOM_STEP) and return
    /// the fresh preview. There is no upper bound.
    pub fn zoom_in(&mut self) -> Option<Raster> {
        self.scale += Self::ZOOM_STEP;
        self.preview()
    }

    /// Step the scale factor down by [`ZOOM_STEP`](Self::ZOOM_STEP) and
    /// return the fresh preview. The step is refused once the factor is at
    /// or below [`ZOOM_FLOOR`](Self::ZOOM_FLOOR).
    pub fn zoom_out(&mut self) -> Option<Raster> {
        if self.scale > Self::ZOOM_FLOOR {
            self.scale -= Self::ZOOM_STEP;
        }
        self.preview()
    }

    /// Number of pieces a save would produce right now.
    ///
    /// Normalizes the cut lines against the current image height as a side
    /// effect. Reports 1 when no image is loaded.
    pub fn piece_count(&mut self) -> usize {
        match &self.source {
            Some(image) => {
                let height = image.height;
                self.cuts.normalize(height);
                self.cuts.piece_count()
            }
            None => 1,
        }
    }

    /// Normalize the cut lines and slice the image into files.
    ///
    /// When `output_prefix` is `None`, the prefix is the source path with
    /// its extension removed, so `photos/tall.png` produces
    /// `photos/tall_part_01.jpg` and so on.
    ///
    /// Blocks until every band is processed; callers that need to stay
    /// responsive run this off their main thread.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoImage` when nothing is loaded, or
    /// `SessionError::MissingOutputPrefix` when no prefix is given and the
    /// image did not come from disk. Per-band failures do not fail the
    /// call; they are reported inside the returned [`SliceReport`].
    pub fn save(
        &mut self,
        limits: &SliceLimits,
        config: &SlicerConfig,
        output_prefix: Option<&Path>,
    ) -> Result<SliceReport, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoImage)?;

        let prefix = match output_prefix {
            Some(p) => p.to_path_buf(),
            None => self
                .source_path
                .as_ref()
                .map(|p| p.with_extension(""))
                .ok_or(SessionError::MissingOutputPrefix)?,
        };

        self.cuts.normalize(source.height);
        Ok(slice_and_save(
            source,
            self.cuts.lines(),
            limits,
            config,
            &prefix,
        ))
    }
}
