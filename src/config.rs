//! Configuration types for a processing run.
//!
//! All batch behaviour is controlled through [`ProcessConfig`], built via
//! its [`ProcessConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! The rasterization zoom is an explicit field here rather than a
//! process-wide constant: two batches with different quality requirements
//! can run back to back without touching shared state.

use crate::error::ProcessError;
use serde::{Deserialize, Serialize};

/// Configuration for one processing run.
///
/// Built via [`ProcessConfig::builder()`] or using
/// [`ProcessConfig::default()`].
///
/// # Example
/// ```rust
/// use sixup::{LayoutMode, ProcessConfig};
///
/// let config = ProcessConfig::builder()
///     .zoom(2.0)
///     .invert_colors(false)
///     .layout(LayoutMode::Original)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Linear magnification applied when rasterizing each page. Default: 4.0.
    ///
    /// Pages are rendered at `zoom ×` their PDF point dimensions, so a
    /// 595 × 842 pt A4 page becomes a 2381 × 3366 px bitmap at the default.
    /// Rendering oversized and downscaling with Lanczos into the output
    /// cells is what keeps small text legible at six pages per sheet.
    pub zoom: f32,

    /// Photometrically invert every rasterized page (black ↔ white). Default: true.
    pub invert_colors: bool,

    /// Combine all inputs into one output document. Default: true.
    ///
    /// When false, each input file produces its own output document, in
    /// input order, containing exactly that file's pages.
    pub merge_files: bool,

    /// Output page layout. Default: [`LayoutMode::Grid3x2`].
    pub layout: LayoutMode,

    /// PDF user password for encrypted inputs, applied to every input.
    pub password: Option<String>,

    /// Number of input documents rasterized concurrently. Default: 1.
    ///
    /// Rasterization of independent inputs has no shared state, so they may
    /// overlap. Results are collected in input order regardless of which
    /// document finishes first, so the output is byte-identical to a
    /// sequential run.
    pub concurrency: usize,
}

/// How rasterized pages are placed onto output pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Landscape sheets partitioned into a 2-column × 3-row grid of six
    /// cells, filled left-to-right, top-to-bottom. (default)
    #[default]
    Grid3x2,
    /// One page image per output page, centered on portrait A4.
    Original,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            zoom: 4.0,
            invert_colors: true,
            merge_files: true,
            layout: LayoutMode::default(),
            password: None,
            concurrency: 1,
        }
    }
}

impl ProcessConfig {
    /// Create a new builder for `ProcessConfig`.
    pub fn builder() -> ProcessConfigBuilder {
        ProcessConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ProcessConfig`].
#[derive(Debug)]
pub struct ProcessConfigBuilder {
    config: ProcessConfig,
}

impl ProcessConfigBuilder {
    pub fn zoom(mut self, zoom: f32) -> Self {
        self.config.zoom = zoom.clamp(1.0, 8.0);
        self
    }

    pub fn invert_colors(mut self, v: bool) -> Self {
        self.config.invert_colors = v;
        self
    }

    pub fn merge_files(mut self, v: bool) -> Self {
        self.config.merge_files = v;
        self
    }

    pub fn layout(mut self, layout: LayoutMode) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ProcessConfig, ProcessError> {
        let c = &self.config;
        if !c.zoom.is_finite() || c.zoom <= 0.0 {
            return Err(ProcessError::InvalidConfig(format!(
                "zoom must be a positive number, got {}",
                c.zoom
            )));
        }
        if c.concurrency == 0 {
            return Err(ProcessError::InvalidConfig(
                "concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
