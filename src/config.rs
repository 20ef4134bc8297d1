//! Configuration for the dominant color extraction pipeline.
//!
//! All tunable parameters live in [`ExtractionConfig`]. Two presets mirror
//! the tunings the extractor has historically shipped with; neither is more
//! correct than the other, so callers choose.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use dominant_colors::ExtractionConfig;
//! use std::path::Path;
//!
//! // Load from file (missing fields fall back to defaults)
//! let config = ExtractionConfig::from_json_file(Path::new("extraction.json"))?;
//!
//! // Or use a preset
//! let config = ExtractionConfig::full_resolution();
//! # Ok::<(), dominant_colors::ExtractionError>(())
//! ```

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{full_resolution, standard, CHANNELS};
use crate::{ExtractionError, Result};

/// Resampling filter used when the image is downscaled before sampling
///
/// Images with any non-opaque pixel are resized with premultiplied alpha,
/// so transparent areas do not bleed dark fringes into their neighbours.
/// Filters other than `Nearest` still blend adjacent opaque colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbour, never introduces new colors
    Nearest,
    /// Bilinear
    #[default]
    Triangle,
    /// Cubic
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Extraction parameters.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum number of colors returned (at least 1)
    pub max_output_colors: usize,

    /// Channel slots advanced between samples.
    /// Must be a positive multiple of 4; 4 samples every pixel.
    pub sample_stride: usize,

    /// Pixels with alpha at or below this value are not counted
    pub alpha_threshold: u8,

    /// Longest side the image is reduced to before sampling.
    /// `None` samples the image at full resolution.
    pub downscale_max_size: Option<u32>,

    /// Filter used for the downscale
    pub resample_filter: ResampleFilter,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExtractionConfig {
    /// Thumbnail preset: downscale to 100px, every 4th pixel, top 10
    pub fn standard() -> Self {
        Self {
            max_output_colors: standard::MAX_OUTPUT_COLORS,
            sample_stride: standard::SAMPLE_STRIDE,
            alpha_threshold: standard::ALPHA_THRESHOLD,
            downscale_max_size: Some(standard::DOWNSCALE_MAX_SIZE),
            resample_filter: ResampleFilter::default(),
        }
    }

    /// Full-resolution preset: no downscale, every 10th pixel, top 12
    pub fn full_resolution() -> Self {
        Self {
            max_output_colors: full_resolution::MAX_OUTPUT_COLORS,
            sample_stride: full_resolution::SAMPLE_STRIDE,
            alpha_threshold: full_resolution::ALPHA_THRESHOLD,
            downscale_max_size: None,
            resample_filter: ResampleFilter::default(),
        }
    }

    /// Set the output cap
    pub fn with_max_output_colors(mut self, max_output_colors: usize) -> Self {
        self.max_output_colors = max_output_colors;
        self
    }

    /// Set the stride in channel slots
    pub fn with_sample_stride(mut self, sample_stride: usize) -> Self {
        self.sample_stride = sample_stride;
        self
    }

    /// Sample one pixel out of every `pixels`
    pub fn with_pixel_step(self, pixels: usize) -> Self {
        self.with_sample_stride(pixels.saturating_mul(CHANNELS))
    }

    /// Set the alpha threshold
    pub fn with_alpha_threshold(mut self, alpha_threshold: u8) -> Self {
        self.alpha_threshold = alpha_threshold;
        self
    }

    /// Set or disable the pre-sampling downscale
    pub fn with_downscale(mut self, max_size: Option<u32>) -> Self {
        self.downscale_max_size = max_size;
        self
    }

    /// Set the resampling filter
    pub fn with_resample_filter(mut self, filter: ResampleFilter) -> Self {
        self.resample_filter = filter;
        self
    }

    /// Check every parameter is in range
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArgument` if:
    /// - `max_output_colors` is zero
    /// - `sample_stride` is zero or not a whole number of pixels
    /// - `downscale_max_size` is `Some(0)`
    pub fn validate(&self) -> Result<()> {
        if self.max_output_colors == 0 {
            return Err(ExtractionError::invalid_argument(
                "max_output_colors",
                self.max_output_colors,
            ));
        }
        if self.sample_stride == 0 || self.sample_stride % CHANNELS != 0 {
            return Err(ExtractionError::invalid_argument(
                "sample_stride",
                self.sample_stride,
            ));
        }
        if self.downscale_max_size == Some(0) {
            return Err(ExtractionError::invalid_argument("downscale_max_size", 0));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config = Self::from_json_str(&content)?;
        log::debug!("loaded extraction config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ExtractionError::config("Invalid extraction config JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ExtractionError::config("Failed to serialize config", e))?;
        std::fs::write(path, json).map_err(|e| {
            ExtractionError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
