//! Dominant color extraction
//!
//! Ranks the colors of a raster by how often they occur among sampled
//! pixels:
//! - Optional downscale so the longest side fits `downscale_max_size`
//! - Linear scan advancing `sample_stride` channel slots per sample
//! - Pixels with `alpha <= alpha_threshold` are skipped
//! - Exact RGB frequency count, ranked descending, ties by first appearance
//! - Truncation to `max_output_colors`
//!
//! The stride deliberately undersamples: with the default stride of 16 only
//! every 4th pixel is read. Counts are counts of samples, not of pixels.

use image::{imageops, RgbaImage};
use std::borrow::Cow;
use std::path::Path;

use crate::color::{ColorBucket, ColorConverter};
use crate::constants::CHANNELS;
use crate::{image_loader, DominantColor, ExtractionConfig, ExtractionError, Result};

/// Upper bound on bucket slots reserved up front
const MAX_PREALLOCATED_COLORS: usize = 1 << 16;

/// Color extractor implementing sampled frequency ranking
///
/// Holds its validated configuration; cloning is cheap and clones can
/// run on separate threads without coordination.
#[derive(Debug, Clone, Default)]
pub struct ColorExtractor {
    config: ExtractionConfig,
    converter: ColorConverter,
}

impl ColorExtractor {
    /// Create an extractor with the standard parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom parameters
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArgument` if the configuration does
    /// not validate.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            converter: ColorConverter::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the dominant colors of a decoded raster
    ///
    /// # Returns
    ///
    /// At most `max_output_colors` colors, most frequent first. Empty when
    /// the image has no pixels or every sample is below the alpha threshold.
    pub fn extract(&self, image: &RgbaImage) -> Result<Vec<DominantColor>> {
        let (width, height) = image.dimensions();
        log::trace!(
            "extracting from {}x{} (stride {}, alpha > {}, top {})",
            width,
            height,
            self.config.sample_stride,
            self.config.alpha_threshold,
            self.config.max_output_colors
        );

        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let prepared = self.prepare(image);
        let bucket = self.sample(prepared.as_raw());

        log::debug!(
            "sampled {} opaque pixels into {} distinct colors",
            bucket.total(),
            bucket.len()
        );

        Ok(self.rank(bucket))
    }

    /// Decode encoded bytes and extract their dominant colors
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<Vec<DominantColor>> {
        let image = image_loader::decode_bytes(bytes)?;
        self.extract(&image)
    }

    /// Load an image file and extract its dominant colors
    pub fn extract_path(&self, path: &Path) -> Result<Vec<DominantColor>> {
        let image = image_loader::load_image(path)?;
        self.extract(&image)
    }

    /// Extract on tokio's blocking pool so the calling task stays responsive
    ///
    /// Must be awaited inside a tokio runtime. Dropping the future abandons
    /// the result; nothing partial is ever returned.
    pub async fn extract_async(&self, image: RgbaImage) -> Result<Vec<DominantColor>> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&image))
            .await
            .map_err(|e| ExtractionError::TaskFailed {
                message: e.to_string(),
            })?
    }

    /// Decode and extract on tokio's blocking pool
    pub async fn extract_bytes_async(&self, bytes: Vec<u8>) -> Result<Vec<DominantColor>> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract_bytes(&bytes))
            .await
            .map_err(|e| ExtractionError::TaskFailed {
                message: e.to_string(),
            })?
    }

    /// Downscale when the image exceeds the configured bound
    fn prepare<'a>(&self, image: &'a RgbaImage) -> Cow<'a, RgbaImage> {
        let (width, height) = image.dimensions();
        let target = self
            .config
            .downscale_max_size
            .and_then(|max_size| downscaled_dimensions(width, height, max_size));

        match target {
            Some((new_width, new_height)) => {
                log::debug!(
                    "downscaling {}x{} to {}x{} before sampling",
                    width,
                    height,
                    new_width,
                    new_height
                );
                let filter = self.config.resample_filter.into();
                if image.pixels().all(|p| p[3] == u8::MAX) {
                    return Cow::Owned(imageops::resize(image, new_width, new_height, filter));
                }

                // blend in premultiplied space so transparent neighbours
                // do not darken edge colors
                let mut resized =
                    imageops::resize(&premultiplied(image), new_width, new_height, filter);
                unpremultiply(&mut resized);
                Cow::Owned(resized)
            }
            None => Cow::Borrowed(image),
        }
    }

    /// Count qualifying samples, one every `sample_stride` channel slots
    fn sample(&self, raw: &[u8]) -> ColorBucket {
        let step = self.config.sample_stride / CHANNELS;
        let expected = raw.len() / self.config.sample_stride + 1;
        let mut bucket = ColorBucket::with_capacity(expected.min(MAX_PREALLOCATED_COLORS));

        for pixel in raw.chunks_exact(CHANNELS).step_by(step) {
            if pixel[3] <= self.config.alpha_threshold {
                continue;
            }
            bucket.record(self.converter.pack_rgb(pixel[0], pixel[1], pixel[2]));
        }

        bucket
    }

    /// Turn counts into the ranked output records
    fn rank(&self, bucket: ColorBucket) -> Vec<DominantColor> {
        bucket
            .into_ranked(self.config.max_output_colors)
            .into_iter()
            .map(|(key, count)| DominantColor::new(self.converter.unpack_rgb(key), count))
            .collect()
    }
}

/// Target size for the pre-sampling downscale
///
/// Returns `None` when the image already fits within `max_size`. Otherwise
/// scales by `min(max_size / width, max_size / height)`: the longest side
/// becomes `max_size`, the other is truncated and kept at least one pixel.
pub fn downscaled_dimensions(width: u32, height: u32, max_size: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if width == 0 || height == 0 || longest <= max_size {
        return None;
    }

    // integer math keeps the long side exact
    let scale = |side: u32| {
        ((u64::from(side) * u64::from(max_size)) / u64::from(longest)).max(1) as u32
    };

    Some((scale(width), scale(height)))
}

/// Copy of `image` with color channels scaled by alpha
fn premultiplied(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let alpha = u32::from(pixel[3]);
        for channel in &mut pixel.0[..3] {
            *channel = ((u32::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
    out
}

/// Undo [`premultiplied`] in place; fully transparent pixels become black
fn unpremultiply(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = u32::from(pixel[3]);
        for channel in &mut pixel.0[..3] {
            *channel = match alpha {
                0 => 0,
                _ => ((u32::from(*channel) * 255 + alpha / 2) / alpha).min(255) as u8,
            };
        }
    }
}
