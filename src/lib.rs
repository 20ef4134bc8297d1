//! # Dominant Colors
//!
//! A Rust crate for finding the most frequent colors of a raster image.
//!
//! This library ranks colors by:
//! - Optionally downscaling the image so its longest side fits a bound
//! - Sampling pixels at a fixed stride
//! - Skipping pixels at or below an alpha threshold
//! - Counting exact RGB occurrences and returning the top N
//!
//! ## Example
//!
//! ```rust,no_run
//! use dominant_colors::{extract_from_bytes, ExtractionConfig};
//!
//! let bytes = std::fs::read("photo.png").expect("readable file");
//! for color in extract_from_bytes(&bytes, &ExtractionConfig::default())? {
//!     println!("{} {} x{}", color.hex, color.css_rgb(), color.count);
//! }
//! # Ok::<(), dominant_colors::ExtractionError>(())
//! ```

use image::RgbaImage;
use palette::{Lab, Lch};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;

pub use color::ColorExtractor;
pub use config::{ExtractionConfig, ResampleFilter};
pub use error::{ExtractionError, Result};

use color::ColorConverter;

/// One ranked color with its sample count
///
/// Serializes as `{"hex": "#rrggbb", "rgb": [r, g, b], "count": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DominantColor {
    /// Lowercase hexadecimal representation ("#rrggbb")
    pub hex: String,
    /// Red, green and blue channels
    pub rgb: [u8; 3],
    /// Number of sampled pixels with this exact color
    pub count: usize,
}

impl DominantColor {
    /// Build a record for `rgb` seen `count` times
    pub fn new(rgb: [u8; 3], count: usize) -> Self {
        Self {
            hex: ColorConverter::new().rgb_to_hex(rgb),
            rgb,
            count,
        }
    }

    /// CSS representation, e.g. "rgb(255, 0, 0)"
    pub fn css_rgb(&self) -> String {
        ColorConverter::new().css_rgb(self.rgb)
    }

    /// CIE Lab coordinates (D65)
    pub fn lab(&self) -> Lab {
        ColorConverter::new().rgb_to_lab(self.rgb)
    }

    /// CIE LCh coordinates (D65)
    pub fn lch(&self) -> Lch {
        ColorConverter::new().rgb_to_lch(self.rgb)
    }
}

impl fmt::Display for DominantColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Extract the dominant colors of a decoded raster
///
/// This is the main entry point for callers that already hold RGBA8 pixels.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidArgument` if `config` does not validate.
pub fn extract_dominant_colors(
    image: &RgbaImage,
    config: &ExtractionConfig,
) -> Result<Vec<DominantColor>> {
    ColorExtractor::with_config(config.clone())?.extract(image)
}

/// Decode encoded image bytes and extract their dominant colors
///
/// # Errors
///
/// Returns `ExtractionError` if:
/// - `config` does not validate
/// - The bytes cannot be decoded as an image
pub fn extract_from_bytes(bytes: &[u8], config: &ExtractionConfig) -> Result<Vec<DominantColor>> {
    ColorExtractor::with_config(config.clone())?.extract_bytes(bytes)
}
