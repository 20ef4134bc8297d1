//! Color representation utilities
//!
//! Provides the encodings a dominant color is reported in:
//! - Packed 24-bit keys used for frequency counting
//! - Lowercase `#rrggbb` hex strings
//! - CSS `rgb(r, g, b)` strings
//! - Perceptual Lab/LCh views (D65) for callers that compare swatches

use palette::{FromColor, Lab, Lch, Srgb};

use crate::{ExtractionError, Result};

/// Stateless converter between color encodings
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter
    pub fn new() -> Self {
        Self
    }

    /// Pack RGB channels into a 24-bit key, alpha ignored
    #[inline]
    pub fn pack_rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Unpack a 24-bit key into `[r, g, b]`
    #[inline]
    pub fn unpack_rgb(&self, key: u32) -> [u8; 3] {
        [(key >> 16) as u8, (key >> 8) as u8, key as u8]
    }

    /// Convert RGB channels to a lowercase hex string (e.g. "#ff0000")
    pub fn rgb_to_hex(&self, rgb: [u8; 3]) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    /// Parse a hex color string into RGB channels
    ///
    /// Accepts "#ff0000" or "ff0000", either case.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArgument` if the string is not six
    /// hex digits.
    pub fn hex_to_rgb(&self, hex: &str) -> Result<[u8; 3]> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ExtractionError::invalid_argument("hex", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ExtractionError::invalid_argument("hex", hex))
        };

        Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
    }

    /// Format RGB channels as a CSS color (e.g. "rgb(255, 0, 0)")
    pub fn css_rgb(&self, rgb: [u8; 3]) -> String {
        format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
    }

    /// Convert 8-bit sRGB to CIE Lab (D65)
    pub fn rgb_to_lab(&self, rgb: [u8; 3]) -> Lab {
        let srgb: Srgb = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format();
        Lab::from_color(srgb)
    }

    /// Convert 8-bit sRGB to CIE LCh (D65)
    pub fn rgb_to_lch(&self, rgb: [u8; 3]) -> Lch {
        Lch::from_color(self.rgb_to_lab(rgb))
    }
}
