//! Default extraction parameters
//!
//! The source tool shipped two variants of the extractor with different
//! tuning. Both are kept here so callers can pick either explicitly.

/// Number of channels in an RGBA8 raster
pub const CHANNELS: usize = 4;

/// Default parameters: downscaled thumbnail, every 4th pixel sampled
pub mod standard {
    /// Maximum number of colors returned
    pub const MAX_OUTPUT_COLORS: usize = 10;

    /// Channel slots advanced between samples (every 4th pixel)
    pub const SAMPLE_STRIDE: usize = 16;

    /// Pixels with alpha at or below this value are skipped
    pub const ALPHA_THRESHOLD: u8 = 128;

    /// Longest side of the thumbnail sampled instead of the full image
    pub const DOWNSCALE_MAX_SIZE: u32 = 100;
}

/// Full-resolution variant: no downscale, every 10th pixel sampled
pub mod full_resolution {
    /// Maximum number of colors returned
    pub const MAX_OUTPUT_COLORS: usize = 12;

    /// Channel slots advanced between samples (every 10th pixel)
    pub const SAMPLE_STRIDE: usize = 40;

    /// Pixels with alpha below 128 are skipped
    pub const ALPHA_THRESHOLD: u8 = 127;
}
