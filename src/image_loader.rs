//! Image decoding into RGBA8 rasters
//!
//! The extractor works on decoded `RgbaImage` buffers. This module is the
//! single place where encoded input (files or in-memory bytes) and raw
//! caller-owned buffers become rasters; every failure here is reported as
//! `ExtractionError::DecodeError`.
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, WebP, GIF (first frame), BMP.

use image::{ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::constants::CHANNELS;
use crate::error::{ExtractionError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    /// GIF image (first frame only)
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::WebP),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Decode an in-memory encoded image into RGBA8
///
/// The format is sniffed from the leading bytes.
///
/// # Errors
///
/// Returns `ExtractionError::DecodeError` if the bytes are not a
/// recognizable image or decoding fails.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ExtractionError::decode("Failed to read image bytes", e))?;

    if reader.format().is_none() {
        return Err(ExtractionError::malformed(format!(
            "Unrecognized image format ({} bytes)",
            bytes.len()
        )));
    }

    let img = reader
        .decode()
        .map_err(|e| ExtractionError::decode("Failed to decode image bytes", e))?;

    Ok(img.to_rgba8())
}

/// Load an image from disk and decode it into RGBA8
///
/// The format is sniffed from the file contents; the extension is only
/// consulted when the contents are not recognized.
///
/// # Errors
///
/// Returns `ExtractionError::DecodeError` if:
/// - File cannot be opened
/// - Format is not supported
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use dominant_colors::image_loader::load_image;
/// use std::path::Path;
///
/// let raster = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", raster.width(), raster.height());
/// # Ok::<(), dominant_colors::ExtractionError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let mut reader = ImageReader::open(path)
        .map_err(|e| {
            ExtractionError::decode(format!("Failed to open image file: {}", path.display()), e)
        })?
        .with_guessed_format()
        .map_err(|e| {
            ExtractionError::decode(format!("Failed to read image file: {}", path.display()), e)
        })?;

    // contents win over a misleading extension
    if reader.format().is_none() {
        match ImageFormat::from_extension(path) {
            Some(format) => reader.set_format(format.into()),
            None => {
                return Err(ExtractionError::malformed(format!(
                    "Unrecognized image format: {}",
                    path.display()
                )))
            }
        }
    }

    let img = reader.decode().map_err(|e| {
        ExtractionError::decode(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgba8())
}

/// Adopt a caller-owned RGBA8 buffer as a raster
///
/// # Errors
///
/// Returns `ExtractionError::DecodeError` if `data.len()` is not
/// `width * height * 4`.
pub fn from_raw_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS));

    if expected != Some(data.len()) {
        log::warn!(
            "rejecting raw buffer: {}x{} RGBA needs {:?} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        );
        return Err(ExtractionError::malformed(format!(
            "Raw buffer of {} bytes does not match {}x{} RGBA",
            data.len(),
            width,
            height
        )));
    }

    RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        ExtractionError::malformed(format!("Raw buffer rejected for {}x{} RGBA", width, height))
    })
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "webp", "gif", "bmp"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
