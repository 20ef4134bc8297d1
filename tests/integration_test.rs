//! Integration tests for the dominant color extraction pipeline
//!
//! These tests exercise the public API end to end:
//! - Decoding encoded bytes and files
//! - Sampling, alpha filtering and ranking
//! - Error handling for undecodable input and bad parameters
//! - The background (async) entry points
//! - Properties that must hold for every input (proptest)

use dominant_colors::{
    extract_dominant_colors, extract_from_bytes, image_loader, ColorExtractor, DominantColor,
    ExtractionConfig, ExtractionError, ResampleFilter,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use proptest::prelude::*;
use std::io::Cursor;
use std::path::Path;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

/// One sample per pixel, full resolution
fn every_pixel() -> ExtractionConfig {
    ExtractionConfig::default()
        .with_pixel_step(1)
        .with_downscale(None)
}

fn two_by_two() -> RgbaImage {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, Rgba([0, 255, 0, 255]));
    img.put_pixel(1, 1, Rgba([0, 0, 0, 50]));
    img
}

// ============================================================================
// End-to-End Extraction
// ============================================================================

#[test]
fn test_two_by_two_from_png_bytes() {
    let bytes = encode(two_by_two().into(), ImageFormat::Png);
    let colors = extract_from_bytes(&bytes, &every_pixel().with_alpha_threshold(128)).unwrap();

    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0].hex, "#ff0000");
    assert_eq!(colors[0].rgb, [255, 0, 0]);
    assert_eq!(colors[0].count, 2);
    assert_eq!(colors[1].hex, "#00ff00");
    assert_eq!(colors[1].rgb, [0, 255, 0]);
    assert_eq!(colors[1].count, 1);
}

#[test]
fn test_output_json_field_names() {
    let colors = extract_dominant_colors(&two_by_two(), &every_pixel()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&colors).unwrap();

    assert_eq!(json[0]["hex"], "#ff0000");
    assert_eq!(json[0]["rgb"], serde_json::json!([255, 0, 0]));
    assert_eq!(json[0]["count"], 2);
}

#[test]
fn test_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swatches.png");
    two_by_two().save(&path).unwrap();

    let extractor = ColorExtractor::with_config(every_pixel()).unwrap();
    let colors = extractor.extract_path(&path).unwrap();
    assert_eq!(colors[0], DominantColor::new([255, 0, 0], 2));
}

#[test]
fn test_extract_from_misnamed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, encode(two_by_two().into(), ImageFormat::Png)).unwrap();

    let extractor = ColorExtractor::with_config(every_pixel()).unwrap();
    let colors = extractor.extract_path(&path).unwrap();
    assert_eq!(colors[0], DominantColor::new([255, 0, 0], 2));
}

#[test]
fn test_standard_preset_on_large_image() {
    // 1000x500 split into a red left half and a blue right half
    let img = RgbaImage::from_fn(1000, 500, |x, _| {
        if x < 500 {
            Rgba([200, 20, 20, 255])
        } else {
            Rgba([20, 20, 200, 255])
        }
    });
    let config = ExtractionConfig::standard().with_resample_filter(ResampleFilter::Nearest);
    let colors = extract_dominant_colors(&img, &config).unwrap();

    // downscaled to 100x50 and every 4th pixel sampled: 1250 samples
    assert_eq!(colors.len(), 2);
    // each 100px row samples x = 0, 4, .., 96: 13 red, 12 blue
    assert_eq!(colors.iter().map(|c| c.count).sum::<usize>(), 1250);
    assert_eq!(colors[0], DominantColor::new([200, 20, 20], 650));
    assert_eq!(colors[1], DominantColor::new([20, 20, 200], 600));
}

#[test]
fn test_full_resolution_preset() {
    let img = RgbaImage::from_pixel(100, 10, Rgba([1, 2, 3, 200]));
    let colors = extract_dominant_colors(&img, &ExtractionConfig::full_resolution()).unwrap();

    // 1000 pixels, every 10th sampled
    assert_eq!(colors, vec![DominantColor::new([1, 2, 3], 100)]);
}

#[test]
fn test_jpeg_decodes_as_opaque() {
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([40, 90, 160]));
    let bytes = encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg);
    let colors = extract_from_bytes(&bytes, &every_pixel()).unwrap();

    assert!(!colors.is_empty());
    assert!(colors.len() <= 10);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_garbage_bytes_fail_to_decode() {
    let result = extract_from_bytes(b"\x00\x01not an image", &ExtractionConfig::default());
    match result {
        Err(ExtractionError::DecodeError { .. }) => {}
        other => panic!("Expected DecodeError, got: {:?}", other),
    }
}

#[test]
fn test_missing_file_fails_to_decode() {
    let extractor = ColorExtractor::new();
    let result = extractor.extract_path(Path::new("nonexistent_file.jpg"));
    assert!(matches!(result, Err(ExtractionError::DecodeError { .. })));
}

#[test]
fn test_empty_path_fails() {
    let extractor = ColorExtractor::new();
    assert!(extractor.extract_path(Path::new("")).is_err());
}

#[test]
fn test_zero_output_cap_is_invalid_argument() {
    let config = ExtractionConfig::default().with_max_output_colors(0);
    let result = extract_dominant_colors(&two_by_two(), &config);
    assert!(matches!(result, Err(ExtractionError::InvalidArgument { .. })));
}

#[test]
fn test_invalid_config_checked_before_decode() {
    let config = ExtractionConfig::default().with_max_output_colors(0);
    let result = extract_from_bytes(b"garbage", &config);
    assert!(matches!(result, Err(ExtractionError::InvalidArgument { .. })));
}

#[test]
fn test_malformed_raw_buffer() {
    let result = image_loader::from_raw_rgba(3, 3, vec![0; 35]);
    assert!(matches!(result, Err(ExtractionError::DecodeError { .. })));
}

#[test]
fn test_zero_size_raw_buffer_is_empty_result() {
    let raster = image_loader::from_raw_rgba(0, 0, Vec::new()).unwrap();
    let colors = extract_dominant_colors(&raster, &ExtractionConfig::default()).unwrap();
    assert!(colors.is_empty());
}

// ============================================================================
// Background Extraction
// ============================================================================

#[tokio::test]
async fn test_async_bytes_extraction() {
    let extractor = ColorExtractor::with_config(every_pixel()).unwrap();
    let bytes = encode(two_by_two().into(), ImageFormat::Png);

    let colors = extractor.extract_bytes_async(bytes).await.unwrap();
    assert_eq!(colors.len(), 2);
}

#[tokio::test]
async fn test_async_decode_error_surfaces() {
    let extractor = ColorExtractor::new();
    let result = extractor.extract_bytes_async(b"nope".to_vec()).await;
    assert!(matches!(result, Err(ExtractionError::DecodeError { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_extractions_are_independent() {
    let extractor = ColorExtractor::with_config(every_pixel()).unwrap();
    let red = RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255]));
    let blue = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 255]));

    let (a, b) = tokio::join!(extractor.extract_async(red), extractor.extract_async(blue));

    assert_eq!(a.unwrap(), vec![DominantColor::new([255, 0, 0], 1024)]);
    assert_eq!(b.unwrap(), vec![DominantColor::new([0, 0, 255], 256)]);
}

// ============================================================================
// Properties
// ============================================================================

fn palette_strategy() -> impl Strategy<Value = Vec<[u8; 3]>> {
    prop::collection::vec(any::<[u8; 3]>(), 1..8)
}

/// Image of `width` x `height` cycling through `colors`, fully opaque
fn tiled(colors: &[[u8; 3]], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b] = colors[((y * width + x) as usize) % colors.len()];
        Rgba([r, g, b, 255])
    })
}

fn samples_taken(width: u32, height: u32, pixel_step: usize) -> usize {
    let pixels = (width * height) as usize;
    pixels.div_ceil(pixel_step)
}

proptest! {
    #[test]
    fn prop_uniform_image_yields_one_color(
        rgb in any::<[u8; 3]>(),
        alpha in 1u8..=255,
        width in 1u32..40,
        height in 1u32..40,
        pixel_step in 1usize..12,
    ) {
        let img = RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], alpha]));
        let config = every_pixel()
            .with_pixel_step(pixel_step)
            .with_alpha_threshold(alpha - 1);
        let colors = extract_dominant_colors(&img, &config).unwrap();

        let samples = samples_taken(width, height, pixel_step);
        prop_assert_eq!(colors, vec![DominantColor::new(rgb, samples)]);
    }

    #[test]
    fn prop_transparent_image_is_empty(
        width in 0u32..40,
        height in 0u32..40,
        max_colors in 1usize..20,
        threshold in any::<u8>(),
    ) {
        let img = RgbaImage::from_pixel(width, height, Rgba([90, 10, 200, 0]));
        let config = every_pixel()
            .with_max_output_colors(max_colors)
            .with_alpha_threshold(threshold);
        prop_assert!(extract_dominant_colors(&img, &config).unwrap().is_empty());
    }

    #[test]
    fn prop_counts_sum_to_samples(
        palette in palette_strategy(),
        width in 1u32..30,
        height in 1u32..30,
        pixel_step in 1usize..6,
    ) {
        let img = tiled(&palette, width, height);
        let config = every_pixel()
            .with_pixel_step(pixel_step)
            .with_max_output_colors(8);
        let colors = extract_dominant_colors(&img, &config).unwrap();

        let total: usize = colors.iter().map(|c| c.count).sum();
        prop_assert_eq!(total, samples_taken(width, height, pixel_step));
    }

    #[test]
    fn prop_distinct_colors_all_reported(palette in palette_strategy()) {
        let img = tiled(&palette, palette.len() as u32, 3);
        let mut distinct = palette.clone();
        distinct.sort();
        distinct.dedup();

        let colors = extract_dominant_colors(&img, &every_pixel()).unwrap();
        prop_assert_eq!(colors.len(), distinct.len());
    }

    #[test]
    fn prop_extraction_is_deterministic(
        pixels in prop::collection::vec(any::<[u8; 4]>(), 1..200),
        pixel_step in 1usize..4,
    ) {
        let width = pixels.len() as u32;
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let img = image_loader::from_raw_rgba(width, 1, raw).unwrap();
        let config = every_pixel().with_pixel_step(pixel_step);

        let first = extract_dominant_colors(&img, &config).unwrap();
        let second = extract_dominant_colors(&img, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_truncation_is_monotonic(
        pixels in prop::collection::vec(any::<[u8; 4]>(), 1..200),
        n in 1usize..15,
    ) {
        let width = pixels.len() as u32;
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let img = image_loader::from_raw_rgba(width, 1, raw).unwrap();

        let shorter =
            extract_dominant_colors(&img, &every_pixel().with_max_output_colors(n)).unwrap();
        let longer =
            extract_dominant_colors(&img, &every_pixel().with_max_output_colors(n + 1)).unwrap();

        prop_assert!(longer.len() == shorter.len() || longer.len() == shorter.len() + 1);
        prop_assert_eq!(&longer[..shorter.len()], &shorter[..]);
    }

    #[test]
    fn prop_output_sorted_and_bounded(
        pixels in prop::collection::vec(any::<[u8; 4]>(), 0..200),
        n in 1usize..15,
    ) {
        let width = pixels.len() as u32;
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let img = image_loader::from_raw_rgba(width, 1, raw).unwrap();

        let colors =
            extract_dominant_colors(&img, &every_pixel().with_max_output_colors(n)).unwrap();
        prop_assert!(colors.len() <= n);
        prop_assert!(colors.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
