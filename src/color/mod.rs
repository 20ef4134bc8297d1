//! Color counting and ranking module
//!
//! This module handles color encodings, per-call frequency buckets, and the
//! extractor that ranks sampled colors by occurrence.

pub mod bucket;
pub mod conversion;
pub mod extractor;

pub use bucket::ColorBucket;
pub use conversion::ColorConverter;
pub use extractor::{downscaled_dimensions, ColorExtractor};
