use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::SamplingConfig;

/// One sampled pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelSample {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }
}

impl From<image::Rgba<u8>> for PixelSample {
    fn from(p: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self { r, g, b, a }
    }
}

/// Open an image file and reduce it to pixel samples.
pub fn load_samples(path: &Path, sampling: &SamplingConfig) -> Result<Vec<PixelSample>> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;
    sample_image(&img, sampling)
}

/// Crop to the region of interest, shrink to fit within the max dimension
/// (preserving aspect ratio, never upscaling), then take every `stride`-th
/// pixel in row-major order.
pub fn sample_image(img: &DynamicImage, sampling: &SamplingConfig) -> Result<Vec<PixelSample>> {
    let img = match sampling.region {
        Some(region) => {
            region.check_bounds(img.width(), img.height())?;
            img.crop_imm(region.x, region.y, region.width, region.height)
        }
        None => img.clone(),
    };

    let max_dim = sampling.max_dimension();
    let img = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Triangle)
    } else {
        img
    };
    log::debug!("sampling {}x{} image", img.width(), img.height());

    let samples = img
        .to_rgba8()
        .pixels()
        .step_by(sampling.stride())
        .map(|p| PixelSample::from(*p))
        .collect();
    Ok(samples)
}
