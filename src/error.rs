use thiserror::Error;

/// Misconfiguration detected while building a [`crate::config::PaletteConfig`],
/// a [`crate::target::TargetProfile`] or a [`crate::config::SamplingConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The maximum swatch count must be at least one.
    #[error("max colors must be at least 1")]
    ZeroMaxColors,
    /// Pixel sampling stride must be at least one.
    #[error("sampling stride must be at least 1")]
    ZeroStride,
    /// Downscale bound must be at least one pixel.
    #[error("max dimension must be at least 1")]
    ZeroMaxDimension,
    /// A min/target/max triple is out of order or outside `[0, 1]`.
    #[error("invalid {field} range: min {min}, target {target}, max {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        target: f32,
        max: f32,
    },
    /// Weights must be finite and non-negative.
    #[error("invalid {field} weight: {value}")]
    InvalidWeight { field: &'static str, value: f32 },
    /// Region of interest has zero width or height.
    #[error("region of interest is empty")]
    EmptyRegion,
    /// Region of interest extends past the image bounds.
    #[error("region {x},{y} {width}x{height} exceeds image bounds {image_width}x{image_height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("{0}")]
    Parse(String),
}
