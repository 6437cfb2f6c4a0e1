use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::target::{Target, TargetProfile, TargetTable, Weights};

pub const DEFAULT_MAX_COLORS: usize = 16;
pub const DEFAULT_MAX_DIMENSION: u32 = 192;

const DEFAULT_MIN_ALPHA: u8 = 125;
const DEFAULT_WHITE_THRESHOLD: u8 = 243;
const DEFAULT_BLACK_THRESHOLD: u8 = 12;

/// Which raw pixels the histogram builder discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Pixels with alpha below this are ignored.
    pub min_alpha: u8,
    /// A pixel whose channels are all at or above this is near-white.
    pub white_threshold: u8,
    /// A pixel whose channels are all at or below this is near-black.
    pub black_threshold: u8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_alpha: DEFAULT_MIN_ALPHA,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
        }
    }
}

/// Everything the quantize-and-score pipeline needs besides the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    max_colors: usize,
    pub filter: FilterConfig,
    pub targets: TargetTable,
    /// Forbid one swatch from filling more than one target.
    pub exclusive_targets: bool,
}

impl PaletteConfig {
    pub fn new(max_colors: usize) -> Result<Self, ConfigError> {
        if max_colors == 0 {
            return Err(ConfigError::ZeroMaxColors);
        }
        Ok(Self {
            max_colors,
            filter: FilterConfig::default(),
            targets: TargetTable::default(),
            exclusive_targets: false,
        })
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    pub fn with_max_colors(mut self, max_colors: usize) -> Result<Self, ConfigError> {
        if max_colors == 0 {
            return Err(ConfigError::ZeroMaxColors);
        }
        self.max_colors = max_colors;
        Ok(self)
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_profile(mut self, target: Target, profile: TargetProfile) -> Self {
        self.targets.set(target, profile);
        self
    }

    pub fn with_exclusive_targets(mut self, exclusive: bool) -> Self {
        self.exclusive_targets = exclusive;
        self
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            filter: FilterConfig::default(),
            targets: TargetTable::default(),
            exclusive_targets: false,
        }
    }
}

/// Rectangle of the source image to sample, in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRegion);
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Check that the region lies within an image of the given size.
    pub fn check_bounds(&self, image_width: u32, image_height: u32) -> Result<(), ConfigError> {
        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= image_width);
        let fits_y = self.y.checked_add(self.height).is_some_and(|b| b <= image_height);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(ConfigError::RegionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                image_width,
                image_height,
            })
        }
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    /// Parse `x,y,width,height`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| format!("invalid region '{s}': {e}"))?;
        let &[x, y, width, height] = parts.as_slice() else {
            return Err(format!(
                "invalid region '{s}': expected x,y,width,height"
            ));
        };
        Region::new(x, y, width, height).map_err(|e| e.to_string())
    }
}

/// How the pixel source reduces an image to samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    max_dimension: u32,
    stride: usize,
    pub region: Option<Region>,
}

impl SamplingConfig {
    pub fn new(max_dimension: u32, stride: usize) -> Result<Self, ConfigError> {
        if max_dimension == 0 {
            return Err(ConfigError::ZeroMaxDimension);
        }
        if stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        Ok(Self {
            max_dimension,
            stride,
            region: None,
        })
    }

    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            stride: 1,
            region: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    max_colors: Option<usize>,
    exclusive_targets: Option<bool>,
    #[serde(default)]
    filter: FilterFile,
    #[serde(default)]
    sampling: SamplingFile,
    #[serde(default)]
    targets: BTreeMap<Target, ProfileFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterFile {
    min_alpha: Option<u8>,
    white_threshold: Option<u8>,
    black_threshold: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SamplingFile {
    max_dimension: Option<u32>,
    stride: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    saturation: [f32; 3],
    lightness: [f32; 3],
    weights: Option<[f32; 3]>,
}

/// Settings read from a TOML file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub palette: PaletteConfig,
    pub sampling: SamplingConfig,
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.message().to_string()))?;

        let defaults = FilterConfig::default();
        let filter = FilterConfig {
            min_alpha: file.filter.min_alpha.unwrap_or(defaults.min_alpha),
            white_threshold: file
                .filter
                .white_threshold
                .unwrap_or(defaults.white_threshold),
            black_threshold: file
                .filter
                .black_threshold
                .unwrap_or(defaults.black_threshold),
        };

        let mut palette = PaletteConfig::new(file.max_colors.unwrap_or(DEFAULT_MAX_COLORS))?
            .with_filter(filter)
            .with_exclusive_targets(file.exclusive_targets.unwrap_or(false));
        for (target, profile) in file.targets {
            let weights = match profile.weights {
                Some([s, l, p]) => Weights::new(s, l, p)?,
                None => Weights::default(),
            };
            let profile = TargetProfile::new(profile.saturation, profile.lightness, weights)?;
            palette = palette.with_profile(target, profile);
        }

        let sampling = SamplingConfig::new(
            file.sampling
                .max_dimension
                .unwrap_or(DEFAULT_MAX_DIMENSION),
            file.sampling.stride.unwrap_or(1),
        )?;

        Ok(Self { palette, sampling })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let settings = Self::from_toml_str(&raw)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        Ok(settings)
    }
}
