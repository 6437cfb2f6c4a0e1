//! Extract representative colors from an image and classify them into
//! vibrant and muted roles for UI theming.

pub mod cli;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod preview;
pub mod swatch;
pub mod target;
pub mod tui;

pub use color::Color;
pub use config::{FilterConfig, PaletteConfig, Region, SamplingConfig, Settings};
pub use error::ConfigError;
pub use generator::Palette;
pub use pipeline::source::PixelSample;
pub use swatch::Swatch;
pub use target::{Target, TargetProfile};
