use std::path::PathBuf;

use clap::Parser;

use crate::config::Region;

/// Extract a themed color palette (vibrant, muted, light and dark variants)
/// from an image.
#[derive(Parser, Debug)]
#[command(name = "image-palette", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Maximum number of swatches to extract
    #[arg(short = 'k', long = "colors")]
    pub colors: Option<usize>,

    /// Downscale so neither side exceeds this many pixels
    #[arg(long)]
    pub max_dimension: Option<u32>,

    /// Sample every Nth pixel
    #[arg(long)]
    pub stride: Option<usize>,

    /// Only sample this region, given as x,y,width,height
    #[arg(long)]
    pub region: Option<Region>,

    /// TOML file with filter thresholds and target profiles
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Never assign the same swatch to two targets
    #[arg(long)]
    pub exclusive: bool,

    /// Write the palette to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a colored terminal preview of the palette
    #[arg(long, conflicts_with = "tui")]
    pub preview: bool,

    /// Launch interactive TUI mode
    #[arg(long)]
    pub tui: bool,
}
