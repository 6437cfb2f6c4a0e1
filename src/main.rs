use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;

use image_palette::cli::Args;
use image_palette::config::{PaletteConfig, SamplingConfig, Settings};
use image_palette::dispatch::{generate_async, MainQueue, ThreadExecutor};
use image_palette::pipeline::source::load_samples;
use image_palette::{preview, tui};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let (palette_config, sampling) = apply_overrides(settings, &args)?;

    let samples = load_samples(&args.image, &sampling)?;
    log::info!(
        "loaded {} samples from {}",
        samples.len(),
        args.image.display()
    );

    let queue = MainQueue::new();
    let pool = ThreadExecutor::new(1).context("failed to start palette worker")?;
    let result = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&result);
    generate_async(
        samples,
        palette_config,
        &pool,
        Arc::new(queue.handle()),
        move |palette| match slot.lock() {
            Ok(mut slot) => *slot = Some(palette),
            Err(_) => log::error!("palette result slot poisoned"),
        },
    );
    // The completion runs here, on the main thread.
    queue.run_next();
    let palette = result
        .lock()
        .ok()
        .and_then(|mut slot| slot.take())
        .context("palette generation did not complete")?;

    if args.tui {
        return tui::run(tui::TuiApp::new(palette, args.image.clone()));
    }
    if args.preview {
        return preview::write_preview(&mut std::io::stdout(), &palette);
    }

    let content = palette.serialize();
    match &args.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write palette to {}", path.display()))?;
            eprintln!("Wrote palette to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Layer command-line flags on top of the file (or default) settings.
fn apply_overrides(settings: Settings, args: &Args) -> Result<(PaletteConfig, SamplingConfig)> {
    let Settings {
        mut palette,
        sampling,
    } = settings;

    if let Some(k) = args.colors {
        palette = palette.with_max_colors(k)?;
    }
    if args.exclusive {
        palette = palette.with_exclusive_targets(true);
    }

    let sampling = SamplingConfig::new(
        args.max_dimension.unwrap_or(sampling.max_dimension()),
        args.stride.unwrap_or(sampling.stride()),
    )?
    .with_region(args.region.or(sampling.region));

    Ok((palette, sampling))
}
