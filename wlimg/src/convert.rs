//! Decode one WebP file and save it again with quality hints.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use zenwebp_loader::quality::{COMPRESSION_TAG, QUALITY_TAG};
use zenwebp_loader::{ImageRecord, LoaderRegistry, ProgressUpdate};

use crate::ConvertArgs;
use crate::batch::format_size;

/// Run the `convert` subcommand.
pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let output = PathBuf::from(&args.output);
    if output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let registry = LoaderRegistry::with_webp();
    let start = Instant::now();

    let mut image = registry
        .open(&args.input)
        .with_context(|| format!("probing {}", args.input))?;
    let input_size = std::fs::metadata(&args.input)?.len();

    let mut report = |image: &ImageRecord, update: ProgressUpdate| {
        log::info!("{}: {}%", image.path().display(), update.percent);
    };
    registry
        .load_pixels(&mut image, Some(&mut report))
        .with_context(|| format!("decoding {}", args.input))?;

    image.path = output;
    if let Some(quality) = args.quality {
        image.set_tag(QUALITY_TAG, quality);
    }
    if let Some(compression) = args.compression {
        image.set_tag(COMPRESSION_TAG, compression);
    }

    let outcome = registry
        .save(&image, Some(&mut report))
        .with_context(|| format!("saving {}", image.path().display()))?;

    println!(
        "{} -> {}: {}x{}, quality {}, {} -> {} in {}ms",
        args.input,
        image.path().display(),
        image.width,
        image.height,
        outcome.quality,
        format_size(input_size),
        format_size(outcome.bytes_written as u64),
        start.elapsed().as_millis()
    );
    Ok(())
}
