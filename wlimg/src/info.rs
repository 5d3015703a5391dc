//! Image inspection: probe and display metadata without decoding.

use std::path::Path;

use serde::Serialize;
use zenwebp_loader::{
    LoadOutcome, LoaderConfig, LoaderRegistry, ProbeStrategy, WEBP_MIME, WebpLoader,
};

use crate::InfoArgs;
use crate::batch;

/// Run the `info` subcommand.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let files = batch::expand_inputs(&args.files)?;

    if files.is_empty() {
        anyhow::bail!("no WebP files found");
    }

    let strategy = if args.legacy_probe {
        ProbeStrategy::HeaderOnly
    } else {
        ProbeStrategy::Auto
    };
    let mut registry = LoaderRegistry::new();
    registry.register(Box::new(WebpLoader::with_config(
        LoaderConfig::default().with_probe(strategy),
    )));

    let multi = files.len() > 1;
    let mut failures = 0usize;

    for (i, path) in files.iter().enumerate() {
        if multi && !args.json {
            if i > 0 {
                println!();
            }
            println!("{}:", path.display());
        }

        match inspect_file(&registry, path) {
            Ok(info) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_info(&info);
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("  error: {e}");
            }
        }
    }

    if failures == files.len() {
        anyhow::bail!("no file could be read");
    }
    Ok(())
}

/// Probe a single file and return structured info.
fn inspect_file(registry: &LoaderRegistry, path: &Path) -> anyhow::Result<ImageInfoDisplay> {
    let file_size = std::fs::metadata(path)?.len();
    let (image, outcome) = registry.open_with_outcome(path)?;
    let has_animation = match outcome {
        LoadOutcome::Probed(features) | LoadOutcome::Decoded { features, .. } => {
            features.has_animation
        }
        LoadOutcome::AlreadyLoaded => false,
    };

    Ok(ImageInfoDisplay {
        path: path.display().to_string(),
        format: image.format.clone().unwrap_or_default(),
        mime_type: WEBP_MIME.to_string(),
        width: image.width,
        height: image.height,
        has_alpha: image.has_alpha(),
        has_animation,
        file_size,
    })
}

#[derive(Debug, Serialize)]
struct ImageInfoDisplay {
    path: String,
    format: String,
    mime_type: String,
    width: u32,
    height: u32,
    has_alpha: bool,
    has_animation: bool,
    file_size: u64,
}

fn print_info(info: &ImageInfoDisplay) {
    println!("  Format:       {} ({})", info.format, info.mime_type);
    println!("  Dimensions:   {}x{}", info.width, info.height);
    println!(
        "  Alpha:        {}",
        if info.has_alpha { "yes" } else { "no" }
    );
    if info.has_animation {
        println!("  Animation:    yes (first frame is decoded)");
    }
    println!("  File size:    {}", batch::format_size(info.file_size));
}
