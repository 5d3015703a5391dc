//! wlimg: inspect and re-encode WebP images.
//!
//! A small host for zenwebp-loader: `info` runs the probe pass the way an
//! image browser would, `convert` decodes and saves with quality hints.

mod batch;
mod convert;
mod info;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wlimg", version, about = "Inspect and re-encode WebP images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe and display image metadata without decoding pixels.
    Info(InfoArgs),

    /// Decode an image and save it again as lossy WebP.
    Convert(ConvertArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Input files, directories or glob patterns.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Use the header-only probe (dimensions only, no alpha or animation).
    #[arg(long)]
    pub legacy_probe: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input WebP file.
    pub input: String,

    /// Output file.
    #[arg(short, long)]
    pub output: String,

    /// Quality (1-100). Stored as the `quality` tag.
    #[arg(short, long, conflicts_with = "compression")]
    pub quality: Option<i32>,

    /// Compression level (0-9). Stored as the `compression` tag.
    #[arg(short, long)]
    pub compression: Option<i32>,

    /// Allow overwriting an existing output file.
    #[arg(long)]
    pub force: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Info(args) => info::run(args),
        Command::Convert(args) => convert::run(args),
    }
}
