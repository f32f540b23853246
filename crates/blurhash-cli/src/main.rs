use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print the BlurHash of an image file.
#[derive(Parser, Debug)]
#[command(name = "blurhash", version)]
#[command(about = "Print the BlurHash of an image file")]
struct Cli {
    /// Horizontal components (1-9)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=9))]
    x_components: u32,

    /// Vertical components (1-9)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=9))]
    y_components: u32,

    /// Image to encode (PNG, JPEG, GIF, BMP or WebP)
    image: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the hash.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let hash = blurhash_for(&cli)?;
    println!("{hash}");
    Ok(())
}

fn blurhash_for(cli: &Cli) -> Result<String> {
    let decoded = image::open(&cli.image)
        .with_context(|| format!("failed to load image {}", cli.image.display()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    tracing::debug!(
        path = %cli.image.display(),
        width,
        height,
        "decoded image"
    );

    let stride = blurhash_encode::image::packed_stride(width, height)?;
    blurhash_encode::encode_strided(
        rgb.as_raw(),
        width,
        height,
        stride,
        cli.x_components,
        cli.y_components,
    )
    .with_context(|| format!("failed to encode {}", cli.image.display()))
}
