//! sigclip - signature extraction from PDF documents
//!
//! Renders one page of a PDF with `pdftoppm`, locates the largest
//! connected dark region (assumed to be the handwritten signature), and
//! writes it out as a PNG with the white background made transparent.
//!
//! Rasterization and file handling live here; all decision logic is in
//! `sigclip-core`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use sigclip_core::{extract_signature, ExtractConfig, WhiteThreshold};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The PDF document to extract from.
    pdf: PathBuf,

    /// Page to render (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Rasterization resolution in DPI.
    #[arg(long, default_value_t = 150)]
    dpi: u32,

    /// Grayscale cutoff below which a pixel counts as ink.
    /// Lower it for faint scans, raise it for dark ones.
    #[arg(short, long, default_value_t = 200)]
    threshold: u8,

    /// Per-channel cutoff above which a pixel counts as background.
    #[arg(long, default_value_t = 200)]
    white_threshold: u8,

    /// Where to write the transparent signature PNG.
    #[arg(short, long, default_value = "signature_result.png")]
    output: PathBuf,
}

/// Render one PDF page to a PNG file via the `pdftoppm` CLI.
fn render_page(pdf: &Path, page: u32, dpi: u32) -> Result<PathBuf> {
    let prefix = std::env::temp_dir().join(format!("sigclip-page-{}", std::process::id()));

    let status = Command::new("pdftoppm")
        .arg("-png")
        .arg("-singlefile")
        .args(["-r", &dpi.to_string()])
        .args(["-f", &page.to_string()])
        .args(["-l", &page.to_string()])
        .arg(pdf)
        .arg(&prefix)
        .status()
        .context("failed to run pdftoppm (is poppler-utils installed?)")?;

    if !status.success() {
        bail!("pdftoppm exited with {}", status);
    }

    Ok(prefix.with_extension("png"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sigclip=info".parse()?),
        )
        .init();

    let args = Args::parse();

    info!("Rendering page {} of {}", args.page, args.pdf.display());
    let png_path = render_page(&args.pdf, args.page, args.dpi)?;

    // Decode failures from the image crate propagate as-is.
    let page = image::open(&png_path)
        .with_context(|| format!("failed to decode rendered page {}", png_path.display()))?
        .into_rgb8();
    info!("Rendered page is {}x{}", page.width(), page.height());

    let config = ExtractConfig {
        ink_threshold: args.threshold,
        white_threshold: WhiteThreshold::uniform(args.white_threshold),
    };

    let extraction = extract_signature(&page, &config)?;
    info!(
        "Signature located at ({}, {}) size {}x{}",
        extraction.bounds.left,
        extraction.bounds.top,
        extraction.bounds.width,
        extraction.bounds.height
    );

    extraction
        .image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    // The rendered page is an intermediate; best-effort cleanup.
    let _ = std::fs::remove_file(&png_path);

    info!(
        "Signature with transparent background saved to {}",
        args.output.display()
    );
    Ok(())
}
