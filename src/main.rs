use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use flat_atlas::{build_flat_atlas, patch_html_file, write_outputs, BuildConfig};

#[derive(Parser, Debug)]
#[command(about = "Repack split sprite sheets + atlases into one flattened sheet", version)]
struct Args {
    /// Directory holding sprites-0/1.webp and sprites-0/1.json
    #[arg(long)]
    assets_dir: PathBuf,
    /// Output sheet path (lossless WebP)
    #[arg(long)]
    out_image: PathBuf,
    /// Output combined atlas JSON path
    #[arg(long)]
    out_json: PathBuf,
    /// Maximum sheet width; widened automatically if a sprite needs more
    #[arg(long, default_value_t = 4096)]
    max_width: u32,
    /// Transparent padding reserved around each sprite, in pixels
    #[arg(long, default_value_t = 2)]
    padding: u32,
    /// HTML bundle to patch in place with the flattened references
    #[arg(long)]
    update_html: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = BuildConfig {
        assets_dir: args.assets_dir,
        out_image: args.out_image,
        out_json: args.out_json,
        max_width: args.max_width,
        padding: args.padding,
    };

    let artifact = build_flat_atlas(&cfg)?;
    write_outputs(&artifact, &cfg)?;

    if let Some(html) = &args.update_html {
        // Embed exactly the bytes written to disk, so the inline copy and the
        // external file can never drift apart.
        let atlas_json = fs::read_to_string(&cfg.out_json)?;
        patch_html_file(html, &atlas_json)?;
    }

    println!(
        "Flattened {} sprites into {} ({}x{})",
        artifact.atlas.frames.len(),
        cfg.out_image.display(),
        artifact.atlas.meta.size.w,
        artifact.atlas.meta.size.h
    );
    Ok(())
}
