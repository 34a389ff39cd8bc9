use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use flat_atlas::inspect;

#[derive(Parser, Debug)]
#[command(about = "Inspect a flattened atlas JSON (+ optional sheet) for basic statistics", version)]
struct Args {
    #[arg(long)]
    atlas_json: PathBuf,
    #[arg(long)]
    atlas_image: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let report = inspect(&args.atlas_json, args.atlas_image.as_deref())?;

    let (w, h) = report.sheet_dim;
    println!(
        "Atlas: {}x{} frames={} occupancy={:.1}%",
        w,
        h,
        report.frame_count,
        report.occupancy * 100.0
    );
    if report.overlaps > 0 || report.out_of_bounds > 0 {
        println!(
            "Problems: overlapping_pairs={} out_of_bounds={}",
            report.overlaps, report.out_of_bounds
        );
        anyhow::bail!("atlas failed geometry checks");
    }
    println!("Geometry: ok");
    Ok(())
}
