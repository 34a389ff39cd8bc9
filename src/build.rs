//! Flattening pipeline: load the split sheets + atlases, extract every
//! sprite, shelf-pack the lot, composite one sheet, and assemble the
//! combined atlas document.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use image::codecs::webp::WebPEncoder;
use image::{imageops, ExtendedColorType, RgbaImage};

use crate::atlas::{Anchor, AtlasDoc, FrameRecord, FrameRect, OutAtlas, OutFrame, OutMeta, Size};
use crate::extract::extract_sprite;
use crate::pack::pack_shelves;

/// Fixed asset names inside the assets directory, in extraction order.
pub const SHEET_FILES: [&str; 2] = ["sprites-0.webp", "sprites-1.webp"];
pub const ATLAS_FILES: [&str; 2] = ["sprites-0.json", "sprites-1.json"];

/// Sheet width floor applied when a sprite forces widening past the
/// configured maximum.
pub const WIDEN_FLOOR: u32 = 8192;

#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub assets_dir: PathBuf,
    pub out_image: PathBuf,
    pub out_json: PathBuf,
    pub max_width: u32,
    pub padding: u32,
}

/// Sprite pulled out of a source sheet, waiting to be packed.
pub struct ExtractedSprite {
    pub key: String,
    pub image: RgbaImage,
    pub anchor: Anchor,
}

/// In-memory build result. Nothing touches disk until [`write_outputs`], so a
/// failed build never leaves partial files behind.
pub struct FlatArtifact {
    pub image: RgbaImage,
    pub atlas: OutAtlas,
}

fn load_sheet(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| anyhow!("open sheet {}: {e}", path.display()))?;
    Ok(img.to_rgba8())
}

fn load_atlas(path: &Path) -> Result<AtlasDoc> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("read atlas {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| anyhow!("parse atlas {}: {e}", path.display()))
}

/// Runs extraction and packing over the fixed asset pair and returns the
/// composited sheet plus the combined atlas.
pub fn build_flat_atlas(cfg: &BuildConfig) -> Result<FlatArtifact> {
    let mut extracted: Vec<ExtractedSprite> = Vec::new();
    let mut widest = 0u32;

    for (sheet_name, atlas_name) in SHEET_FILES.iter().zip(ATLAS_FILES.iter()) {
        let sheet = load_sheet(&cfg.assets_dir.join(sheet_name))?;
        let doc = load_atlas(&cfg.assets_dir.join(atlas_name))?;

        for (key, value) in &doc.frames {
            let record: FrameRecord = serde_json::from_value(value.clone())
                .with_context(|| format!("frame {key:?} in {atlas_name}"))?;
            let image = extract_sprite(&sheet, &record)
                .with_context(|| format!("frame {key:?} in {atlas_name}"))?;
            widest = widest.max(image.width());
            extracted.push(ExtractedSprite {
                key: key.clone(),
                image,
                anchor: record.anchor(),
            });
        }
    }

    // The packer never reflows an oversized rectangle, so widen up front.
    let mut max_width = cfg.max_width;
    if widest + cfg.padding * 2 > max_width {
        max_width = (widest + cfg.padding * 2).max(WIDEN_FLOOR);
    }

    let sizes: Vec<(u32, u32)> = extracted
        .iter()
        .map(|s| (s.image.width(), s.image.height()))
        .collect();
    let layout = pack_shelves(&sizes, max_width, cfg.padding);

    let mut sheet = RgbaImage::new(layout.width, layout.height);
    let mut frames = serde_json::Map::new();
    for placement in &layout.placements {
        let sprite = &extracted[placement.index];
        imageops::replace(
            &mut sheet,
            &sprite.image,
            placement.x as i64,
            placement.y as i64,
        );
        let (w, h) = sprite.image.dimensions();
        let out = OutFrame {
            frame: FrameRect { x: placement.x, y: placement.y, w, h },
            rotated: false,
            trimmed: false,
            sprite_source_size: FrameRect { x: 0, y: 0, w, h },
            source_size: Size { w, h },
            anchor: sprite.anchor,
        };
        frames.insert(sprite.key.clone(), serde_json::to_value(out)?);
    }

    let image_name = cfg
        .out_image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let atlas = OutAtlas {
        frames,
        meta: OutMeta {
            app: "flat-atlas".into(),
            version: "1.0".into(),
            image: image_name,
            format: "RGBA8888".into(),
            size: Size { w: layout.width, h: layout.height },
            scale: "1".into(),
        },
    };

    Ok(FlatArtifact { image: sheet, atlas })
}

/// Writes the sheet (lossless WebP) and the compact atlas JSON, creating
/// parent directories as needed.
pub fn write_outputs(artifact: &FlatArtifact, cfg: &BuildConfig) -> Result<()> {
    if let Some(parent) = cfg.out_image.parent() {
        fs::create_dir_all(parent)?;
    }
    if let Some(parent) = cfg.out_json.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(&cfg.out_image)
        .map_err(|e| anyhow!("create {}: {e}", cfg.out_image.display()))?;
    let encoder = WebPEncoder::new_lossless(BufWriter::new(file));
    encoder.encode(
        artifact.image.as_raw(),
        artifact.image.width(),
        artifact.image.height(),
        ExtendedColorType::Rgba8,
    )?;

    let json = serde_json::to_string(&artifact.atlas)?;
    fs::write(&cfg.out_json, json)
        .map_err(|e| anyhow!("write {}: {e}", cfg.out_json.display()))?;
    Ok(())
}

/// Sanity-check summary of a flattened atlas, for the inspect CLI.
pub struct Inspection {
    pub frame_count: usize,
    pub sheet_dim: (u32, u32),
    pub occupancy: f64,
    pub overlaps: usize,
    pub out_of_bounds: usize,
}

/// Parses an output atlas and verifies its frames against the sheet
/// dimensions recorded in `meta` (and the actual image, when given). A size
/// mismatch between image and metadata is reported as a warning, not an
/// error.
pub fn inspect(json_path: &Path, image_path: Option<&Path>) -> Result<Inspection> {
    let text = fs::read_to_string(json_path)
        .map_err(|e| anyhow!("read atlas {}: {e}", json_path.display()))?;
    let atlas: OutAtlas = serde_json::from_str(&text)
        .map_err(|e| anyhow!("parse atlas {}: {e}", json_path.display()))?;

    let (sheet_w, sheet_h) = (atlas.meta.size.w, atlas.meta.size.h);
    if let Some(p) = image_path {
        let img = image::open(p).map_err(|e| anyhow!("open sheet {}: {e}", p.display()))?;
        if img.width() != sheet_w || img.height() != sheet_h {
            eprintln!(
                "warning: sheet {}x{} does not match meta size {}x{}",
                img.width(),
                img.height(),
                sheet_w,
                sheet_h
            );
        }
    }

    let mut rects: Vec<FrameRect> = Vec::with_capacity(atlas.frames.len());
    for (key, value) in &atlas.frames {
        let frame: OutFrame = serde_json::from_value(value.clone())
            .with_context(|| format!("frame {key:?}"))?;
        rects.push(frame.frame);
    }

    // Frame values come from untrusted JSON; widen before adding so corrupt
    // coordinates near u32::MAX register as out of bounds instead of
    // overflowing.
    let mut out_of_bounds = 0;
    let mut area = 0u64;
    for r in &rects {
        if r.x as u64 + r.w as u64 > sheet_w as u64 || r.y as u64 + r.h as u64 > sheet_h as u64 {
            out_of_bounds += 1;
        }
        area += r.w as u64 * r.h as u64;
    }
    let mut overlaps = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            let disjoint = a.x as u64 + a.w as u64 <= b.x as u64
                || b.x as u64 + b.w as u64 <= a.x as u64
                || a.y as u64 + a.h as u64 <= b.y as u64
                || b.y as u64 + b.h as u64 <= a.y as u64;
            if !disjoint {
                overlaps += 1;
            }
        }
    }

    let sheet_area = sheet_w as u64 * sheet_h as u64;
    Ok(Inspection {
        frame_count: rects.len(),
        sheet_dim: (sheet_w, sheet_h),
        occupancy: if sheet_area == 0 { 0.0 } else { area as f64 / sheet_area as f64 },
        overlaps,
        out_of_bounds,
    })
}
