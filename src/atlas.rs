//! Atlas JSON data model.
//!
//! Input side mirrors the TexturePacker-style documents the sprite pipeline
//! emits (`frames` keyed by sprite name, optional rotation/trim/anchor
//! fields). Output side is the flattened single-sheet atlas.

use serde::{Deserialize, Serialize};

/// Pixel-space rectangle. Doubles as the `spriteSourceSize` record, which
/// carries an offset plus the trimmed extent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// Normalized pivot used by the consuming renderer; packing never reads it,
/// it is only carried through.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Default for Anchor {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// One sprite entry in a source atlas.
///
/// Invariant: when `rotated` is set, `frame.w`/`frame.h` describe the sprite's
/// logical size while the stored sheet region has them swapped.
#[derive(Deserialize, Debug, Clone)]
pub struct FrameRecord {
    pub frame: FrameRect,
    #[serde(default)]
    pub rotated: bool,
    #[serde(default)]
    pub trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    pub sprite_source_size: Option<FrameRect>,
    #[serde(rename = "sourceSize")]
    pub source_size: Option<Size>,
    pub anchor: Option<Anchor>,
}

impl FrameRecord {
    /// Offset and extent of the sprite within its original bounds; defaults
    /// to the full frame box for untrimmed sprites.
    pub fn sprite_source_size(&self) -> FrameRect {
        self.sprite_source_size.unwrap_or(FrameRect {
            x: 0,
            y: 0,
            w: self.frame.w,
            h: self.frame.h,
        })
    }

    /// Original untrimmed size; defaults to the frame box.
    pub fn source_size(&self) -> Size {
        self.source_size.unwrap_or(Size {
            w: self.frame.w,
            h: self.frame.h,
        })
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor.unwrap_or_default()
    }
}

/// A source atlas document. Frame values stay as raw JSON until extraction so
/// the map keeps the document's insertion order (packing tie-breaks depend on
/// it).
#[derive(Deserialize, Debug, Default)]
pub struct AtlasDoc {
    #[serde(default)]
    pub frames: serde_json::Map<String, serde_json::Value>,
}

/// One sprite entry in the flattened atlas. Rotation and trimming are
/// resolved away during extraction, so both flags are always false here and
/// `spriteSourceSize`/`sourceSize` cover the full placed rectangle.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OutFrame {
    pub frame: FrameRect,
    pub rotated: bool,
    pub trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    pub sprite_source_size: FrameRect,
    #[serde(rename = "sourceSize")]
    pub source_size: Size,
    pub anchor: Anchor,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OutMeta {
    pub app: String,
    pub version: String,
    pub image: String,
    pub format: String,
    pub size: Size,
    pub scale: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OutAtlas {
    pub frames: serde_json::Map<String, serde_json::Value>,
    pub meta: OutMeta,
}
