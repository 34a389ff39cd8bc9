//! Repacks split sprite sheets + TexturePacker-style atlases into a single
//! flattened WebP sheet and combined atlas JSON, optionally rewriting the
//! references inside an HTML bundle.

pub mod atlas;
pub mod build;
pub mod extract;
pub mod html;
pub mod pack;

// Curated re-exports
pub use atlas::{Anchor, AtlasDoc, FrameRecord, FrameRect, OutAtlas, OutFrame, Size};
pub use build::{build_flat_atlas, inspect, write_outputs, BuildConfig, FlatArtifact};
pub use extract::extract_sprite;
pub use html::{patch_html, patch_html_file};
pub use pack::{pack_shelves, ShelfLayout, ShelfPlacement};
