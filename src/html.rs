//! Rewrites the HTML bundle's inline sheet/atlas blocks to reference the
//! flattened assets.
//!
//! Every replacement is independently optional: a document that was already
//! migrated, or authored without a given marker pair or fragment, simply
//! leaves that replacement as a no-op. Partial patching is an accepted
//! outcome, not an error.

use std::fs;
use std::path::Path;

use anyhow::Result;

pub const SHEETS_START: &str = "<!-- INLINE_SHEETS_START -->";
pub const SHEETS_END: &str = "<!-- INLINE_SHEETS_END -->";
pub const ATLASES_START: &str = "<!-- INLINE_ATLASES_START -->";
pub const ATLASES_END: &str = "<!-- INLINE_ATLASES_END -->";

const ATLAS_LOOKUP_OLD: &str = "const ATLAS_0 = getInlineJson(\"atlas0\");\nconst ATLAS_1 = getInlineJson(\"atlas1\");\n";
const ATLAS_LOOKUP_NEW: &str = "const ATLAS_0 = getInlineJson(\"atlasFlat\");\nconst ATLAS_1 = { frames: {} };\n";

const SHEET_SRC_OLD: &str = "const SHEET_0_SRC = getInlineDataUrl(\"sheet0\");\nconst SHEET_1_SRC = getInlineDataUrl(\"sheet1\");\nconst SHEET_0_FALLBACK = ASSETS_URL + \"/sprites-0.webp\";\nconst SHEET_1_FALLBACK = ASSETS_URL + \"/sprites-1.webp\";\n\n";
const SHEET_SRC_NEW: &str = "const SHEET_0_SRC = ASSETS_URL + \"/flat-sprites.webp\";\nconst SHEET_1_SRC = ASSETS_URL + \"/flat-sprites.webp\";\nconst SHEET_0_FALLBACK = null;\nconst SHEET_1_FALLBACK = null;\n\n";

/// Replaces everything between `start` and `end` (markers included) with
/// `block`, or returns the input unchanged when either marker is missing.
fn splice_between(html: String, start: &str, end: &str, block: &str) -> String {
    let Some(start_at) = html.find(start) else {
        return html;
    };
    let tail = &html[start_at..];
    let Some(end_rel) = tail.find(end) else {
        return html;
    };
    let after = start_at + end_rel + end.len();
    format!("{}{}{}", &html[..start_at], block, &html[after..])
}

/// Applies all four replacements to `html`, embedding `atlas_json` as the
/// inlined combined atlas. Re-running with the same JSON payload yields a
/// byte-identical document.
pub fn patch_html(html: &str, atlas_json: &str) -> String {
    // The blocks end at the END marker itself: whatever followed the marker
    // in the document (usually a newline) is preserved by the splice, so a
    // second patch reproduces the first one byte for byte.
    let sheets_block = format!(
        "{SHEETS_START}\n<!-- External sheet: assets/flat-sprites.webp -->\n{SHEETS_END}"
    );
    let atlas_block = format!(
        "{ATLASES_START}\n<script id=\"atlasFlat\" type=\"application/json\">\n{atlas_json}\n</script>\n{ATLASES_END}"
    );

    let mut html = splice_between(html.to_owned(), SHEETS_START, SHEETS_END, &sheets_block);
    html = splice_between(html, ATLASES_START, ATLASES_END, &atlas_block);
    html = html.replace(ATLAS_LOOKUP_OLD, ATLAS_LOOKUP_NEW);
    html.replace(SHEET_SRC_OLD, SHEET_SRC_NEW)
}

/// Patches the document at `path` in place.
pub fn patch_html_file(path: &Path, atlas_json: &str) -> Result<()> {
    let html = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read html {}: {e}", path.display()))?;
    fs::write(path, patch_html(&html, atlas_json))
        .map_err(|e| anyhow::anyhow!("write html {}: {e}", path.display()))?;
    Ok(())
}
