//! Frame extraction: crop, de-rotate, and re-anchor sprites out of their
//! source sheets so every sprite becomes a standalone RGBA image at its
//! original untrimmed size.

use anyhow::{bail, Result};
use image::{imageops, RgbaImage};

use crate::atlas::FrameRecord;

/// Extracts one sprite from `sheet` per its atlas record.
///
/// The returned image is `sourceSize` large, fully transparent except for the
/// sprite pixels copied at the `spriteSourceSize` offset. Rotated frames are
/// stored in the sheet with width/height swapped; a counter-clockwise quarter
/// turn restores the logical orientation (the convention of the packer that
/// produced the input atlases).
pub fn extract_sprite(sheet: &RgbaImage, record: &FrameRecord) -> Result<RgbaImage> {
    let fr = record.frame;
    let (crop_w, crop_h) = if record.rotated { (fr.h, fr.w) } else { (fr.w, fr.h) };

    if fr.x as u64 + crop_w as u64 > sheet.width() as u64
        || fr.y as u64 + crop_h as u64 > sheet.height() as u64
    {
        bail!(
            "frame box {}x{}+{}+{} exceeds sheet bounds {}x{}",
            crop_w,
            crop_h,
            fr.x,
            fr.y,
            sheet.width(),
            sheet.height()
        );
    }

    let crop = imageops::crop_imm(sheet, fr.x, fr.y, crop_w, crop_h).to_image();
    let crop = if record.rotated { imageops::rotate270(&crop) } else { crop };

    let sss = record.sprite_source_size();
    let src = record.source_size();
    let mut canvas = RgbaImage::new(src.w, src.h);
    // Plain pixel copy, not alpha compositing: the canvas is fully transparent
    // and the crop's own alpha must survive untouched.
    imageops::replace(&mut canvas, &crop, sss.x as i64, sss.y as i64);
    Ok(canvas)
}
