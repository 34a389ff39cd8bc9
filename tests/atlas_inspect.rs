use std::fs;
use std::path::Path;

use flat_atlas::inspect;
use serde_json::json;

fn out_frame(x: u32, y: u32, w: u32, h: u32) -> serde_json::Value {
    json!({
        "frame": {"x": x, "y": y, "w": w, "h": h},
        "rotated": false,
        "trimmed": false,
        "spriteSourceSize": {"x": 0, "y": 0, "w": w, "h": h},
        "sourceSize": {"w": w, "h": h},
        "anchor": {"x": 0.5, "y": 0.5}
    })
}

fn write_atlas(dir: &Path, frames: serde_json::Value, w: u32, h: u32) -> std::path::PathBuf {
    let doc = json!({
        "frames": frames,
        "meta": {
            "app": "flat-atlas",
            "version": "1.0",
            "image": "flat-sprites.webp",
            "format": "RGBA8888",
            "size": {"w": w, "h": h},
            "scale": "1"
        }
    });
    let path = dir.join("flat-sprites.json");
    fs::write(&path, doc.to_string()).unwrap();
    path
}

#[test]
fn clean_atlas_passes_geometry_checks() {
    let dir = tempfile::tempdir().unwrap();
    let frames = json!({
        "a": out_frame(2, 2, 10, 10),
        "b": out_frame(16, 2, 8, 4),
    });
    let path = write_atlas(dir.path(), frames, 32, 16);

    let report = inspect(&path, None).unwrap();
    assert_eq!(report.frame_count, 2);
    assert_eq!(report.sheet_dim, (32, 16));
    assert_eq!(report.overlaps, 0);
    assert_eq!(report.out_of_bounds, 0);
    assert!(report.occupancy > 0.0 && report.occupancy < 1.0);
}

#[test]
fn overlapping_and_escaping_frames_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let frames = json!({
        "a": out_frame(0, 0, 10, 10),
        "b": out_frame(5, 5, 10, 10),
        "c": out_frame(30, 0, 8, 8),
    });
    let path = write_atlas(dir.path(), frames, 32, 16);

    let report = inspect(&path, None).unwrap();
    assert_eq!(report.overlaps, 1);
    assert_eq!(report.out_of_bounds, 1);
}

#[test]
fn corrupt_coordinates_near_u32_max_register_out_of_bounds() {
    // x + w would wrap a u32; the check must flag the frame, not overflow.
    let dir = tempfile::tempdir().unwrap();
    let frames = json!({
        "bad": out_frame(u32::MAX - 1, 0, 16, 16),
        "worse": out_frame(0, u32::MAX, 4, u32::MAX),
    });
    let path = write_atlas(dir.path(), frames, 64, 64);

    let report = inspect(&path, None).unwrap();
    assert_eq!(report.out_of_bounds, 2);
    assert_eq!(report.frame_count, 2);
}
