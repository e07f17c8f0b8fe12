//! Assertion helpers for tests.

use std::path::Path;

use indexed_pack::{BitDepth, PackedBitmap, PixelOrder};
use pretty_assertions::assert_eq;

/// Assert that neither output of a pair exists
pub fn assert_no_outputs(image: &Path, palette: &Path) {
    assert!(
        !image.exists(),
        "Image output {} should not exist",
        image.display()
    );
    assert!(
        !palette.exists(),
        "Palette output {} should not exist",
        palette.display()
    );
}

/// Assert that `dir` holds only the listed files (no leftover temp files)
pub fn assert_dir_contains_only(dir: &Path, expected: &[&str]) {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected, "Unexpected files in {}", dir.display());
}

/// Assert the image file is a well-formed bitmap whose indices all fall
/// inside a palette of `palette_entries` entries. Returns the indices.
pub fn assert_valid_bitmap(
    image_data: &[u8],
    width: usize,
    height: usize,
    bit_depth: BitDepth,
    palette_entries: usize,
) -> Vec<u8> {
    assert_eq!(
        image_data.len(),
        bit_depth.stride(width) * height,
        "Image data length for {width}x{height} at {bit_depth} bits"
    );
    let bitmap = PackedBitmap::from_bytes(
        image_data.to_vec(),
        width,
        height,
        bit_depth,
        PixelOrder::LowFirst,
    )
    .unwrap();
    let indices = bitmap.unpack();
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= palette_entries) {
        panic!("Index {bad} is out of range for a {palette_entries}-entry palette");
    }
    indices
}
