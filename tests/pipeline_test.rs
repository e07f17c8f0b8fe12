//! End-to-end tests of the conversion pipeline with the built-in encoder.

mod common;

use bgpack::error::ConvertError;
use bgpack::models::{ConversionOptions, ConversionParams, EncodeParams};
use bgpack::services::ConversionPipeline;
use common::fixtures::{self, names};
use indexed_pack::{BitDepth, PaletteFormat, ResizeMode, Rgba};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn params(dir: &TempDir, source: std::path::PathBuf, width: u32, height: u32) -> ConversionParams {
    let (image_out, palette_out) = fixtures::output_paths(dir.path());
    ConversionParams {
        width,
        height,
        bit_depth: 4,
        quantize: 16,
        source,
        image_out,
        palette_out,
    }
}

#[test]
fn test_photo_to_320x240_4bit() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_photo_png(dir.path(), 640, 480);
    let params = params(&dir, source, 320, 240);

    let pipeline = ConversionPipeline::in_process(ConversionOptions::default());
    let report = pipeline.run(&params).unwrap();

    assert_eq!(report.width, 320);
    assert_eq!(report.height, 240);
    assert_eq!(report.palette_entries, 16);
    assert_eq!(report.image_bytes, 38_400);
    assert_eq!(report.palette_bytes, 64);

    let image_data = std::fs::read(&params.image_out).unwrap();
    let palette_data = std::fs::read(&params.palette_out).unwrap();
    assert_eq!(image_data.len(), 38_400);
    assert_eq!(palette_data.len(), 64);
    common::assert_valid_bitmap(&image_data, 320, 240, BitDepth::Four, 16);
    common::assert_dir_contains_only(
        dir.path(),
        &[names::SOURCE_PNG, names::IMAGE_OUT, names::PALETTE_OUT],
    );
}

#[test]
fn test_three_colors_unquantized() {
    let dir = TempDir::new().unwrap();
    let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];
    // Bands of rows 0-2, 3-5 and 6-7
    let source = fixtures::write_banded_png(dir.path(), 8, 8, &colors);
    let mut params = params(&dir, source, 8, 8);
    params.quantize = 0;

    let report = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap();
    assert_eq!(report.palette_entries, 3);

    let palette = PaletteFormat::Rgba8888
        .decode(&std::fs::read(&params.palette_out).unwrap())
        .unwrap();
    let expected: Vec<Rgba> = colors
        .iter()
        .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
        .collect();
    assert_eq!(palette, expected);

    let image_data = std::fs::read(&params.image_out).unwrap();
    assert_eq!(image_data.len(), 32);
    let indices = common::assert_valid_bitmap(&image_data, 8, 8, BitDepth::Four, 3);
    // Indices follow first-seen order
    for (row, chunk) in indices.chunks(8).enumerate() {
        assert!(chunk.iter().all(|&i| i as usize == row / 3), "row {row}");
    }
}

#[test]
fn test_zero_width_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_photo_png(dir.path(), 16, 16);
    let params = params(&dir, source, 0, 240);

    let err = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::InvalidDimensions {
            width: 0,
            height: 240
        }
    ));
    common::assert_no_outputs(&params.image_out, &params.palette_out);
}

#[test]
fn test_overflow_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_unique_colors_png(dir.path(), 8, 8);
    let mut params = params(&dir, source, 8, 8);
    params.quantize = 0;

    let err = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::PaletteOverflow {
            distinct: 64,
            bit_depth: 4,
            capacity: 16
        }
    ));
    common::assert_no_outputs(&params.image_out, &params.palette_out);
    common::assert_dir_contains_only(dir.path(), &[names::SOURCE_PNG]);
}

#[test]
fn test_missing_source_is_decode_or_io_error() {
    let dir = TempDir::new().unwrap();
    let params = params(&dir, dir.path().join("missing.png"), 32, 32);

    let err = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap_err();
    assert!(
        matches!(err, ConvertError::Io { .. } | ConvertError::Decode { .. }),
        "unexpected error: {err}"
    );
    common::assert_no_outputs(&params.image_out, &params.palette_out);
}

#[test]
fn test_garbage_source_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("not-an-image.png");
    std::fs::write(&source, b"definitely not a png").unwrap();
    let params = params(&dir, source, 32, 32);

    let err = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap_err();
    assert!(matches!(err, ConvertError::Decode { .. }), "{err}");
    common::assert_no_outputs(&params.image_out, &params.palette_out);
}

#[test]
fn test_conversion_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let pipeline = ConversionPipeline::in_process(ConversionOptions::default());

    let mut outputs = Vec::new();
    for dir in [&first, &second] {
        let source = fixtures::write_photo_png(dir.path(), 200, 150);
        let params = params(dir, source, 96, 64);
        pipeline.run(&params).unwrap();
        outputs.push((
            std::fs::read(&params.image_out).unwrap(),
            std::fs::read(&params.palette_out).unwrap(),
        ));
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_every_bit_depth() {
    let pipeline = ConversionPipeline::in_process(ConversionOptions::default());
    for depth in BitDepth::ALL {
        let dir = TempDir::new().unwrap();
        let source = fixtures::write_photo_png(dir.path(), 64, 48);
        let mut params = params(&dir, source, 30, 20);
        params.bit_depth = depth.bits();
        params.quantize = depth.capacity();

        let report = pipeline.run(&params).unwrap();
        assert!(report.palette_entries <= depth.capacity());
        assert_eq!(report.image_bytes, depth.stride(30) * 20, "{depth}-bit");

        let image_data = std::fs::read(&params.image_out).unwrap();
        common::assert_valid_bitmap(&image_data, 30, 20, depth, report.palette_entries);
    }
}

#[test]
fn test_jpeg_source_is_opaque() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_photo_jpeg(dir.path(), 128, 96);
    let params = params(&dir, source, 64, 48);

    let report = ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap();
    assert_eq!(report.image_bytes, 32 * 48);

    let palette = PaletteFormat::Rgba8888
        .decode(&std::fs::read(&params.palette_out).unwrap())
        .unwrap();
    assert!(!palette.is_empty() && palette.len() <= 16);
    assert!(palette.iter().all(|c| c.a == 255));
}

#[test]
fn test_psx16_padded_palette() {
    let dir = TempDir::new().unwrap();
    let colors = [[0, 0, 0, 255], [255, 255, 255, 255]];
    let source = fixtures::write_banded_png(dir.path(), 4, 4, &colors);
    let mut params = params(&dir, source, 4, 4);
    params.quantize = 0;

    let options = ConversionOptions {
        palette_format: PaletteFormat::Psx16,
        pad_palette: true,
        ..ConversionOptions::default()
    };
    let report = ConversionPipeline::in_process(options).run(&params).unwrap();
    assert_eq!(report.palette_entries, 16);
    assert_eq!(report.palette_bytes, 32);

    let palette_data = std::fs::read(&params.palette_out).unwrap();
    // Opaque black keeps the STP bit, white is 0x7FFF, padding is zero
    assert_eq!(&palette_data[..4], &[0x00, 0x80, 0xFF, 0x7F]);
    assert!(palette_data[4..].iter().all(|&b| b == 0));
}

#[test]
fn test_fit_mode_pads_with_pad_color() {
    let dir = TempDir::new().unwrap();
    let colors = [[255, 0, 0, 255], [0, 0, 255, 255]];
    let source = fixtures::write_banded_png(dir.path(), 64, 32, &colors);
    let mut params = params(&dir, source, 32, 32);
    params.bit_depth = 8;
    params.quantize = 0;

    let pad = Rgba::new(255, 0, 255, 255);
    let options = ConversionOptions {
        resize_mode: ResizeMode::Fit,
        pad_color: pad,
        ..ConversionOptions::default()
    };
    ConversionPipeline::in_process(options).run(&params).unwrap();

    let palette = PaletteFormat::Rgba8888
        .decode(&std::fs::read(&params.palette_out).unwrap())
        .unwrap();
    assert_eq!(palette[0], pad);

    let image_data = std::fs::read(&params.image_out).unwrap();
    let indices = common::assert_valid_bitmap(&image_data, 32, 32, BitDepth::Eight, palette.len());
    // Letterbox rows above and below the 32x16 content
    assert!(indices[..32].iter().all(|&i| i == 0));
    assert!(indices[31 * 32..].iter().all(|&i| i == 0));
}

#[test]
fn test_encode_canonical_keeps_source_size() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_photo_png(dir.path(), 33, 7);
    let (image_out, palette_out) = fixtures::output_paths(dir.path());

    let report = ConversionPipeline::in_process(ConversionOptions::default())
        .encode_canonical_file(&EncodeParams {
            bit_depth: 2,
            quantize: 4,
            source,
            image_out: image_out.clone(),
            palette_out,
        })
        .unwrap();
    assert_eq!((report.width, report.height), (33, 7));
    assert_eq!(report.image_bytes, 9 * 7);
    assert_eq!(std::fs::read(&image_out).unwrap().len(), 9 * 7);
}

#[test]
fn test_replaces_existing_outputs() {
    let dir = TempDir::new().unwrap();
    let source = fixtures::write_photo_png(dir.path(), 32, 32);
    let params = params(&dir, source, 16, 16);
    std::fs::write(&params.image_out, b"stale").unwrap();
    std::fs::write(&params.palette_out, b"stale").unwrap();

    ConversionPipeline::in_process(ConversionOptions::default())
        .run(&params)
        .unwrap();

    assert_eq!(std::fs::read(&params.image_out).unwrap().len(), 8 * 16);
    assert_ne!(std::fs::read(&params.palette_out).unwrap(), b"stale");
}
