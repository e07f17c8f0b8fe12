//! Domain-critical regression tests for indexed-pack.
//!
//! Each test documents the class of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::{EncodeError, IndexedEncoder};
    use crate::color::Rgba;
    use crate::output::{BitDepth, PackedBitmap, PixelOrder};
    use crate::palette::PaletteFormat;
    use crate::preprocess::{resample, CanonicalImage, ResizeMode, SourceImage};

    fn gradient_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(&[
                    (x * 255 / (width - 1)) as u8,
                    (y * 255 / (height - 1)) as u8,
                    ((x ^ y) & 0xFF) as u8,
                    255,
                ]);
            }
        }
        bytes
    }

    fn gradient(width: u32, height: u32) -> CanonicalImage {
        let pixels = gradient_bytes(width, height)
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect();
        CanonicalImage::new(width, height, pixels).unwrap()
    }

    // ========================================================================
    // Output size and palette bound for the menu background
    // ========================================================================

    /// If this breaks, it means: the standard 640x480 photo path no longer
    /// yields a full 16-entry palette and a 38,400-byte 4-bit bitmap.
    #[test]
    fn test_photo_to_background() {
        let source = SourceImage::from_rgba(640, 480, gradient_bytes(640, 480)).unwrap();
        let canonical =
            resample(&source, 320, 240, ResizeMode::Stretch, Rgba::TRANSPARENT).unwrap();
        let assets = IndexedEncoder::new(BitDepth::Four)
            .quantize_count(16)
            .encode(&canonical)
            .unwrap();

        assert_eq!(assets.bitmap.as_bytes().len(), 38_400);
        assert_eq!(assets.palette.len(), 16);
        assert_eq!(assets.palette_bytes.len(), 16 * 4);
    }

    /// If this breaks, it means: an image that already fits the palette is
    /// being averaged instead of reproduced exactly.
    #[test]
    fn test_three_color_image_is_exact() {
        let colors = [
            Rgba::opaque(200, 30, 30),
            Rgba::opaque(30, 200, 30),
            Rgba::opaque(30, 30, 200),
        ];
        let pixels = (0..320 * 240).map(|i| colors[(i / 320) % 3]).collect();
        let image = CanonicalImage::new(320, 240, pixels).unwrap();
        let assets = IndexedEncoder::new(BitDepth::Four).encode(&image).unwrap();

        assert_eq!(assets.palette.entries(), &colors);
        let indexed = assets.bitmap.unpack();
        for (i, &index) in indexed.iter().enumerate() {
            assert_eq!(index as usize, (i / 320) % 3, "pixel {i}");
        }
    }

    // ========================================================================
    // Capacity bounds at every depth
    // ========================================================================

    /// If this breaks, it means: some depth can emit more palette entries
    /// than it can address, or an index past the end of the palette.
    #[test]
    fn test_palette_fits_every_depth() {
        let image = gradient(32, 32);
        for depth in BitDepth::ALL {
            let encoder = IndexedEncoder::new(depth).quantize_count(depth.capacity());
            let indexed = encoder.index(&image).unwrap();
            assert!(indexed.palette().len() <= depth.capacity(), "depth {depth}");
            assert!(
                indexed
                    .indices()
                    .iter()
                    .all(|&i| (i as usize) < indexed.palette().len()),
                "depth {depth}"
            );
            let bitmap = encoder.encode(&image).unwrap().bitmap;
            assert_eq!(bitmap.as_bytes().len(), depth.stride(32) * 32);
        }
    }

    /// If this breaks, it means: disabling quantization silently truncates
    /// the palette instead of reporting an overflow.
    #[test]
    fn test_unquantized_overflow() {
        let image = gradient(20, 20);
        let err = IndexedEncoder::new(BitDepth::Four)
            .quantize_count(0)
            .encode(&image)
            .unwrap_err();
        assert!(
            matches!(err, EncodeError::PaletteOverflow { capacity: 16, .. }),
            "got {err:?}"
        );
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// If this breaks, it means: hash iteration order or some other
    /// non-deterministic input leaked into the palette or the bitmap.
    #[test]
    fn test_repeated_encodes_are_identical() {
        let image = gradient(64, 48);
        let encoder = IndexedEncoder::new(BitDepth::Four).palette_format(PaletteFormat::Psx16);
        let first = encoder.encode(&image).unwrap();
        for _ in 0..3 {
            let again = encoder.encode(&image).unwrap();
            assert_eq!(again.bitmap.as_bytes(), first.bitmap.as_bytes());
            assert_eq!(again.palette_bytes, first.palette_bytes);
        }
    }

    /// If this breaks, it means: the palette is no longer ordered by first
    /// use, so index 0 is not the top-left pixel.
    #[test]
    fn test_top_left_pixel_is_index_zero() {
        let image = gradient(40, 40);
        let assets = IndexedEncoder::new(BitDepth::Four).encode(&image).unwrap();
        assert_eq!(assets.bitmap.index_at(0, 0), Some(0));
        assert_eq!(assets.bitmap.as_bytes()[0] & 0x0F, 0);
    }

    // ========================================================================
    // Transparency
    // ========================================================================

    /// If this breaks, it means: transparent pixels are being merged into
    /// opaque clusters, so the background loses its cut-out regions.
    #[test]
    fn test_transparent_region_keeps_transparent_entry() {
        let mut pixels = Vec::new();
        for y in 0..32u32 {
            for x in 0..32u32 {
                if x < 16 {
                    pixels.push(Rgba::TRANSPARENT);
                } else {
                    pixels.push(Rgba::opaque(
                        100 + (x * 3) as u8,
                        100 + (y * 3) as u8,
                        150,
                    ));
                }
            }
        }
        let image = CanonicalImage::new(32, 32, pixels.clone()).unwrap();
        let indexed = IndexedEncoder::new(BitDepth::Two).index(&image).unwrap();
        let entries = indexed.palette().entries();

        for (pixel, &index) in pixels.iter().zip(indexed.indices()) {
            let entry = entries[index as usize];
            if pixel.is_transparent() {
                assert_eq!(entry, Rgba::TRANSPARENT);
            } else {
                assert_eq!(entry.a, 255, "opaque pixel mapped to {entry}");
            }
        }
    }

    /// If this breaks, it means: psx16 no longer reserves 0x0000 for
    /// transparency or opaque black lost its STP bit.
    #[test]
    fn test_psx16_transparent_and_black() {
        let pixels = vec![Rgba::TRANSPARENT, Rgba::opaque(0, 0, 0)];
        let image = CanonicalImage::new(2, 1, pixels).unwrap();
        let assets = IndexedEncoder::new(BitDepth::One)
            .palette_format(PaletteFormat::Psx16)
            .encode(&image)
            .unwrap();
        assert_eq!(assets.palette_bytes, vec![0x00, 0x00, 0x00, 0x80]);

        let decoded = PaletteFormat::Psx16.decode(&assets.palette_bytes).unwrap();
        assert_eq!(decoded, vec![Rgba::TRANSPARENT, Rgba::opaque(0, 0, 0)]);
    }

    // ========================================================================
    // Packing conventions
    // ========================================================================

    /// If this breaks, it means: the two in-byte orders are no longer
    /// mirror images of each other.
    #[test]
    fn test_orders_differ_only_within_bytes() {
        let image = gradient(33, 7);
        let low = IndexedEncoder::new(BitDepth::Four).encode(&image).unwrap();
        let high = IndexedEncoder::new(BitDepth::Four)
            .pixel_order(PixelOrder::HighFirst)
            .encode(&image)
            .unwrap();

        assert_eq!(low.palette_bytes, high.palette_bytes);
        assert_eq!(low.bitmap.unpack(), high.bitmap.unpack());
        for (a, b) in low.bitmap.as_bytes().iter().zip(high.bitmap.as_bytes()) {
            assert_eq!(a.rotate_left(4), *b);
        }
        let reread = PackedBitmap::from_bytes(
            high.bitmap.as_bytes().to_vec(),
            33,
            7,
            BitDepth::Four,
            PixelOrder::HighFirst,
        )
        .unwrap();
        assert_eq!(reread.repack(PixelOrder::LowFirst), low.bitmap);
    }

    /// If this breaks, it means: rows with a partial final byte leak bits
    /// from the next row or leave garbage in the padding.
    #[test]
    fn test_odd_width_padding_bits_are_zero() {
        let image = gradient(9, 3);
        let assets = IndexedEncoder::new(BitDepth::One)
            .pixel_order(PixelOrder::HighFirst)
            .encode(&image)
            .unwrap();
        let bytes = assets.bitmap.as_bytes();
        assert_eq!(bytes.len(), 2 * 3);
        for row in bytes.chunks(2) {
            assert_eq!(row[1] & 0x7F, 0);
        }
    }
}
