use std::path::PathBuf;

use indexed_pack::{BitDepth, PackedBitmap, PaletteFormat, PixelOrder};

use crate::error::ConvertError;
use crate::services::output::write_file;

/// An output pair to read back and the PNG to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub image_path: PathBuf,
    pub palette_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bit_depth: BitDepth,
    pub palette_format: PaletteFormat,
    pub pixel_order: PixelOrder,
    pub output: PathBuf,
}

/// Render an image/palette pair as an indexed PNG for inspection.
///
/// Fails with `InvalidAssets` if the bitmap length does not match the
/// dimensions, the palette is malformed or larger than the depth allows,
/// or any index points past the end of the palette.
pub fn render_preview(request: &PreviewRequest) -> Result<(), ConvertError> {
    if request.width == 0 || request.height == 0 {
        return Err(ConvertError::InvalidDimensions {
            width: request.width,
            height: request.height,
        });
    }
    let image_data = std::fs::read(&request.image_path)
        .map_err(|e| ConvertError::io(&request.image_path, e))?;
    let palette_data = std::fs::read(&request.palette_path)
        .map_err(|e| ConvertError::io(&request.palette_path, e))?;

    let colors = request
        .palette_format
        .decode(&palette_data)
        .map_err(|e| ConvertError::InvalidAssets(e.to_string()))?;
    let capacity = request.bit_depth.capacity();
    if colors.is_empty() || colors.len() > capacity {
        return Err(ConvertError::InvalidAssets(format!(
            "palette has {} entries, a {}-bit image needs 1 to {capacity}",
            colors.len(),
            request.bit_depth.bits()
        )));
    }

    let bitmap = PackedBitmap::from_bytes(
        image_data,
        request.width as usize,
        request.height as usize,
        request.bit_depth,
        request.pixel_order,
    )
    .map_err(|e| ConvertError::InvalidAssets(e.to_string()))?;
    if let Some(&index) = bitmap
        .unpack()
        .iter()
        .find(|&&index| index as usize >= colors.len())
    {
        return Err(ConvertError::InvalidAssets(format!(
            "index {index} is past the end of a {}-entry palette",
            colors.len()
        )));
    }

    // PNG packs the leftmost pixel into the high bits.
    let packed = bitmap.repack(PixelOrder::HighFirst).into_bytes();
    let plte: Vec<u8> = colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    let trns: Vec<u8> = colors.iter().map(|c| c.a).collect();

    let mut png_data = Vec::new();
    let mut encoder = png::Encoder::new(&mut png_data, request.width, request.height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png_depth(request.bit_depth));
    encoder.set_palette(plte);
    if trns.iter().any(|&a| a != 255) {
        encoder.set_trns(trns);
    }
    let mut writer = encoder
        .write_header()
        .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    writer
        .write_image_data(&packed)
        .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    write_file(&request.output, &png_data)?;

    tracing::info!(
        output = %request.output.display(),
        colors = colors.len(),
        "Wrote preview"
    );
    Ok(())
}

fn png_depth(depth: BitDepth) -> png::BitDepth {
    match depth {
        BitDepth::One => png::BitDepth::One,
        BitDepth::Two => png::BitDepth::Two,
        BitDepth::Four => png::BitDepth::Four,
        BitDepth::Eight => png::BitDepth::Eight,
    }
}
