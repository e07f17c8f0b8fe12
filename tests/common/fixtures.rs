//! Test fixtures: generated source images and paths.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{ImageFormat, RgbImage, RgbaImage};

/// Output file names used by every test.
pub mod names {
    pub const SOURCE_PNG: &str = "source.png";
    pub const SOURCE_JPG: &str = "source.jpg";
    pub const IMAGE_OUT: &str = "background.img";
    pub const PALETTE_OUT: &str = "background.pal";
}

/// Path of the built bgpack binary.
pub fn bgpack_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bgpack"))
}

/// A bgpack command with no config picked up from the environment.
pub fn bgpack() -> Command {
    let mut command = Command::new(bgpack_bin());
    command.env_remove("BGPACK_CONFIG");
    command.env("RUST_LOG", "bgpack=warn");
    command
}

/// Pixel of a smooth synthetic "photo": gradients plus a diagonal pattern.
pub fn photo_pixel(x: u32, y: u32, width: u32, height: u32) -> [u8; 4] {
    [
        (x * 255 / (width - 1)) as u8,
        (y * 255 / (height - 1)) as u8,
        (((x + 2 * y) * 3) % 256) as u8,
        255,
    ]
}

/// Write a `width` x `height` photo-like PNG.
pub fn write_photo_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join(names::SOURCE_PNG);
    let image = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba(photo_pixel(x, y, width, height))
    });
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Write a PNG made of horizontal bands of the given colors.
pub fn write_banded_png(dir: &Path, width: u32, height: u32, colors: &[[u8; 4]]) -> PathBuf {
    let path = dir.join(names::SOURCE_PNG);
    let band = height.div_ceil(colors.len() as u32);
    let image = RgbaImage::from_fn(width, height, |_, y| {
        image::Rgba(colors[(y / band) as usize % colors.len()])
    });
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Write a PNG where every pixel is a different color.
pub fn write_unique_colors_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join(names::SOURCE_PNG);
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let i = y * width + x;
        image::Rgba([(i & 0xFF) as u8, ((i >> 8) & 0xFF) as u8, 7, 255])
    });
    image.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

/// Write an RGB JPEG (no alpha channel).
pub fn write_photo_jpeg(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join(names::SOURCE_JPG);
    let image = RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, _] = photo_pixel(x, y, width, height);
        image::Rgb([r, g, b])
    });
    image.save_with_format(&path, ImageFormat::Jpeg).unwrap();
    path
}

/// Standard output paths inside `dir`.
pub fn output_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(names::IMAGE_OUT), dir.join(names::PALETTE_OUT))
}
