//! Raster loading and fitting helpers (requires the `raster` feature).
//!
//! The codec layers only ever see linear RGBA8 buffers; this module covers
//! the step before that, turning PNG bytes into such a buffer and sizing
//! arbitrary artwork to a texture slot's fixed dimensions. Both fitting
//! modes preserve aspect ratio:
//!
//! * [`resize_fit`] - scale down to fit entirely inside the target,
//!   centered on a background (letterboxed); used for cartridge labels.
//! * [`resize_cover`] - scale up to cover the target and center-crop;
//!   used for footer artwork.

#![cfg(feature = "raster")]

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::{Error, Result};

/// Decode PNG bytes into a linear RGBA8 buffer plus dimensions.
pub fn from_png(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|_| Error::Parse("PNG decode failed"))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w, h))
}

/// Encode a linear RGBA8 buffer as PNG, for previews of decoded textures.
pub fn to_png(raster: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(width, height, raster.to_vec())
        .ok_or(Error::BadDimensions)?;
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|_| Error::Parse("PNG encode failed"))?;
    Ok(out.into_inner())
}

/// Scale `raster` to fit within `target_w` x `target_h` and center it on a
/// canvas of that size, filled with `background` (RGBA) or transparent.
pub fn resize_fit(
    raster: &[u8],
    width: u32,
    height: u32,
    target_w: u32,
    target_h: u32,
    background: Option<[u8; 4]>,
) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(width, height, raster.to_vec())
        .ok_or(Error::BadDimensions)?;

    let scale = f64::min(target_w as f64 / width as f64, target_h as f64 / height as f64);
    let new_w = ((width as f64 * scale) as u32).max(1);
    let new_h = ((height as f64 * scale) as u32).max(1);
    let scaled = imageops::resize(&img, new_w, new_h, FilterType::Lanczos3);

    let fill = Rgba(background.unwrap_or([0, 0, 0, 0]));
    let mut canvas = RgbaImage::from_pixel(target_w, target_h, fill);
    let x = (target_w - new_w) / 2;
    let y = (target_h - new_h) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

    Ok(canvas.into_raw())
}

/// Scale `raster` to cover `target_w` x `target_h` entirely, then
/// center-crop to the target size.
pub fn resize_cover(
    raster: &[u8],
    width: u32,
    height: u32,
    target_w: u32,
    target_h: u32,
) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(width, height, raster.to_vec())
        .ok_or(Error::BadDimensions)?;

    let scale = f64::max(target_w as f64 / width as f64, target_h as f64 / height as f64);
    let new_w = ((width as f64 * scale).ceil() as u32).max(target_w);
    let new_h = ((height as f64 * scale).ceil() as u32).max(target_h);
    let scaled = imageops::resize(&img, new_w, new_h, FilterType::Lanczos3);

    let x = (new_w - target_w) / 2;
    let y = (new_h - target_h) / 2;
    let cropped = imageops::crop_imm(&scaled, x, y, target_w, target_h).to_image();

    Ok(cropped.into_raw())
}
