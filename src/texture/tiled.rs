//! Linear RGBA <-> tiled texture conversion.
//!
//! Encoding walks tiles in row-major order and the 64 positions inside each
//! tile in Morton-index order, so the output is exactly the byte stream the
//! GPU expects. Decoding is the inverse walk. Both take the vertical flip
//! as an explicit parameter: some banner templates store textures bottom-up
//! and some top-down, and which is which is a property of the call site,
//! never inferred from the data.

use crate::texture::{PixelFormat, TILE_DIM, etc1, morton_index};
use crate::{Error, Result};

/// Encode a linear RGBA8 raster into the tiled layout of `format`.
///
/// `raster` is 4 bytes per pixel, row-major from the top-left; its length
/// must be exactly `width * height * 4` and both dimensions must be
/// multiples of 8, else [`Error::BadDimensions`]. With `flip` set, source
/// rows are read bottom-up.
///
/// [`PixelFormat::Etc1`] cannot encode arbitrary rasters; use
/// [`etc1::solid_fill`] for the uniform fills it supports.
pub fn encode(
    raster: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
    flip: bool,
) -> Result<Vec<u8>> {
    check_dims(width, height)?;
    if raster.len() != width * height * 4 {
        return Err(Error::BadDimensions);
    }
    if format == PixelFormat::Etc1 {
        return Err(Error::Parse("ETC1 encodes solid fills only"));
    }

    let bpp = format.bytes_per_pixel();
    let mut out = vec![0u8; width * height * bpp];
    let tiles_x = width / TILE_DIM;

    for ty in 0..height / TILE_DIM {
        for tx in 0..tiles_x {
            let tile_base = (ty * tiles_x + tx) * TILE_DIM * TILE_DIM * bpp;
            for py in 0..TILE_DIM {
                for px in 0..TILE_DIM {
                    let x = tx * TILE_DIM + px;
                    let y = ty * TILE_DIM + py;
                    let src_y = if flip { height - 1 - y } else { y };
                    let src = (src_y * width + x) * 4;
                    let (r, g, b, a) =
                        (raster[src], raster[src + 1], raster[src + 2], raster[src + 3]);

                    let dst = tile_base + morton_index(px, py) * bpp;
                    match format {
                        PixelFormat::Rgba8 => {
                            out[dst] = a;
                            out[dst + 1] = b;
                            out[dst + 2] = g;
                            out[dst + 3] = r;
                        }
                        PixelFormat::La8 => {
                            out[dst] = a;
                            out[dst + 1] =
                                ((r as u16 + g as u16 + b as u16) / 3) as u8;
                        }
                        PixelFormat::Rgb565 => {
                            let packed = (r as u16 >> 3) << 11
                                | (g as u16 >> 2) << 5
                                | b as u16 >> 3;
                            out[dst..dst + 2].copy_from_slice(&packed.to_le_bytes());
                        }
                        PixelFormat::Etc1 => unreachable!(),
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Decode a tiled texture at `offset` within `data` back to a linear RGBA8
/// raster.
///
/// Reads past the end of `data` decode as transparent black instead of
/// failing; template blobs occasionally carry regions whose tail is cut
/// short by the next header offset. With `flip` set, rows are written
/// bottom-up (undoing an encode with the same flag).
///
/// For [`PixelFormat::Etc1`] the single block at `offset` is decoded as a
/// uniform color filling the whole raster, matching the solid-fill encoder.
pub fn decode(
    data: &[u8],
    offset: usize,
    width: usize,
    height: usize,
    format: PixelFormat,
    flip: bool,
) -> Result<Vec<u8>> {
    check_dims(width, height)?;

    let mut out = vec![0u8; width * height * 4];

    if format == PixelFormat::Etc1 {
        let block: [u8; 8] = match data.get(offset..offset + 8) {
            Some(b) => b.try_into().unwrap(),
            None => return Ok(out),
        };
        let (r, g, b) = etc1::solid_color(&block);
        for px in out.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
        return Ok(out);
    }

    let bpp = format.bytes_per_pixel();
    let tiles_x = width / TILE_DIM;

    for ty in 0..height / TILE_DIM {
        for tx in 0..tiles_x {
            let tile_base = offset + (ty * tiles_x + tx) * TILE_DIM * TILE_DIM * bpp;
            for py in 0..TILE_DIM {
                for px in 0..TILE_DIM {
                    let src = tile_base + morton_index(px, py) * bpp;
                    let (r, g, b, a) = match (format, data.get(src..src + bpp)) {
                        (_, None) => (0, 0, 0, 0),
                        (PixelFormat::Rgba8, Some(p)) => (p[3], p[2], p[1], p[0]),
                        (PixelFormat::La8, Some(p)) => (p[1], p[1], p[1], p[0]),
                        (PixelFormat::Rgb565, Some(p)) => {
                            let v = u16::from_le_bytes([p[0], p[1]]);
                            (
                                ((v >> 11 & 0x1F) << 3) as u8,
                                ((v >> 5 & 0x3F) << 2) as u8,
                                ((v & 0x1F) << 3) as u8,
                                255,
                            )
                        }
                        (PixelFormat::Etc1, _) => unreachable!(),
                    };

                    let x = tx * TILE_DIM + px;
                    let y = ty * TILE_DIM + py;
                    let dst_y = if flip { height - 1 - y } else { y };
                    let dst = (dst_y * width + x) * 4;
                    out[dst] = r;
                    out[dst + 1] = g;
                    out[dst + 2] = b;
                    out[dst + 3] = a;
                }
            }
        }
    }

    Ok(out)
}

fn check_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width % TILE_DIM != 0 || height % TILE_DIM != 0 {
        return Err(Error::BadDimensions);
    }
    Ok(())
}
