//! Tiled texture codec for the 3DS GPU pixel layouts.
//!
//! The PICA200 stores textures as row-major 8x8 pixel tiles; within each
//! tile, pixels are laid out along a Z-order (Morton) curve rather than
//! row-major. [`tiled`] converts between that layout and plain linear RGBA8
//! rasters; [`etc1`] builds the restricted solid-color ETC1 blocks used to
//! recolor template shells.
//!
//! ## Supported pixel formats
//!
//! | Format | Bytes/pixel | Stored as |
//! |--------|-------------|-----------|
//! | [`PixelFormat::Rgba8`]  | 4 | A, B, G, R |
//! | [`PixelFormat::La8`]    | 2 | alpha, luminance |
//! | [`PixelFormat::Rgb565`] | 2 | `(r5<<11)\|(g6<<5)\|b5`, little-endian |
//! | [`PixelFormat::Etc1`]   | - | 8 bytes per 4x4 block, solid fills only |

pub mod etc1;
pub mod tiled;

/// Pixel storage formats used by banner and boot-splash textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit RGBA, stored as ABGR.
    Rgba8,
    /// 8-bit luminance + 8-bit alpha, stored as alpha then luminance.
    La8,
    /// Packed 5:6:5 RGB, little-endian, no alpha.
    Rgb565,
    /// ETC1 block compression, restricted here to uniform solid fills.
    Etc1,
}

impl PixelFormat {
    /// Bytes per pixel for the per-pixel formats.
    ///
    /// # Panics
    /// Panics for [`PixelFormat::Etc1`], which has no per-pixel stride;
    /// use [`PixelFormat::byte_len`] instead.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::La8 | PixelFormat::Rgb565 => 2,
            PixelFormat::Etc1 => panic!("ETC1 is block-compressed"),
        }
    }

    /// Encoded byte length of a `width` x `height` texture in this format.
    ///
    /// ETC1 packs 4x4 pixels into 8 bytes (half a byte per pixel).
    pub fn byte_len(self, width: usize, height: usize) -> usize {
        match self {
            PixelFormat::Etc1 => width * height / 2,
            f => width * height * f.bytes_per_pixel(),
        }
    }

    /// Format code used by the BCLIM `imag` section for this format.
    pub fn bclim_code(self) -> u32 {
        match self {
            PixelFormat::La8 => 3,
            PixelFormat::Rgb565 => 5,
            PixelFormat::Rgba8 => 9,
            PixelFormat::Etc1 => 10,
        }
    }

    /// Inverse of [`PixelFormat::bclim_code`] for the formats this library
    /// handles.
    pub fn from_bclim_code(code: u32) -> Option<Self> {
        match code {
            3 => Some(PixelFormat::La8),
            5 => Some(PixelFormat::Rgb565),
            9 => Some(PixelFormat::Rgba8),
            10 => Some(PixelFormat::Etc1),
            _ => None,
        }
    }
}

/// Side length of a tile, in pixels. All texture dimensions must be
/// multiples of this.
pub const TILE_DIM: usize = 8;

/// Morton (Z-order) index of tile-local coordinates `(x, y)`, both in 0..8.
///
/// Interleaves the low three bits of each coordinate, x taking the even bit
/// positions:
///
/// ```
/// assert_eq!(bannerkit::texture::morton_index(0, 0), 0);
/// assert_eq!(bannerkit::texture::morton_index(1, 0), 1);
/// assert_eq!(bannerkit::texture::morton_index(0, 1), 2);
/// assert_eq!(bannerkit::texture::morton_index(7, 7), 63);
/// ```
#[inline]
pub fn morton_index(x: usize, y: usize) -> usize {
    (x & 1) | (y & 1) << 1 | (x & 2) << 1 | (y & 2) << 2 | (x & 4) << 2 | (y & 4) << 3
}
