//! BCLIM - single tiled image with a trailing FLIM descriptor.
//!
//! Unlike most container headers, the descriptor sits at the *end* of the
//! file: raw tiled pixel data first, then a 0x28-byte trailer made of a
//! FLIM header and one `imag` section describing the image. Boot-splash
//! darc archives reference one BCLIM per screen.
//!
//! ## Trailer layout (0x28 bytes, after the pixel data)
//! ```text
//! [0x00] Magic "FLIM"         (4 bytes)
//! [0x04] BOM (0xFEFF)         (u16 LE)
//! [0x06] HeaderSize (0x14)    (u16 LE)
//! [0x08] Version (0x02)       (u32 LE)
//! [0x0C] TotalFileSize        (u32 LE) = pixel data + 0x28
//! [0x10] SectionCount (1)     (u32 LE)
//! [0x14] Magic "imag"         (4 bytes)
//! [0x18] SectionSize (0x10)   (u32 LE)
//! [0x1C] Width                (u16 LE)
//! [0x1E] Height               (u16 LE)
//! [0x20] Format code          (u32 LE, see PixelFormat::bclim_code)
//! [0x24] PixelDataSize        (u32 LE)
//! ```

use crate::texture::PixelFormat;
use crate::utils::{le_u16, le_u32, magic, push_u16, push_u32};
use crate::{Error, Result};

/// Size of the FLIM + imag trailer in bytes.
pub const TRAILER_SIZE: usize = 0x28;

const BOM: u16 = 0xFEFF;
const FLIM_HEADER_SIZE: u16 = 0x14;
const VERSION: u32 = 0x02;

/// A standalone tiled image: pixel payload plus its descriptor fields.
#[derive(Debug, Clone)]
pub struct Bclim {
    /// Tiled pixel data, laid out per [`crate::texture::tiled`].
    pub data: Vec<u8>,
    /// Image width in pixels.
    pub width: u16,
    /// Image height in pixels.
    pub height: u16,
    /// Pixel format of the payload.
    pub format: PixelFormat,
}

impl Bclim {
    /// Serialize as pixel data followed by the FLIM trailer.
    ///
    /// Fails with [`Error::BadDimensions`] if the payload length does not
    /// match the declared dimensions and format.
    pub fn build(&self) -> Result<Vec<u8>> {
        let expected = self.format.byte_len(self.width as usize, self.height as usize);
        if self.data.len() != expected {
            return Err(Error::BadDimensions);
        }

        let mut out = Vec::with_capacity(self.data.len() + TRAILER_SIZE);
        out.extend_from_slice(&self.data);

        out.extend_from_slice(b"FLIM");
        push_u16(&mut out, BOM);
        push_u16(&mut out, FLIM_HEADER_SIZE);
        push_u32(&mut out, VERSION);
        push_u32(&mut out, (self.data.len() + TRAILER_SIZE) as u32);
        push_u32(&mut out, 1); // section count

        out.extend_from_slice(b"imag");
        push_u32(&mut out, 0x10);
        push_u16(&mut out, self.width);
        push_u16(&mut out, self.height);
        push_u32(&mut out, self.format.bclim_code());
        push_u32(&mut out, self.data.len() as u32);

        Ok(out)
    }

    /// Parse a BCLIM buffer by reading the trailer off its end.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let trailer = data
            .len()
            .checked_sub(TRAILER_SIZE)
            .ok_or(Error::InvalidRange)?;

        magic(data, trailer, b"FLIM")?;
        if le_u16(data, trailer + 0x04)? != BOM {
            return Err(Error::Parse("invalid FLIM BOM"));
        }
        if le_u16(data, trailer + 0x06)? != FLIM_HEADER_SIZE {
            return Err(Error::Parse("unexpected FLIM header size"));
        }
        let total = le_u32(data, trailer + 0x0C)? as usize;
        if total != data.len() {
            return Err(Error::Parse("FLIM file size mismatch"));
        }
        if le_u32(data, trailer + 0x10)? != 1 {
            return Err(Error::Parse("unexpected FLIM section count"));
        }

        magic(data, trailer + 0x14, b"imag")?;
        let width = le_u16(data, trailer + 0x1C)?;
        let height = le_u16(data, trailer + 0x1E)?;
        let code = le_u32(data, trailer + 0x20)?;
        let format =
            PixelFormat::from_bclim_code(code).ok_or(Error::Parse("unknown BCLIM format code"))?;
        let size = le_u32(data, trailer + 0x24)? as usize;
        if size != trailer {
            return Err(Error::Parse("BCLIM payload size mismatch"));
        }

        Ok(Self {
            data: data[..trailer].to_vec(),
            width,
            height,
            format,
        })
    }
}
