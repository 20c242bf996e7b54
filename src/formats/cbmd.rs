//! CBMD - 3DS banner container (`banner.bnr`).
//!
//! A fixed 0x88-byte header points at one "common" CGFX resource blob, up
//! to 13 locale-specific blobs, and a trailing uncompressed BCWAV audio
//! stream. Every CGFX blob is an LZ11 stream; nothing is length-prefixed,
//! so a region's extent is inferred as the distance to the next recorded
//! offset (or end of file).
//!
//! ## Layout
//! ```text
//! [0x00] Magic "CBMD"              (4 bytes)
//! [0x04] Zero                      (u32)
//! [0x08] CommonCgfxOffset          (u32 LE)
//! [0x0C] LocaleCgfxOffset[13]      (u32 LE each; 0 = absent)
//! [0x40] Padding                   (0x44 bytes, zero)
//! [0x84] CwavOffset                (u32 LE)
//! [0x88] Blob data: common, locales 0..12 (each LZ11, padded to 4 bytes),
//!        then raw BCWAV audio
//! ```
//!
//! Rebuilding always recomputes every offset from the actual compressed
//! lengths, in header -> common -> locale 0..12 -> audio order.

use crate::compression::lz11;
use crate::utils::{le_u32, magic, pad4, patch_u32};
use crate::{Error, Result};

/// Size of the CBMD header in bytes.
pub const HEADER_SIZE: usize = 0x88;

/// Number of locale blob slots in the header.
pub const LOCALE_COUNT: usize = 13;

/// Locale names in header slot order, as used by the stock banner
/// templates.
pub const LOCALES: [&str; LOCALE_COUNT] = [
    "JPN", "USA_EN", "EUR_EN", "EUR_FR", "EUR_GE", "EUR_IT", "EUR_SP", "CHN", "KOR", "TWN",
    "USA_FR", "USA_SP", "USA_PO",
];

const COMMON_SLOT: usize = 0x08;
const LOCALE_SLOTS: usize = 0x0C;
const CWAV_SLOT: usize = 0x84;

/// Parsed banner with all resource blobs decompressed.
#[derive(Debug, Clone, Default)]
pub struct Cbmd {
    /// Decompressed common CGFX blob (empty if the common slot is zero).
    pub common: Vec<u8>,
    /// Decompressed per-locale CGFX blobs, indexed per [`LOCALES`].
    /// [`None`] for slots whose header offset is zero.
    pub locales: [Option<Vec<u8>>; LOCALE_COUNT],
    /// Raw BCWAV audio (empty if the audio slot is zero).
    pub audio: Vec<u8>,
}

impl Cbmd {
    /// Parse a `banner.bnr` buffer, decompressing every referenced blob.
    ///
    /// Non-zero offsets must point strictly past the header and inside the
    /// buffer ([`Error::InvalidRange`] otherwise). The extent of each blob
    /// is the gap to the smallest recorded offset after it.
    pub fn parse(data: &[u8]) -> Result<Self> {
        magic(data, 0, b"CBMD")?;
        if data.len() < HEADER_SIZE {
            return Err(Error::InvalidRange);
        }

        let common_off = read_slot(data, COMMON_SLOT)?;
        let mut locale_offs = [0usize; LOCALE_COUNT];
        for (i, slot) in locale_offs.iter_mut().enumerate() {
            *slot = read_slot(data, LOCALE_SLOTS + i * 4)?;
        }
        let cwav_off = read_slot(data, CWAV_SLOT)?;

        let mut offsets: Vec<usize> = locale_offs
            .iter()
            .copied()
            .chain([common_off, cwav_off])
            .filter(|&o| o != 0)
            .collect();
        offsets.sort_unstable();

        let common = if common_off != 0 {
            lz11::decompress(&data[..region_end(&offsets, common_off, data.len())], common_off)?
        } else {
            Vec::new()
        };

        let mut locales: [Option<Vec<u8>>; LOCALE_COUNT] = Default::default();
        for (i, &off) in locale_offs.iter().enumerate() {
            if off != 0 {
                let end = region_end(&offsets, off, data.len());
                locales[i] = Some(lz11::decompress(&data[..end], off)?);
            }
        }

        let audio = if cwav_off != 0 {
            data[cwav_off..].to_vec()
        } else {
            Vec::new()
        };

        Ok(Self {
            common,
            locales,
            audio,
        })
    }

    /// Serialize this banner, compressing every blob.
    ///
    /// A locale slot that is [`None`] is written as a zero offset; callers
    /// producing banners for retail tooling should fill all 13 slots (a
    /// locale with no distinct content still gets valid placeholder bytes).
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; HEADER_SIZE];
        out[..4].copy_from_slice(b"CBMD");

        let off = out.len();
        patch_u32(&mut out, COMMON_SLOT, off as u32);
        out.extend_from_slice(&lz11::compress(&self.common)?);
        pad4(&mut out);

        for (i, locale) in self.locales.iter().enumerate() {
            let Some(blob) = locale else { continue };
            let off = out.len();
            patch_u32(&mut out, LOCALE_SLOTS + i * 4, off as u32);
            out.extend_from_slice(&lz11::compress(blob)?);
            pad4(&mut out);
        }

        // An absent audio blob leaves its slot zero; a recorded offset must
        // point at actual bytes.
        if !self.audio.is_empty() {
            let off = out.len();
            patch_u32(&mut out, CWAV_SLOT, off as u32);
            out.extend_from_slice(&self.audio);
        }

        Ok(out)
    }
}

/// Build a banner from its parts. Exactly [`LOCALE_COUNT`] locale blobs
/// are required; use [`Cbmd::build`] directly to omit slots.
pub fn build(common: &[u8], locales: &[&[u8]], audio: &[u8]) -> Result<Vec<u8>> {
    if locales.len() != LOCALE_COUNT {
        return Err(Error::Parse("expected 13 locale blobs"));
    }
    let mut banner = Cbmd {
        common: common.to_vec(),
        locales: Default::default(),
        audio: audio.to_vec(),
    };
    for (slot, blob) in banner.locales.iter_mut().zip(locales) {
        *slot = Some(blob.to_vec());
    }
    banner.build()
}

/// Read one header offset slot, validating that a non-zero value points
/// strictly past the header and inside the buffer.
fn read_slot(data: &[u8], slot: usize) -> Result<usize> {
    let off = le_u32(data, slot)? as usize;
    if off != 0 && (off < HEADER_SIZE || off >= data.len()) {
        return Err(Error::InvalidRange);
    }
    Ok(off)
}

/// End of the region starting at `start`: the smallest recorded offset
/// greater than it, or end of file.
fn region_end(sorted_offsets: &[usize], start: usize, eof: usize) -> usize {
    sorted_offsets
        .iter()
        .copied()
        .find(|&o| o > start)
        .unwrap_or(eof)
}
