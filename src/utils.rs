//! Low-level buffer primitives shared by all codecs.
//!
//! Every format in this library is a value type built from (or serialized
//! into) a complete in-memory buffer, so the helpers here work on byte
//! slices rather than readers. Each read is bounds-checked and returns an
//! error - there is no partial-read ambiguity.

use crate::{Error, Result};

/// Read one byte at `off`.
#[inline]
pub(crate) fn u8_at(buf: &[u8], off: usize) -> Result<u8> {
    buf.get(off).copied().ok_or(Error::InvalidRange)
}

/// Read a little-endian `u16` at `off`.
#[inline]
pub(crate) fn le_u16(buf: &[u8], off: usize) -> Result<u16> {
    let b = buf
        .get(off..off + 2)
        .ok_or(Error::InvalidRange)?
        .try_into()
        .unwrap();
    Ok(u16::from_le_bytes(b))
}

/// Read a little-endian 24-bit value at `off` (LZ11 size field).
#[inline]
pub(crate) fn le_u24(buf: &[u8], off: usize) -> Result<u32> {
    let b = buf.get(off..off + 3).ok_or(Error::InvalidRange)?;
    Ok(b[0] as u32 | (b[1] as u32) << 8 | (b[2] as u32) << 16)
}

/// Read a little-endian `u32` at `off`.
#[inline]
pub(crate) fn le_u32(buf: &[u8], off: usize) -> Result<u32> {
    let b = buf
        .get(off..off + 4)
        .ok_or(Error::InvalidRange)?
        .try_into()
        .unwrap();
    Ok(u32::from_le_bytes(b))
}

/// Verify that the bytes at `off` match `expected`.
///
/// Returns [`Error::BadMagic`] on mismatch, [`Error::InvalidRange`] if the
/// buffer is too short to hold the magic at all.
#[inline]
pub(crate) fn magic<const N: usize>(buf: &[u8], off: usize, expected: &[u8; N]) -> Result<()> {
    let got = buf.get(off..off + N).ok_or(Error::InvalidRange)?;
    if got != expected {
        return Err(Error::BadMagic);
    }
    Ok(())
}

/// Extract a null-terminated UTF-8 string from a byte slice at `offset`.
///
/// Returns [`Error::InvalidRange`] if `offset` is out of bounds, or
/// [`Error::UnterminatedName`] if no null byte is found.
#[inline]
pub(crate) fn null_string(buf: &[u8], offset: usize) -> Result<String> {
    let slice = buf.get(offset..).ok_or(Error::InvalidRange)?;
    let end = slice
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::UnterminatedName)?;
    Ok(String::from_utf8_lossy(&slice[..end]).into_owned())
}

/// Append a little-endian `u16`.
#[inline]
pub(crate) fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Append a little-endian `u32`.
#[inline]
pub(crate) fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Overwrite a previously written little-endian `u32` at `off`.
///
/// Used to backpatch size/offset fields once the final layout is known.
/// Callers guarantee the slot exists; this is builder-internal.
#[inline]
pub(crate) fn patch_u32(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

/// Zero-pad `buf` to a 4-byte boundary.
#[inline]
pub(crate) fn pad4(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

/// Next multiple of 4 at or above `n`.
#[inline]
pub(crate) fn align4(n: usize) -> usize {
    (n + 3) & !3
}
