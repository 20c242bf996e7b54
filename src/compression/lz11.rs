//! LZ11 - Nintendo's LZ77 variant used by 3DS banner resources.
//!
//! A stream is a 4-byte header (marker `0x11`, then the decompressed size as
//! a 24-bit little-endian integer) followed by groups of up to eight tokens.
//! Each group is introduced by one flag byte, read MSB-first: a clear bit
//! means one literal byte, a set bit a back-reference. Back-references come
//! in three sizes, dispatched on the top nibble of their first byte:
//!
//! ```text
//! nibble 2..=F  2 bytes: LLLL DDDD dddddddd            len = L + 1        (3..=0x10)
//! nibble 0      3 bytes: 0000 LLLL LLLL DDDD dddddddd  len = L + 0x11     (0x11..=0x110)
//! nibble 1      4 bytes: 0001 LLLL LLLLLLLL LLLL DDDD dddddddd
//!                                                      len = L + 0x111    (0x111..=0x10110)
//! ```
//!
//! In all three, `disp = D + 1` (1..=0x1000) counts backward from the end of
//! the output produced so far. Copies run one byte at a time, so `disp <
//! len` legally repeats freshly written output.

use crate::utils::{le_u24, u8_at};
use crate::{Error, Result};

/// Marker byte identifying an LZ11 stream.
pub const MARKER: u8 = 0x11;

/// Sanity ceiling on the declared decompressed size (5 MiB).
///
/// Banner resource blobs are a few hundred KiB at most; a header declaring
/// more than this is treated as malformed rather than allocated.
pub const MAX_DECOMPRESSED_SIZE: u32 = 5 * 1024 * 1024;

const WINDOW: usize = 0x1000;
const MAX_MATCH: usize = 0x10110;

/// Decompress an LZ11 stream starting at `offset` within `data`.
///
/// Fails with [`Error::BadMagic`] if the marker byte is not `0x11` and with
/// [`Error::SizeLimit`] if the declared size exceeds
/// [`MAX_DECOMPRESSED_SIZE`].
///
/// Truncated *compressed* input does not fail: decoding stops at the end of
/// the available bytes and the reconstructed prefix is returned. Real banner
/// files in the wild rely on this lenience (region blob extents are inferred
/// from neighboring header offsets and may include trailing padding), so it
/// is kept deliberately.
pub fn decompress(data: &[u8], offset: usize) -> Result<Vec<u8>> {
    if u8_at(data, offset)? != MARKER {
        return Err(Error::BadMagic);
    }
    let size = le_u24(data, offset + 1)?;
    if size > MAX_DECOMPRESSED_SIZE {
        return Err(Error::SizeLimit(size));
    }
    let size = size as usize;

    let mut out = Vec::with_capacity(size);
    let mut pos = offset + 4;

    'stream: while out.len() < size && pos < data.len() {
        let flags = data[pos];
        pos += 1;

        for bit in 0..8 {
            if out.len() >= size {
                break;
            }
            if flags & (0x80 >> bit) == 0 {
                match data.get(pos) {
                    Some(&b) => out.push(b),
                    None => break 'stream,
                }
                pos += 1;
                continue;
            }

            if pos + 2 > data.len() {
                break 'stream;
            }
            let b0 = data[pos];
            let b1 = data[pos + 1];
            pos += 2;

            let (len, disp) = match b0 >> 4 {
                0 => {
                    let Some(&b2) = data.get(pos) else {
                        break 'stream;
                    };
                    pos += 1;
                    let len = ((b0 as usize & 0xF) << 4 | b1 as usize >> 4) + 0x11;
                    let disp = ((b1 as usize & 0xF) << 8 | b2 as usize) + 1;
                    (len, disp)
                }
                1 => {
                    if pos + 2 > data.len() {
                        break 'stream;
                    }
                    let (b2, b3) = (data[pos], data[pos + 1]);
                    pos += 2;
                    let len = ((b0 as usize & 0xF) << 12
                        | (b1 as usize) << 4
                        | b2 as usize >> 4)
                        + 0x111;
                    let disp = ((b2 as usize & 0xF) << 8 | b3 as usize) + 1;
                    (len, disp)
                }
                nibble => {
                    let len = nibble as usize + 1;
                    let disp = ((b0 as usize & 0xF) << 8 | b1 as usize) + 1;
                    (len, disp)
                }
            };

            // Byte-at-a-time so overlapping references read output written
            // earlier in this same copy. A displacement reaching before the
            // start of the stream yields zero bytes (legacy behavior).
            for _ in 0..len {
                if out.len() >= size {
                    break;
                }
                let b = if out.len() < disp {
                    0
                } else {
                    out[out.len() - disp]
                };
                out.push(b);
            }
        }
    }

    Ok(out)
}

/// Compress `data` into an LZ11 stream.
///
/// Greedy longest-match search over a 0x1000-byte sliding window, minimum
/// match length 3, maximum 0x10110. Length ties keep the smallest
/// displacement, which favors the short token encodings.
///
/// Fails with [`Error::SizeLimit`] if `data` is longer than
/// [`MAX_DECOMPRESSED_SIZE`] - the decompressor would refuse such a stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_DECOMPRESSED_SIZE as usize {
        return Err(Error::SizeLimit(data.len() as u32));
    }

    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    out.push(MARKER);
    out.push(data.len() as u8);
    out.push((data.len() >> 8) as u8);
    out.push((data.len() >> 16) as u8);

    let mut pos = 0;
    while pos < data.len() {
        let flag_pos = out.len();
        out.push(0);
        let mut flags = 0u8;

        for bit in 0..8 {
            if pos >= data.len() {
                break;
            }

            let (len, disp) = longest_match(data, pos);
            if len < 3 {
                out.push(data[pos]);
                pos += 1;
                continue;
            }

            flags |= 0x80 >> bit;
            let d = disp - 1;
            if len <= 0x10 {
                out.push(((len as u8 - 1) << 4) | (d >> 8) as u8);
                out.push(d as u8);
            } else if len <= 0x110 {
                let l = len - 0x11;
                out.push((l >> 4) as u8);
                out.push(((l as u8 & 0xF) << 4) | (d >> 8) as u8);
                out.push(d as u8);
            } else {
                let l = len - 0x111;
                out.push(0x10 | (l >> 12) as u8);
                out.push((l >> 4) as u8);
                out.push(((l as u8 & 0xF) << 4) | (d >> 8) as u8);
                out.push(d as u8);
            }
            pos += len;
        }

        out[flag_pos] = flags;
    }

    Ok(out)
}

/// Longest back-reference for the bytes at `pos`, as `(length,
/// displacement)`. `(0, 0)` when nothing of length >= 3 exists.
///
/// Comparing against the original input is equivalent to comparing against
/// the decoder's output: for `disp < len` the decoder re-reads bytes it just
/// wrote, which are exactly `data[pos..]`.
fn longest_match(data: &[u8], pos: usize) -> (usize, usize) {
    let max_len = MAX_MATCH.min(data.len() - pos);
    if max_len < 3 {
        return (0, 0);
    }

    let mut best_len = 0;
    let mut best_disp = 0;
    for disp in 1..=WINDOW.min(pos) {
        let start = pos - disp;
        // A candidate can only improve on the best so far if it also
        // matches one byte past it.
        if best_len > 0 && data[start + best_len] != data[pos + best_len] {
            continue;
        }
        let mut len = 0;
        while len < max_len && data[start + len] == data[pos + len] {
            len += 1;
        }
        if len > best_len {
            best_len = len;
            best_disp = disp;
            if best_len == max_len {
                break;
            }
        }
    }

    (best_len, best_disp)
}
