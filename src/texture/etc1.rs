//! Restricted ETC1 support: uniform solid-color blocks only.
//!
//! Template shells are recolored by stamping one hand-built ETC1 block over
//! the whole texture region. The block uses differential mode with both
//! base colors equal and every selector set to 0; table 0 / selector 0
//! applies a -8 modifier per pixel, so the encoder biases the base color by
//! +8 to compensate. General per-pixel ETC1 compression is deliberately out
//! of scope.
//!
//! A block is stored as one little-endian `u64`: the low 32 bits hold the
//! (all-zero) selectors, the high 32 bits the base colors and mode bits.

/// Build an 8-byte ETC1 block that decodes to a uniform color close to
/// `rgb`.
///
/// Valid for solid fills only; the result is within 10 per channel of the
/// request (5-bit quantization plus the modifier bias).
pub fn solid_block(rgb: (u8, u8, u8)) -> [u8; 8] {
    // Selector 0 subtracts 8 from the base color; pre-add it.
    let r5 = to_5bit(rgb.0.saturating_add(8));
    let g5 = to_5bit(rgb.1.saturating_add(8));
    let b5 = to_5bit(rgb.2.saturating_add(8));

    // Differential mode, zero deltas, both tables 0, no flip.
    let hi32: u32 = (r5 << 27) | (g5 << 22) | (b5 << 17) | 1 << 1;
    let lo32: u32 = 0; // all selectors 0 => uniform
    (((hi32 as u64) << 32) | lo32 as u64).to_le_bytes()
}

/// Decode the representative color of a solid-fill [`solid_block`].
///
/// Only the first subblock's base color, table 0 and selector 0 are
/// consulted; this is exact for blocks produced by [`solid_block`] and an
/// approximation for anything else.
pub fn solid_color(block: &[u8; 8]) -> (u8, u8, u8) {
    let word = u64::from_le_bytes(*block);
    let lo32 = word as u32;
    let hi32 = (word >> 32) as u32;

    let base = (
        expand5(hi32 >> 27 & 0x1F),
        expand5(hi32 >> 22 & 0x1F),
        expand5(hi32 >> 17 & 0x1F),
    );
    let table = (hi32 >> 5 & 0x7) as usize;
    // Pixel 0's selector: MSB in the upper half-word, LSB in the lower.
    let selector = (lo32 >> 16 & 0x1) << 1 | lo32 & 0x1;
    let m = etc1_modifier(table, selector);

    (clamp_u8(base.0 + m), clamp_u8(base.1 + m), clamp_u8(base.2 + m))
}

/// Fill `byte_len` bytes (a multiple of 8) with repeats of the solid block
/// for `rgb`.
pub fn solid_fill(rgb: (u8, u8, u8), byte_len: usize) -> Vec<u8> {
    let block = solid_block(rgb);
    let mut out = Vec::with_capacity(byte_len);
    for _ in 0..byte_len / 8 {
        out.extend_from_slice(&block);
    }
    out
}

fn etc1_modifier(table: usize, selector: u32) -> i32 {
    // Tables 1..=7 scale differently, but solid fills only ever use table 0.
    const TABLES: [[i32; 4]; 8] = [
        [-8, -2, 2, 8],
        [-17, -5, 5, 17],
        [-29, -9, 9, 29],
        [-42, -13, 13, 42],
        [-60, -18, 18, 60],
        [-80, -24, 24, 80],
        [-106, -33, 33, 106],
        [-183, -47, 47, 183],
    ];
    TABLES[table][selector as usize]
}

#[inline]
fn to_5bit(v: u8) -> u32 {
    (v as u32 * 31 + 127) / 255
}

#[inline]
fn expand5(v: u32) -> i32 {
    ((v << 3) | (v >> 2)) as i32
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
