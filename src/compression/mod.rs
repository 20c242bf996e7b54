//! Compression and decompression for the banner tool chain.
//!
//! Everything in the banner pipeline that is compressed uses a single
//! algorithm: Nintendo's LZ11 variant of LZ77. It appears in two places:
//!
//! * **CBMD banners** - each CGFX resource blob referenced from the 0x88
//!   header pointer table is an LZ11 stream
//!   ([`crate::formats::cbmd::Cbmd`]).
//! * **Boot splashes** - `logo.bcma.lz` / `logo.darc.lz` in the ExeFS is a
//!   darc archive compressed as one LZ11 stream; decompress first with
//!   [`lz11::decompress`], then parse with
//!   [`crate::formats::darc::Darc::parse`].
//!
//! ## Wire format
//!
//! | Bytes | Meaning |
//! |-------|---------|
//! | 0x00  | marker `0x11` |
//! | 0x01..0x04 | decompressed size, 24-bit little-endian |
//! | 0x04.. | flag bytes + literal/back-reference payload |
//!
//! See [`lz11`] for the token encodings.

pub mod lz11;
