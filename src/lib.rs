//! **bannerkit** - a reusable Rust library for the Nintendo 3DS banner and
//! boot-splash binary formats.
//!
//! Three layers compose into the banner pipeline: the LZ11 compression
//! codec, the tiled texture codec, and the container (de)serializers, plus
//! a small patch engine that splices replacement textures into template
//! resource blobs at known offsets.
//!
//! # Supported formats
//! | Module | Format |
//! |--------|--------|
//! | [`compression::lz11`] | LZ11 - Nintendo LZ77 variant compressed stream |
//! | [`texture::tiled`]    | 8x8 Morton-tiled textures (RGBA8, LA8, RGB565) |
//! | [`texture::etc1`]     | ETC1 solid-color blocks (uniform fills only) |
//! | [`formats::cbmd`]     | CBMD - banner container (`banner.bnr`) |
//! | [`formats::darc`]     | darc - named-file archive (boot splashes) |
//! | [`formats::bclim`]    | BCLIM - tiled image with FLIM trailer |
//!
//! # Pipeline
//! A caller-supplied linear RGBA raster is tiled by [`texture::tiled`],
//! spliced into a decompressed resource blob by [`patch`], recompressed by
//! [`compression::lz11`], and wrapped by [`formats::cbmd`] with freshly
//! computed header offsets. The reverse path (parse, decompress, decode)
//! serves inspection and preview tooling. All operations are synchronous
//! pure functions over in-memory buffers; file and network I/O stay with
//! the caller.

pub mod compression;
pub mod error;
pub mod formats;
pub mod patch;
pub mod raster;
pub mod texture;
pub mod utils;

pub use error::{Error, Result};
