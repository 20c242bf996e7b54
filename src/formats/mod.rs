//! Parsers and builders for the banner container formats.
//!
//! Each submodule targets one format family. All codecs follow the same
//! conventions:
//!
//! * **Slice-based** - a format is parsed from a complete in-memory byte
//!   buffer and serialized back into one. There is no streaming: banner
//!   files are small and their region extents are inferred from neighboring
//!   offsets, which needs the whole buffer anyway.
//! * **Value types** - `parse` returns a fully constructed, internally
//!   consistent value or an error; `build` recomputes every offset from the
//!   actual lengths of the blobs being written and never emits a partially
//!   patched buffer.
//! * **Compression is separate** - [`darc`] and [`bclim`] handle
//!   already-decompressed bytes; only [`cbmd`] invokes
//!   [`crate::compression::lz11`] itself, because its regions are
//!   individually compressed behind one shared header.
//!
//! ## Format overview
//!
//! | Module    | Format | Description |
//! |-----------|--------|-------------|
//! | [`cbmd`]  | CBMD   | Banner container; common + 13 locale LZ11 blobs and trailing BCWAV audio |
//! | [`darc`]  | darc   | Generic named-file archive; holds boot-splash images |
//! | [`bclim`] | BCLIM  | Single tiled image with a trailing FLIM/imag descriptor |

pub mod bclim;
pub mod cbmd;
pub mod darc;
