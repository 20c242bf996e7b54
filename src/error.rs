//! Library-wide error and result types.

use std::fmt;

/// Result alias used throughout bannerkit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; callers that need richer
/// context should wrap `Error` in their own type.
#[derive(Debug)]
pub enum Error {
    /// A magic/signature field (or LZ11 marker byte) did not match the
    /// expected value.
    BadMagic,
    /// A declared decompressed size exceeds the sanity ceiling
    /// ([`crate::compression::lz11::MAX_DECOMPRESSED_SIZE`]).
    SizeLimit(u32),
    /// A texture dimension is not a multiple of the 8-pixel tile size, or a
    /// pixel buffer's length does not match its declared dimensions.
    BadDimensions,
    /// A patch target would write past the end of the resource blob.
    RegionOverflow,
    /// An offset or size field would read outside the valid region.
    InvalidRange,
    /// A null-terminated string had no null terminator within the buffer.
    UnterminatedName,
    /// A template identifier or texture slot name is not in the lookup
    /// table. Unknown templates are rejected, never guessed at.
    UnsupportedTemplate,
    /// A structural constraint was violated (message describes which one).
    Parse(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadMagic => write!(f, "bad magic value"),
            Error::SizeLimit(n) => write!(f, "declared size {n} exceeds limit"),
            Error::BadDimensions => write!(f, "invalid texture dimensions"),
            Error::RegionOverflow => write!(f, "region exceeds blob bounds"),
            Error::InvalidRange => write!(f, "invalid offset or size"),
            Error::UnterminatedName => write!(f, "unterminated string"),
            Error::UnsupportedTemplate => write!(f, "unknown template or slot"),
            Error::Parse(s) => write!(f, "parse error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
