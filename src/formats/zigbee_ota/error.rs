use thiserror::Error;

/// Errors raised while decoding an OTA image. Offsets are relative to the
/// start of the image unless stated otherwise.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("OTA upgrade file identifier not found in {searched} bytes")]
    MagicNotFound { searched: usize },

    #[error("Invalid upgrade file identifier {found:02X?} at buffer offset {offset}")]
    IdentifierMismatch { found: [u8; 4], offset: usize },

    #[error("Size mismatch: image declares {expected} bytes, sub-elements end at {actual}")]
    SizeMismatch { expected: u32, actual: u64 },

    #[error("Truncated input: {what} at offset {offset} needs {needed} bytes, {available} available")]
    TruncatedInput {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error(transparent)]
    Read(#[from] binrw::Error),
}
