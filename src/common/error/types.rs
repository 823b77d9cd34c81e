//! Unified error type for metafile writing.
//!
//! Every fallible operation in the crate (serializing records, compressing
//! scanlines, reading a metafile back) reports through this one enum.
use thiserror::Error;

/// Main error type for metafile operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error raised by the output sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error occurred
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Not enough input to read the requested value
    #[error("Insufficient data: expected {expected}, got {available}")]
    InsufficientData { expected: usize, available: usize },

    /// Caller-supplied output buffer cannot hold the encoded data
    #[error("Output buffer too small: capacity is {capacity} bytes")]
    BufferTooSmall { capacity: usize },

    /// Declared image size exceeds the pixel buffer
    #[error("Bitmap data truncated: size_image is {size_image} bytes, buffer holds {available}")]
    TruncatedBitmap { size_image: u32, available: usize },

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Result type for metafile operations.
pub type Result<T> = std::result::Result<T, Error>;
