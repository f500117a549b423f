//! # Codec Errors
//!
//! Every failure the watermark codec can report. Capacity, key and payload
//! problems are detected before any pixel is touched, so an `Err` always means
//! nothing was written.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    #[error("payload too large for carrier: need {required} bits, have {available} bits")]
    CapacityExceeded { required: usize, available: usize },

    #[error("encryption key cannot be empty")]
    EmptyKey,

    #[error("XOR produced an invalid code point {value:#x} at position {position}")]
    InvalidCodePoint { position: usize, value: u32 },

    #[error("failed to decode embedded data: {0}")]
    DecodeFailure(String),

    #[error("no watermark found in image")]
    WatermarkAbsent,

    #[error("unsupported image mode: {0}")]
    UnsupportedImageMode(String),

    #[error("payload contains the end-of-message marker and cannot be framed")]
    SentinelInPayload,

    #[error("refusing to write lossy format {0}: LSB data would not survive compression")]
    LossyFormat(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
