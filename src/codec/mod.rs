//! # Watermark Codec
//!
//! Hides a text payload in the least significant bits of an image and reads it
//! back.
//!
//! ## Modules
//!
//! - [`bits`]: byte <-> bitstream conversion
//! - [`cipher`]: XOR obfuscation of the creator message
//! - [`embed`]: writes payload + sentinel into channel LSBs
//! - [`extract`]: reads LSBs back until the sentinel
//! - [`framing`]: `COPYRIGHT:<hash><USER_MESSAGE><ciphertext>` layout
//! - [`error`]: [`StegoError`]
//!
//! The payload carries no length field. Its end is marked by [`SENTINEL`].

pub mod bits;
pub mod cipher;
pub mod embed;
pub mod error;
pub mod extract;
pub mod framing;

pub use embed::{embed, embed_file, embed_into};
pub use error::StegoError;
pub use extract::{extract, extract_file, Extraction};
pub use framing::FramedMessage;

/// End-of-payload marker appended before embedding.
pub const SENTINEL: &[u8] = b"<END>";

pub type Result<T> = std::result::Result<T, StegoError>;
