//! # LSB Extraction
//!
//! Reads channel LSBs in the same raster order the embedder wrote them and
//! decodes bytes as they complete. After each byte only the last
//! `SENTINEL.len()` bytes are compared against `<END>`, so a scan is linear in
//! the number of pixels read.

use image::{DynamicImage, RgbImage};
use std::path::Path;

use super::bits::ByteAssembler;
use super::embed::normalize;
use super::error::StegoError;
use super::{Result, SENTINEL};

/// Outcome of reading an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A sentinel-terminated payload was found.
    Payload(String),
    /// The whole image was read without meeting the sentinel.
    Absent,
}

impl Extraction {
    pub fn payload(&self) -> Option<&str> {
        match self {
            Extraction::Payload(message) => Some(message),
            Extraction::Absent => None,
        }
    }

    pub fn into_payload(self) -> Result<String> {
        match self {
            Extraction::Payload(message) => Ok(message),
            Extraction::Absent => Err(StegoError::WatermarkAbsent),
        }
    }
}

/// Raw bytes recovered from the LSB plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Decoded bytes, without the sentinel when one was found.
    pub bytes: Vec<u8>,
    /// Whether decoding stopped at the sentinel.
    pub terminated: bool,
}

/// Decode LSBs until the sentinel or the end of the image.
pub fn scan(carrier: &RgbImage) -> Scan {
    let mut assembler = ByteAssembler::new();
    let mut bytes = Vec::new();

    let channels = carrier.pixels().flat_map(|pixel| pixel.0);

    for channel in channels {
        let Some(byte) = assembler.push(channel & 1) else {
            continue;
        };
        bytes.push(byte);

        if bytes.ends_with(SENTINEL) {
            bytes.truncate(bytes.len() - SENTINEL.len());
            return Scan {
                bytes,
                terminated: true,
            };
        }
    }

    Scan {
        bytes,
        terminated: false,
    }
}

/// Extract the embedded message from `image`.
///
/// # Returns
/// - `Ok(Extraction::Payload)`: the message, sentinel stripped
/// - `Ok(Extraction::Absent)`: no sentinel anywhere in the image
///
/// # Errors
/// - [`StegoError::DecodeFailure`] if a terminated payload is not valid UTF-8
/// - [`StegoError::UnsupportedImageMode`] if the image cannot become RGB
pub fn extract(image: &DynamicImage) -> Result<Extraction> {
    let carrier = normalize(image)?;
    extract_rgb(&carrier)
}

/// [`extract`] for an already normalized carrier.
pub fn extract_rgb(carrier: &RgbImage) -> Result<Extraction> {
    let Scan { bytes, terminated } = scan(carrier);

    if !terminated {
        log::debug!("No sentinel after {} decoded bytes", bytes.len());
        return Ok(Extraction::Absent);
    }

    String::from_utf8(bytes)
        .map(Extraction::Payload)
        .map_err(|e| StegoError::DecodeFailure(e.to_string()))
}

/// Open `path` and [`extract`] from it.
pub fn extract_file(path: &Path) -> Result<Extraction> {
    let image = image::open(path)?;
    extract(&image)
}
