//! # LSB Embedding
//!
//! Hides a payload in the least significant bit of each R, G and B channel.
//!
//! ## Algorithm
//! 1. Normalize the carrier to 8-bit RGB (alpha is dropped)
//! 2. Append the `<END>` sentinel to the payload and expand it to bits (MSB first)
//! 3. Refuse if the bits do not fit in `width * height * 3` channels
//! 4. Walk pixels in raster order and overwrite R, G, B LSBs until the bits run out
//!
//! Pixels after the last written bit keep their original values.
//!
//! ### Capacity
//! `width * height * 3` bits, minus 40 bits for the sentinel. A 10x10 carrier
//! has 300 bits, enough for a 32-byte payload.

use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

use super::bits;
use super::error::StegoError;
use super::{Result, SENTINEL};

/// Number of bits a carrier of the given size can hold.
pub fn capacity_bits(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Number of bits `message` needs once the sentinel is appended.
pub fn required_bits(message: &[u8]) -> usize {
    (message.len() + SENTINEL.len()) * 8
}

/// Convert a decoded image to 8-bit RGB.
pub fn normalize(image: &DynamicImage) -> Result<RgbImage> {
    match image {
        DynamicImage::ImageRgb8(rgb) => Ok(rgb.clone()),
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_) => Ok(image.to_rgb8()),
        other => Err(StegoError::UnsupportedImageMode(format!(
            "{:?}",
            other.color()
        ))),
    }
}

/// Embed `message` into a copy of `image`.
///
/// # Errors
/// - [`StegoError::SentinelInPayload`] if `message` already contains `<END>`
/// - [`StegoError::CapacityExceeded`] if the carrier is too small
/// - [`StegoError::UnsupportedImageMode`] if the image cannot become RGB
pub fn embed(image: &DynamicImage, message: &[u8]) -> Result<RgbImage> {
    let mut carrier = normalize(image)?;
    embed_into(&mut carrier, message)?;
    Ok(carrier)
}

/// Embed `message` into `carrier` in place.
///
/// All checks run before the first pixel is modified.
pub fn embed_into(carrier: &mut RgbImage, message: &[u8]) -> Result<()> {
    if contains_sentinel(message) {
        return Err(StegoError::SentinelInPayload);
    }

    let (width, height) = carrier.dimensions();
    let available = capacity_bits(width, height);
    let required = required_bits(message);

    if required > available {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }

    let mut framed = Vec::with_capacity(message.len() + SENTINEL.len());
    framed.extend_from_slice(message);
    framed.extend_from_slice(SENTINEL);
    let payload_bits = bits::encode(&framed);

    log::debug!(
        "Embedding {} bits into {}x{} carrier ({} bits available)",
        payload_bits.len(),
        width,
        height,
        available
    );

    // pixels_mut() walks row by row, left to right
    let channels = carrier
        .pixels_mut()
        .flat_map(|pixel| pixel.0.iter_mut());

    for (channel, bit) in channels.zip(payload_bits) {
        *channel = (*channel & 0xFE) | bit;
    }

    Ok(())
}

/// Path of the stego image written next to `path`: `<stem><suffix>.<ext>`.
pub fn stego_path_for(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}

/// Embed into the image at `path` and save the result as a sibling file.
///
/// The original file is left alone and nothing is written on error.
///
/// # Returns
/// - `Ok(PathBuf)`: where the stego image was saved
pub fn embed_file(path: &Path, message: &[u8], suffix: &str) -> Result<PathBuf> {
    let image = image::open(path)?;
    let stego = embed(&image, message)?;

    let output = stego_path_for(path, suffix);
    stego.save(&output)?;

    log::info!(
        "Embedded {} bytes into {} -> {}",
        message.len(),
        path.display(),
        output.display()
    );

    Ok(output)
}

fn contains_sentinel(message: &[u8]) -> bool {
    message
        .windows(SENTINEL.len())
        .any(|window| window == SENTINEL)
}
