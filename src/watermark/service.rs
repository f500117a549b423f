//! # Watermark Service
//!
//! The workflows upload and verification handlers call into:
//!
//! - [`WatermarkService::embed`]: hash the copyright id, obfuscate the optional
//!   creator message, frame, embed and write the stego image to `output_dir`
//! - [`WatermarkService::inspect`]: extract, unframe and (with a buyer key)
//!   reveal the creator message
//! - [`WatermarkService::verify`]: match the embedded hash against registered
//!   artworks
//!
//! ## Message Flow
//!
//! ```text
//! copyright id ──sha256──> hash ─┐
//! creator message ──xor(key)─────┴─> COPYRIGHT:<hash><USER_MESSAGE><ct> ──> LSB embed
//! ```
//!
//! Stego images are first written to a [`TempFile`] in `temp_dir` and only
//! moved into `output_dir` once the encoder succeeded.

use image::{DynamicImage, ImageFormat};
use log::{debug, info, warn};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec::embed::{embed, stego_path_for};
use crate::codec::extract::extract;
use crate::codec::framing::{self, FramedMessage};
use crate::codec::{cipher, Result, StegoError};
use crate::common::config::{ArtworkRecord, ArtworkRegistry, WatermarkConfig};
use crate::watermark::keys;
use crate::watermark::temp::TempFile;

/// Where the carrier image comes from.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// An image file on disk
    Path(&'a Path),
    /// An uploaded image held in memory; `file_name` names the output
    Bytes { data: &'a [u8], file_name: &'a str },
}

impl ImageSource<'_> {
    fn load(&self) -> Result<(DynamicImage, ImageFormat)> {
        match *self {
            ImageSource::Path(path) => {
                let format = ImageFormat::from_path(path)?;
                Ok((image::open(path)?, format))
            }
            ImageSource::Bytes { data, .. } => {
                let format = image::guess_format(data)?;
                Ok((image::load_from_memory_with_format(data, format)?, format))
            }
        }
    }

    fn name(&self) -> &Path {
        match *self {
            ImageSource::Path(path) => path,
            ImageSource::Bytes { file_name, .. } => Path::new(file_name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmbedRequest<'a> {
    pub source: ImageSource<'a>,
    /// Plaintext artwork identifier; only its SHA-256 is embedded
    pub copyright_id: &'a str,
    pub creator_message: Option<&'a str>,
    /// Buyer key for the creator message. Generated when absent.
    pub key: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedOutcome {
    pub stego_path: PathBuf,
    pub copyright_hash: String,
    /// Key the buyer needs to read the creator message. Never embedded.
    pub buyer_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatermarkReport {
    pub copyright_hash: String,
    /// Whether a creator message segment was present
    pub has_creator_message: bool,
    /// Decrypted creator message, only when a key was supplied
    pub creator_message: Option<String>,
    pub extraction_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub copyright_hash: String,
    pub artwork: Option<ArtworkRecord>,
}

impl Verification {
    pub fn verified(&self) -> bool {
        self.artwork.is_some()
    }
}

pub struct WatermarkService {
    config: WatermarkConfig,
}

impl WatermarkService {
    pub fn new(config: WatermarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    /// Embed a copyright watermark and optional creator message.
    ///
    /// # Returns
    /// - `Ok(EmbedOutcome)`: path of the stego image in `output_dir`, the
    ///   embedded hash and the buyer key (if a creator message was given)
    ///
    /// # Errors
    /// - [`StegoError::EmptyKey`] if an empty key was supplied
    /// - [`StegoError::LossyFormat`] for carriers whose format can alter LSBs
    ///   (JPEG, GIF, ...) when `reject_lossy` is set
    /// - [`StegoError::CapacityExceeded`] if the image is too small
    ///
    /// No file is left in `output_dir` or `temp_dir` on error.
    pub fn embed(&self, request: &EmbedRequest<'_>) -> Result<EmbedOutcome> {
        let (image, format) = request.source.load()?;
        self.check_lossless(format)?;

        let copyright_hash = keys::copyright_hash(request.copyright_id);

        let (ciphertext, buyer_key) = match request.creator_message {
            Some(message) => {
                let key = match request.key {
                    Some(key) => key.to_string(),
                    None => keys::generate_buyer_key(self.config.buyer_key_length),
                };
                (Some(cipher::transform(message, &key)?), Some(key))
            }
            None => (None, None),
        };

        let message = framing::compose(&copyright_hash, ciphertext.as_deref());
        debug!("Framed watermark is {} bytes", message.len());

        let stego = embed(&image, message.as_bytes())?;

        let canonical = format.extensions_str().first().copied().unwrap_or("png");
        let staged = TempFile::new(&self.config.temp_dir, "stego", canonical)?;
        stego.save_with_format(staged.path(), format)?;

        let mut file_name = stego_path_for(request.source.name(), &self.config.stego_suffix);
        if file_name.extension().is_none() {
            file_name.set_extension(canonical);
        }
        let file_name = file_name.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "source has no file name")
        })?;
        let destination = self.config.output_dir.join(file_name);
        let stego_path = staged.persist(&destination)?;

        info!(
            "Watermarked {} -> {}",
            request.source.name().display(),
            stego_path.display()
        );

        Ok(EmbedOutcome {
            stego_path,
            copyright_hash,
            buyer_key,
        })
    }

    /// Read the watermark from `source`.
    ///
    /// # Errors
    /// - [`StegoError::WatermarkAbsent`] if no framed watermark is present
    /// - [`StegoError::DecodeFailure`] if the embedded bytes are corrupted
    pub fn inspect(&self, source: ImageSource<'_>, key: Option<&str>) -> Result<WatermarkReport> {
        let (image, _) = source.load()?;

        let start = Instant::now();
        let extracted = extract(&image)?;
        let elapsed = start.elapsed();
        info!("Extracted watermark in {:.4} seconds", elapsed.as_secs_f64());

        let message = extracted.into_payload()?;
        if !framing::is_framed(&message) {
            warn!("{} carries data without a copyright marker", source.name().display());
            return Err(StegoError::WatermarkAbsent);
        }

        let FramedMessage {
            copyright_hash,
            creator_ciphertext,
        } = FramedMessage::split(&message);

        let creator_message = match (&creator_ciphertext, key) {
            (Some(ciphertext), Some(key)) => Some(cipher::transform(ciphertext, key)?),
            _ => None,
        };

        Ok(WatermarkReport {
            copyright_hash,
            has_creator_message: creator_ciphertext.is_some(),
            creator_message,
            extraction_ms: elapsed.as_millis() as u64,
        })
    }

    /// Match the embedded copyright hash against `registry`.
    pub fn verify(&self, source: ImageSource<'_>, registry: &ArtworkRegistry) -> Result<Verification> {
        let report = self.inspect(source, None)?;

        let artwork = registry
            .artworks
            .iter()
            .find(|record| keys::copyright_hash(&record.unique_key) == report.copyright_hash)
            .cloned();

        match &artwork {
            Some(record) => info!("Verified \"{}\" by {}", record.title, record.owner),
            None => warn!("Hash {} matches no registered artwork", report.copyright_hash),
        }

        Ok(Verification {
            copyright_hash: report.copyright_hash,
            artwork,
        })
    }

    fn check_lossless(&self, format: ImageFormat) -> Result<()> {
        if is_lossless(format) {
            return Ok(());
        }
        if self.config.reject_lossy {
            return Err(StegoError::LossyFormat(format!("{:?}", format)));
        }
        warn!("Writing {:?}: the watermark will not survive encoding", format);
        Ok(())
    }
}

/// Formats whose encoders store every RGB8 pixel exactly. Anything else
/// (JPEG, palette-based GIF, ...) can rewrite channel LSBs.
fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Tga
            | ImageFormat::Pnm
            | ImageFormat::Qoi
    )
}
