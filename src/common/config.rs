//! # Configuration Utilities
//!
//! Configuration structures and TOML loading shared by the library and the
//! `watermark` binary. Nothing in the codec reads global state; callers build
//! a [`WatermarkConfig`] and hand it to the service.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: WatermarkConfig = load_config("config/watermark.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Settings for the embed/inspect/verify workflows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Where finished stego images are written (e.g., "static/watermarked")
    pub output_dir: PathBuf,
    /// Where in-memory uploads are staged before embedding (e.g., "static/uploads")
    pub temp_dir: PathBuf,
    /// Appended to the file stem of a stego image
    pub stego_suffix: String,
    /// Length of generated buyer keys, in hex characters
    pub buyer_key_length: usize,
    /// Refuse lossy output formats instead of only warning
    pub reject_lossy: bool,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("static/watermarked"),
            temp_dir: PathBuf::from("static/uploads"),
            stego_suffix: "_stego".to_string(),
            buyer_key_length: 8,
            reject_lossy: true,
        }
    }
}

/// One registered artwork, identified by its unique key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub title: String,
    pub owner: String,
    /// Per-artwork key whose SHA-256 is embedded as the copyright hash
    pub unique_key: String,
}

/// Artworks a stego image can be verified against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkRegistry {
    #[serde(default)]
    pub artworks: Vec<ArtworkRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WatermarkConfig = toml::from_str("output_dir = \"out\"").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.stego_suffix, "_stego");
        assert_eq!(config.buyer_key_length, 8);
        assert!(config.reject_lossy);
    }

    #[test]
    fn test_load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[artworks]]\ntitle = \"Sunset\"\nowner = \"rina\"\nunique_key = \"abc\"\n"
        )
        .unwrap();

        let registry: ArtworkRegistry = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(registry.artworks.len(), 1);
        assert_eq!(registry.artworks[0].title, "Sunset");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config::<WatermarkConfig>("/nonexistent/watermark.toml").is_err());
    }
}
