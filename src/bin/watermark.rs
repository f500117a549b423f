//! # Watermark Binary Entry Point
//!
//! Thin command-line wrapper around [`WatermarkService`].
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin watermark -- --config config/watermark.toml \
//!   embed --image art.png --copyright-id <unique-key> --message "Thanks!"
//!
//! cargo run --bin watermark -- extract --image static/watermarked/art_stego.png --key 1a2b3c4d
//! cargo run --bin watermark -- verify --image art_stego.png --registry config/registry.toml
//! cargo run --bin watermark -- keygen --owner 42 --filename art.png
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use lsb_watermark::common::config::{load_config, ArtworkRegistry, WatermarkConfig};
use lsb_watermark::common::logging::init_logger;
use lsb_watermark::watermark::keys;
use lsb_watermark::watermark::{EmbedRequest, ImageSource, WatermarkService};

/// Command-line arguments for the watermark binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the watermark configuration file (TOML format)
    ///
    /// Example: config/watermark.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Log at DEBUG level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a copyright watermark into a lossless image
    Embed {
        #[arg(short, long)]
        image: PathBuf,

        /// Plaintext artwork key; its SHA-256 is embedded
        #[arg(long)]
        copyright_id: String,

        /// Optional creator message, readable with the buyer key
        #[arg(short, long)]
        message: Option<String>,

        /// Buyer key (random 8 hex chars when omitted)
        #[arg(short, long)]
        key: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Read the watermark from an image
    Extract {
        #[arg(short, long)]
        image: PathBuf,

        /// Buyer key to reveal the creator message
        #[arg(short, long)]
        key: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Match an image's watermark against a registry of artworks
    Verify {
        #[arg(short, long)]
        image: PathBuf,

        /// TOML file with [[artworks]] entries
        #[arg(short, long)]
        registry: String,

        #[arg(long)]
        json: bool,
    },
    /// Generate a per-artwork unique key and a buyer key
    Keygen {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        filename: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(args.verbose);

    let config: WatermarkConfig = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path))?,
        None => WatermarkConfig::default(),
    };
    let buyer_key_length = config.buyer_key_length;
    let service = WatermarkService::new(config);

    match args.command {
        Command::Embed {
            image,
            copyright_id,
            message,
            key,
            json,
        } => {
            let outcome = service.embed(&EmbedRequest {
                source: ImageSource::Path(&image),
                copyright_id: &copyright_id,
                creator_message: message.as_deref(),
                key: key.as_deref(),
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("Stego image:    {}", outcome.stego_path.display());
                println!("Copyright hash: {}", outcome.copyright_hash);
                if let Some(key) = &outcome.buyer_key {
                    println!("Buyer key:      {}", key);
                }
            }
        }
        Command::Extract { image, key, json } => {
            let report = service.inspect(ImageSource::Path(&image), key.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Copyright hash:  {}", report.copyright_hash);
                let creator = match (&report.creator_message, report.has_creator_message) {
                    (Some(message), _) => message.as_str(),
                    (None, true) => "<encrypted, pass --key>",
                    (None, false) => "-",
                };
                println!("Creator message: {}", creator);
                println!("Extracted in:    {} ms", report.extraction_ms);
            }
        }
        Command::Verify {
            image,
            registry,
            json,
        } => {
            let registry: ArtworkRegistry =
                load_config(&registry).with_context(|| format!("loading {}", registry))?;
            info!("Loaded {} registered artworks", registry.artworks.len());

            let verification = service.verify(ImageSource::Path(&image), &registry)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&verification)?);
            } else {
                match &verification.artwork {
                    Some(artwork) => {
                        println!("Verified: \"{}\" by {}", artwork.title, artwork.owner)
                    }
                    None => println!(
                        "Watermark {} does not match any registered artwork",
                        verification.copyright_hash
                    ),
                }
            }
        }
        Command::Keygen { owner, filename } => {
            let unique_key = keys::generate_unique_key(&owner, &filename);
            println!("Unique key:     {}", unique_key);
            println!("Copyright hash: {}", keys::copyright_hash(&unique_key));
            println!("Buyer key:      {}", keys::generate_buyer_key(buyer_key_length));
        }
    }

    Ok(())
}
