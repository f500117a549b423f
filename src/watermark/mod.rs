//! # Watermark Workflows
//!
//! Collaborator-facing layer over [`crate::codec`]:
//!
//! - [`keys`]: copyright hashes, unique keys, buyer keys
//! - [`service`]: embed / inspect / verify with explicit configuration
//! - [`temp`]: scoped temporary files

pub mod keys;
pub mod service;
pub mod temp;

pub use service::{EmbedOutcome, EmbedRequest, ImageSource, Verification, WatermarkReport, WatermarkService};
pub use temp::TempFile;
