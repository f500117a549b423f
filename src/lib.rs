//! # lsb-watermark
//!
//! Copyright watermarks hidden in image pixel LSBs.
//!
//! - [`codec`]: bit packing, XOR cipher, LSB embed/extract, message framing
//! - [`watermark`]: upload / inspection / verification workflows
//! - [`common`]: configuration and logging

pub mod codec;
pub mod common;
pub mod watermark;

pub use codec::{Extraction, StegoError, SENTINEL};
pub use watermark::WatermarkService;
