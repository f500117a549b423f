//! # Common Components
//!
//! Shared utilities used by the library and the `watermark` binary.
//!
//! ## Modules
//!
//! - [`config`]: Configuration structures and TOML parsing
//! - [`logging`]: `env_logger` setup for binaries

pub mod config;
pub mod logging;
