//! # albumatch common library
//!
//! Shared code for the albumatch workspace:
//! - Error type used by configuration and I/O helpers
//! - TOML bootstrap configuration and config-file discovery
//! - HTML escaping for report rendering

pub mod config;
pub mod error;
pub mod html;

pub use error::{Error, Result};
