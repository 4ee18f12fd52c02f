//! albumatch library interface
//!
//! Reconciles a local album catalog against YouTube Music: every
//! (artist, album) pair is searched, the first album result is taken as the
//! match, its cover is downloaded, and the matches are written out as audit
//! JSON plus an HTML gallery.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{PipelineError, PipelineResult};
pub use crate::workflow::{Pipeline, RunReport};

/// Version line for the startup banner: version, commit, build time, profile
pub fn build_info() -> String {
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}
