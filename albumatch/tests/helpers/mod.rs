//! Test Helper Utilities
//!
//! Shared fakes and fixtures for albumatch integration tests

#![allow(dead_code)]

pub mod fakes;
pub mod log_capture;

pub use fakes::{album, candidate, write_library, CountingLimiter, FakeCovers, FakeSearch};
pub use log_capture::capture_logs;
